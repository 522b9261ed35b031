//! End-to-end file reference injection

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::gem::{GemTool, ELEVATE_PROGRAM};
use crate::runner::{run_script, write_script};
use crate::scan::{scan_sources, ScanError};
use crate::script::ProjectScript;

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("Failed to scan sources: {0}")]
    Scan(#[from] ScanError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Required tool '{0}' was not found on PATH")]
    ToolMissing(String),
    #[error("Gem '{0}' is not installed and automatic install is disabled")]
    GemMissing(String),
    #[error("Installing gem '{gem}' failed (exit code {code:?})")]
    InstallFailed { gem: String, code: Option<i32> },
    #[error("Helper script failed (exit code {code:?}): {stderr}")]
    ScriptFailed { code: Option<i32>, stderr: String },
}

/// Everything the injector needs to know.
#[derive(Debug, Clone)]
pub struct InjectOptions {
    /// Directory scanned for sources
    pub project_dir: PathBuf,
    /// The `.xcodeproj` bundle to modify
    pub project_file: PathBuf,
    /// File extension without the dot
    pub extension: String,
    /// Where the generated script is written
    pub script_path: PathBuf,
    pub gem: String,
    pub gem_program: String,
    /// Wrapper for the install command; `None` installs unelevated
    pub elevate: Option<String>,
    pub interpreter: String,
    /// Install the gem when missing instead of failing
    pub auto_install: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("MEDISYNC_RE-DONE"),
            project_file: PathBuf::from("MEDISYNC_RE-DONE.xcodeproj"),
            extension: "swift".to_string(),
            script_path: default_script_path(),
            gem: "xcodeproj".to_string(),
            gem_program: "gem".to_string(),
            elevate: Some(ELEVATE_PROGRAM.to_string()),
            interpreter: "ruby".to_string(),
            auto_install: true,
        }
    }
}

/// `<temp dir>/add_files_to_xcode.rb`
pub fn default_script_path() -> PathBuf {
    std::env::temp_dir().join("add_files_to_xcode.rb")
}

/// Make `path` absolute, resolving symlinks and `..` when it exists.
///
/// xcodeproj computes references relative to the absolute project location,
/// so every path handed to the script must be absolute.
pub fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.exists() {
        std::fs::canonicalize(path)
    } else {
        std::path::absolute(path)
    }
}

/// Progress notifications emitted while injecting.
#[derive(Debug, Clone, PartialEq)]
pub enum InjectStep {
    Scanning { root: PathBuf },
    Found { count: usize },
    CheckingGem { gem: String },
    InstallingGem { gem: String },
    Running { count: usize },
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct InjectReport {
    pub files: Vec<PathBuf>,
    pub references: usize,
    pub script_path: PathBuf,
    /// Whatever the helper script printed
    pub stdout: String,
}

pub struct Injector {
    options: InjectOptions,
}

impl Injector {
    pub fn new(options: InjectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InjectOptions {
        &self.options
    }

    pub fn run(&self) -> Result<InjectReport, InjectError> {
        self.run_with(|_| {})
    }

    /// Run the injection, calling `on_step` before each phase.
    pub fn run_with(&self, mut on_step: impl FnMut(InjectStep)) -> Result<InjectReport, InjectError> {
        let opts = &self.options;
        let project_dir = resolve_path(&opts.project_dir)?;
        let project_file = resolve_path(&opts.project_file)?;

        on_step(InjectStep::Scanning {
            root: project_dir.clone(),
        });
        let files = scan_sources(&project_dir, &opts.extension)?;
        on_step(InjectStep::Found { count: files.len() });

        let gem = GemTool::new(opts.gem.clone())
            .with_program(opts.gem_program.clone())
            .with_elevation(opts.elevate.clone());
        on_step(InjectStep::CheckingGem {
            gem: opts.gem.clone(),
        });
        if !gem.is_installed()? {
            if !opts.auto_install {
                return Err(InjectError::GemMissing(opts.gem.clone()));
            }
            on_step(InjectStep::InstallingGem {
                gem: opts.gem.clone(),
            });
            gem.install_elevated()?;
        }

        let script = ProjectScript::render(&project_file, &files);
        write_script(&opts.script_path, script.source())?;

        on_step(InjectStep::Running {
            count: script.reference_count(),
        });
        let output = run_script(&opts.interpreter, &opts.script_path)?;

        log::info!(
            "Injected {} references into {}",
            script.reference_count(),
            project_file.display()
        );

        Ok(InjectReport {
            references: script.reference_count(),
            files,
            script_path: opts.script_path.clone(),
            stdout: output.stdout,
        })
    }
}
