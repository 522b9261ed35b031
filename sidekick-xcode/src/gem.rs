//! `gem` presence checks and elevated installs

use std::path::PathBuf;
use std::process::Command;

use crate::inject::InjectError;

/// Command used to elevate gem installs.
pub const ELEVATE_PROGRAM: &str = "sudo";

/// A Ruby gem and the `gem` executable used to manage it.
#[derive(Debug, Clone)]
pub struct GemTool {
    program: String,
    gem: String,
    elevate: Option<String>,
}

impl GemTool {
    pub fn new(gem: impl Into<String>) -> Self {
        Self {
            program: "gem".to_string(),
            gem: gem.into(),
            elevate: Some(ELEVATE_PROGRAM.to_string()),
        }
    }

    /// Use a different `gem` executable (name on PATH or absolute path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Override the elevation wrapper. `None` installs without elevation.
    pub fn with_elevation(mut self, elevate: Option<String>) -> Self {
        self.elevate = elevate;
        self
    }

    pub fn gem(&self) -> &str {
        &self.gem
    }

    fn locate(&self) -> Result<PathBuf, InjectError> {
        which::which(&self.program).map_err(|_| InjectError::ToolMissing(self.program.clone()))
    }

    /// Ask `gem list <gem>` whether the gem is installed.
    pub fn is_installed(&self) -> Result<bool, InjectError> {
        let program = self.locate()?;
        let output = Command::new(&program).arg("list").arg(&self.gem).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let found = gem_listed(&stdout, &self.gem);
        log::debug!("{} list {} -> installed={}", program.display(), self.gem, found);
        Ok(found)
    }

    /// Run `sudo gem install <gem>`, blocking on the password prompt if any.
    pub fn install_elevated(&self) -> Result<(), InjectError> {
        let program = self.locate()?;
        let mut cmd = match &self.elevate {
            Some(elevate) => {
                let mut cmd = Command::new(elevate);
                cmd.arg(&program);
                cmd
            }
            None => Command::new(&program),
        };
        cmd.arg("install").arg(&self.gem);

        log::info!("Installing gem {}", self.gem);
        let status = cmd.status().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InjectError::ToolMissing(
                self.elevate.clone().unwrap_or_else(|| self.program.clone()),
            ),
            _ => InjectError::Io(e),
        })?;

        if !status.success() {
            log::error!("gem install {} exited with {}", self.gem, status);
            return Err(InjectError::InstallFailed {
                gem: self.gem.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Whether `gem list` output names `gem` as an installed package.
///
/// Lines look like `xcodeproj (1.24.0, 1.22.0)`.
pub fn gem_listed(stdout: &str, gem: &str) -> bool {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|name| name == gem)
}
