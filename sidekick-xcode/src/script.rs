//! Ruby helper script generation
//!
//! The injector does not edit `project.pbxproj` itself. It renders a short
//! script for the `xcodeproj` gem and lets Ruby do the mutation.

use std::path::{Path, PathBuf};

/// Marker used to count reference statements in a rendered script.
pub const REFERENCE_CALL: &str = "project.main_group.new_reference(";

/// A rendered helper script.
#[derive(Debug, Clone)]
pub struct ProjectScript {
    source: String,
    references: usize,
}

impl ProjectScript {
    /// Render a script that adds every file in `files` to the first target of
    /// the project at `project_file`.
    pub fn render(project_file: &Path, files: &[PathBuf]) -> Self {
        let mut source = String::new();
        source.push_str("require 'xcodeproj'\n\n");
        source.push_str(&format!("project_path = {}\n", ruby_literal(project_file)));
        source.push_str("project = Xcodeproj::Project.open(project_path)\n\n");
        source.push_str("target = project.targets.first\n");
        source.push_str("files_added = 0\n\n");

        for file in files {
            source.push_str(&format!("file_ref = {}{})\n", REFERENCE_CALL, ruby_literal(file)));
            source.push_str("target.add_file_references([file_ref])\n");
            source.push_str("files_added += 1\n");
        }

        source.push_str("\nproject.save\n");
        source.push_str("puts \"Added #{files_added} files to Xcode project\"\n");

        log::debug!("Rendered helper script with {} references", files.len());

        Self {
            source,
            references: files.len(),
        }
    }

    /// The script text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of files the script references.
    pub fn reference_count(&self) -> usize {
        self.references
    }
}

/// Quote a path as a single-quoted Ruby string literal.
fn ruby_literal(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
