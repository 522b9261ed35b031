//! Writing and executing the generated helper script

use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::inject::InjectError;

/// Captured result of a finished script.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Write `source` to `path`, creating parent directories as needed.
/// An existing file at `path` is overwritten.
pub fn write_script(path: impl AsRef<Path>, source: &str) -> Result<(), InjectError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, source)?;
    log::debug!("Wrote {} bytes to {}", source.len(), path.display());
    Ok(())
}

/// Run `interpreter script` to completion and capture both streams.
///
/// Any non-zero exit becomes [`InjectError::ScriptFailed`] carrying stderr.
pub fn run_script(interpreter: &str, script: impl AsRef<Path>) -> Result<ScriptOutput, InjectError> {
    let script = script.as_ref();
    log::info!("Running {} {}", interpreter, script.display());

    let output = Command::new(interpreter)
        .arg(script)
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InjectError::ToolMissing(interpreter.to_string()),
            _ => InjectError::Io(e),
        })?;

    let result = ScriptOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !result.status.success() {
        log::error!("{} exited with {}", interpreter, result.status);
        return Err(InjectError::ScriptFailed {
            code: result.status.code(),
            stderr: result.stderr,
        });
    }

    Ok(result)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_write_script_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/helper.rb");
        write_script(&path, "puts 1\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "puts 1\n");
    }

    #[test]
    fn test_run_script_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.sh");
        write_script(&path, "echo 'Added 2 files'\n").unwrap();

        let out = run_script("sh", &path).unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout.trim(), "Added 2 files");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_run_script_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fail.sh");
        write_script(&path, "echo 'cannot load such file' >&2\nexit 1\n").unwrap();

        match run_script("sh", &path) {
            Err(InjectError::ScriptFailed { code, stderr }) => {
                assert_eq!(code, Some(1));
                assert!(stderr.contains("cannot load such file"));
            }
            other => panic!("expected ScriptFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_interpreter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.rb");
        write_script(&path, "").unwrap();
        assert!(matches!(
            run_script("no-such-interpreter-9000", &path),
            Err(InjectError::ToolMissing(_))
        ));
    }
}
