//! What each subcommand does

use std::path::PathBuf;

use sidekick_alpha::{convert_file, AlphaError, ConvertReport};
use sidekick_xcode::{InjectError, InjectOptions, InjectReport, InjectStep, Injector};

/// Print progress the way a terminal user expects to see it.
fn announce(step: InjectStep) {
    match step {
        InjectStep::Scanning { root } => {
            println!("Finding source files in {}...", root.display());
        }
        InjectStep::Found { count } => println!("Found {} files", count),
        InjectStep::CheckingGem { gem } => println!("\nChecking for {} gem...", gem),
        InjectStep::InstallingGem { gem } => println!("{} gem not found. Installing...", gem),
        InjectStep::Running { count } => {
            println!("\nAdding {} files to Xcode project...", count)
        }
    }
}

/// Add every scanned source file to the project.
pub fn inject(options: InjectOptions) -> Result<InjectReport, InjectError> {
    log::debug!("Inject options: {:?}", options);
    let report = Injector::new(options).run_with(announce)?;

    print!("{}", report.stdout);
    println!("\nSUCCESS! All files added to Xcode project!");
    println!("\nNext steps:");
    println!("   1. Open the project in Xcode");
    println!("   2. Press Cmd+B to build");
    Ok(report)
}

/// Make the background of `input` transparent and write it to `output`.
pub fn alpha(input: PathBuf, output: PathBuf) -> Result<ConvertReport, AlphaError> {
    let report = convert_file(&input, &output)?;
    if report.alpha_added {
        log::info!("{} had no alpha channel, added one", input.display());
    }
    println!("Saved transparent image to {}", report.output.display());
    Ok(report)
}

/// Map a finished command to a process exit code, reporting failures.
pub fn exit_code<T, E: std::fmt::Display>(result: Result<T, E>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opaque white 4x4 image with no alpha channel
    fn write_white_square(path: &std::path::Path) {
        let bytes = include_bytes!("../tests/fixtures/white_4x4.ppm");
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code::<(), String>(Ok(())), 0);
        assert_eq!(exit_code::<(), String>(Err("boom".into())), 1);
    }

    #[test]
    fn test_alpha_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("white.ppm");
        let output = dir.path().join("white.png");
        write_white_square(&input);

        let report = alpha(input, output.clone()).unwrap();
        assert!(report.alpha_added);
        assert_eq!(report.cleared, 16);
        assert!(output.exists());
    }

    #[test]
    fn test_alpha_failure_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let result = alpha(dir.path().join("missing.png"), dir.path().join("out.png"));
        assert_eq!(exit_code(result), 1);
    }
}
