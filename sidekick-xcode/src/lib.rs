//! # sidekick-xcode
//!
//! Adds every source file under a directory to an Xcode project.
//!
//! The crate scans for files, renders a Ruby script for the `xcodeproj`
//! gem, makes sure the gem is installed, and runs the script.
//!
//! ## Example
//!
//! ```no_run
//! use sidekick_xcode::{InjectOptions, Injector};
//!
//! let report = Injector::new(InjectOptions::default())
//!     .run()
//!     .expect("injection failed");
//! println!("{} references added", report.references);
//! ```

pub mod gem;
pub mod inject;
pub mod runner;
pub mod scan;
pub mod script;

pub use gem::{gem_listed, GemTool};
pub use inject::{default_script_path, resolve_path, InjectError, InjectOptions, InjectReport, InjectStep, Injector};
pub use runner::{run_script, write_script, ScriptOutput};
pub use scan::{scan_sources, ScanError};
pub use script::ProjectScript;
