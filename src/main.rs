use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod actions;
mod config;

use config::{Config, InjectOverrides};

#[derive(Parser)]
#[command(name = "sidekick", about = "Xcode file injection and image background removal")]
struct Cli {
    /// Config file (defaults to ./sidekick.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add all source files under a directory to an Xcode project
    Inject {
        /// Directory to scan
        #[arg(long)]
        project_dir: Option<PathBuf>,
        /// The .xcodeproj to modify
        #[arg(long)]
        project_file: Option<PathBuf>,
        /// Source extension, without the dot
        #[arg(long)]
        extension: Option<String>,
        /// Fail instead of installing a missing gem
        #[arg(long)]
        no_install: bool,
    },
    /// Make the near-white background of an image transparent
    Alpha {
        /// Source image
        input: Option<PathBuf>,
        /// Destination image
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = loaded.unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let code = match cli.command {
        Commands::Inject {
            project_dir,
            project_file,
            extension,
            no_install,
        } => {
            let mut options = config.xcode.to_options();
            InjectOverrides {
                project_dir,
                project_file,
                extension,
                no_install,
            }
            .apply(&mut options);
            actions::exit_code(actions::inject(options))
        }
        Commands::Alpha { input, output } => actions::exit_code(actions::alpha(
            input.unwrap_or(config.alpha.input),
            output.unwrap_or(config.alpha.output),
        )),
    };

    std::process::exit(code);
}
