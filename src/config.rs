//! Configuration loading from sidekick.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};

use sidekick_xcode::InjectOptions;

/// Default config file, looked up in the current directory
pub const DEFAULT_CONFIG: &str = "sidekick.toml";

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub xcode: XcodeConfig,
    #[serde(default)]
    pub alpha: AlphaConfig,
}

/// Settings for `sidekick inject`
#[derive(Debug, Clone, Deserialize)]
pub struct XcodeConfig {
    /// Directory scanned for sources
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,
    /// The .xcodeproj bundle to update
    #[serde(default = "default_project_file")]
    pub project_file: PathBuf,
    /// Source extension without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Where the generated Ruby script goes
    #[serde(default = "sidekick_xcode::default_script_path")]
    pub script_path: PathBuf,
    #[serde(default = "default_gem")]
    pub gem: String,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Install the gem with sudo when it is missing
    #[serde(default = "default_true")]
    pub auto_install: bool,
}

impl Default for XcodeConfig {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            project_file: default_project_file(),
            extension: default_extension(),
            script_path: sidekick_xcode::default_script_path(),
            gem: default_gem(),
            interpreter: default_interpreter(),
            auto_install: true,
        }
    }
}

fn default_project_dir() -> PathBuf {
    InjectOptions::default().project_dir
}

fn default_project_file() -> PathBuf {
    InjectOptions::default().project_file
}

fn default_extension() -> String {
    "swift".to_string()
}

fn default_gem() -> String {
    "xcodeproj".to_string()
}

fn default_interpreter() -> String {
    "ruby".to_string()
}

fn default_true() -> bool {
    true
}

impl XcodeConfig {
    pub fn to_options(&self) -> InjectOptions {
        InjectOptions {
            project_dir: self.project_dir.clone(),
            project_file: self.project_file.clone(),
            extension: self.extension.clone(),
            script_path: self.script_path.clone(),
            gem: self.gem.clone(),
            interpreter: self.interpreter.clone(),
            auto_install: self.auto_install,
            ..InjectOptions::default()
        }
    }
}

/// Values given on the command line; each one beats the config file
#[derive(Debug, Clone, Default)]
pub struct InjectOverrides {
    pub project_dir: Option<PathBuf>,
    pub project_file: Option<PathBuf>,
    pub extension: Option<String>,
    pub no_install: bool,
}

impl InjectOverrides {
    pub fn apply(self, options: &mut InjectOptions) {
        if let Some(dir) = self.project_dir {
            options.project_dir = dir;
        }
        if let Some(file) = self.project_file {
            options.project_file = file;
        }
        if let Some(ext) = self.extension {
            options.extension = ext;
        }
        if self.no_install {
            options.auto_install = false;
        }
    }
}

/// Settings for `sidekick alpha`
#[derive(Debug, Clone, Deserialize)]
pub struct AlphaConfig {
    #[serde(default = "default_alpha_input")]
    pub input: PathBuf,
    #[serde(default = "default_alpha_output")]
    pub output: PathBuf,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            input: default_alpha_input(),
            output: default_alpha_output(),
        }
    }
}

fn default_alpha_input() -> PathBuf {
    PathBuf::from("logo.png")
}

fn default_alpha_output() -> PathBuf {
    PathBuf::from("logo_transparent.png")
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from sidekick.toml in the current directory, or use built-in
    /// defaults when there is no such file
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_or_default(DEFAULT_CONFIG)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.xcode.extension, "swift");
        assert_eq!(config.xcode.gem, "xcodeproj");
        assert!(config.xcode.auto_install);
        assert_eq!(config.alpha.input, PathBuf::from("logo.png"));
        assert_eq!(config.alpha.output, PathBuf::from("logo_transparent.png"));
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [xcode]
            project_dir = "App/Sources"
            auto_install = false

            [alpha]
            output = "out.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.xcode.project_dir, PathBuf::from("App/Sources"));
        assert!(!config.xcode.auto_install);
        assert_eq!(config.xcode.interpreter, "ruby");
        assert_eq!(config.alpha.input, PathBuf::from("logo.png"));
        assert_eq!(config.alpha.output, PathBuf::from("out.png"));
    }

    #[test]
    fn test_to_options_carries_fields() {
        let config = Config::parse("[xcode]\nextension = \"m\"\ninterpreter = \"ruby3\"\n").unwrap();
        let opts = config.xcode.to_options();
        assert_eq!(opts.extension, "m");
        assert_eq!(opts.interpreter, "ruby3");
        assert_eq!(opts.elevate.as_deref(), Some("sudo"));
    }

    #[test]
    fn test_cli_flag_beats_config_key() {
        let config = Config::parse("[xcode]\nproject_dir = \"FromConfig\"\nextension = \"m\"\n").unwrap();
        let mut opts = config.xcode.to_options();
        InjectOverrides {
            project_dir: Some(PathBuf::from("FromFlag")),
            ..InjectOverrides::default()
        }
        .apply(&mut opts);

        assert_eq!(opts.project_dir, PathBuf::from("FromFlag"));
        assert_eq!(opts.extension, "m");
        assert!(opts.auto_install);
    }

    #[test]
    fn test_no_install_flag_disables_auto_install() {
        let config = Config::parse("[xcode]\nauto_install = true\n").unwrap();
        let mut opts = config.xcode.to_options();
        InjectOverrides {
            no_install: true,
            ..InjectOverrides::default()
        }
        .apply(&mut opts);
        assert!(!opts.auto_install);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = Config::parse("[xcode]\nproject_file = \"X.xcodeproj\"\n").unwrap();
        let mut opts = config.xcode.to_options();
        InjectOverrides::default().apply(&mut opts);
        assert_eq!(opts.project_file, PathBuf::from("X.xcodeproj"));
        assert_eq!(opts.extension, "swift");
    }

    #[test]
    fn test_missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join(DEFAULT_CONFIG)).unwrap();
        let defaults = Config::default();

        assert_eq!(config.xcode.project_dir, defaults.xcode.project_dir);
        assert_eq!(config.xcode.project_file, defaults.xcode.project_file);
        assert_eq!(config.xcode.script_path, defaults.xcode.script_path);
        assert_eq!(config.alpha.input, defaults.alpha.input);
        assert_eq!(config.alpha.output, defaults.alpha.output);
    }

    #[test]
    fn test_existing_default_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG);
        std::fs::write(&path, "[alpha]\ninput = \"icon.png\"\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.alpha.input, PathBuf::from("icon.png"));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(Config::parse("[xcode"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("sidekick.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
