//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use council_domain::JudgeConfigError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "judge-council";
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "COUNCIL_";

/// Errors raised while loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),

    #[error(transparent)]
    Judge(#[from] JudgeConfigError),

    #[error("Could not build HTTP client: {0}")]
    HttpClient(String),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `COUNCIL_SECTION__KEY` (e.g. `COUNCIL_VETO__REQUIRE_REASON`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/judge-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/judge-council/config.toml if set,
    /// otherwise falls back to ~/.config/judge-council/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{ConsensusMode, ProviderKind};
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.judges.is_empty());
        assert_eq!(config.veto.timeout_seconds, 300);
    }

    #[test]
    fn test_global_config_path_names_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("judge-council/config.toml"));
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_project_file_overrides_global() {
        Jail::expect_with(|jail| {
            let xdg = jail.directory().join("xdg");
            jail.set_env("XDG_CONFIG_HOME", xdg.display());
            std::fs::create_dir_all(xdg.join("judge-council")).map_err(|e| e.to_string())?;
            jail.create_file(
                "xdg/judge-council/config.toml",
                r#"
[council]
mode = "unanimous"

[veto]
timeout_seconds = 90
"#,
            )?;
            jail.create_file(
                "council.toml",
                r#"
[council]
mode = "weighted"
threshold = 0.6

[[judges]]
name = "local"
provider = "ollama"
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.council.mode, ConsensusMode::Weighted);
            assert_eq!(config.council.threshold, Some(0.6));
            assert_eq!(config.veto.timeout_seconds, 90);
            assert_eq!(config.judges[0].provider, ProviderKind::Ollama);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_and_env_precedence() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("none").display());
            jail.create_file(".council.toml", "[veto]\ntimeout_seconds = 30\n")?;
            jail.create_file(
                "custom.toml",
                "[veto]\ntimeout_seconds = 45\nrequire_reason = false\n",
            )?;
            jail.set_env("COUNCIL_VETO__REQUIRE_REASON", "true");

            let config =
                ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.veto.timeout_seconds, 45);
            assert!(config.veto.require_reason);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_path() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("none").display());
            let err = ConfigLoader::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::NotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("none").display());
            jail.create_file("council.toml", "[veto]\ntimeout_seconds = 0\n")?;
            let err = ConfigLoader::load(None).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid(ConfigValidationError::InvalidTimeout)
            ));
            Ok(())
        });
    }
}
