//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use quorum_desk_domain::ConfigIssue;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PROJECT_FILES: [&str; 2] = ["quorum-desk.toml", ".quorum-desk.toml"];
const ENV_PREFIX: &str = "QUORUM_DESK_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `VERBOSITY` environment variable
    /// 2. `QUORUM_DESK_*` environment variables
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./quorum-desk.toml` or `./.quorum-desk.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/quorum-desk/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::figment(config_path)
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// The merged provider chain, exposed for inspection.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Merging global config {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            debug!("Merging project config {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            debug!("Merging explicit config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["VERBOSITY"])
                    .map(|_| "backend.verbosity".into()),
            )
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Run [`FileConfig::validate`] and split the result.
    ///
    /// Returns the warnings (already logged) or every issue if any of
    /// them is an error.
    pub fn check(config: &FileConfig) -> Result<Vec<ConfigIssue>, ConfigError> {
        let issues = config.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigError::Invalid(issues));
        }
        for issue in &issues {
            warn!("Config: {}", issue.message);
        }
        Ok(issues)
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/quorum-desk/config.toml if set,
    /// otherwise falls back to ~/.config/quorum-desk/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quorum-desk").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* and VERBOSITY", ENV_PREFIX);

        if let Some(path) = config_path {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", marker, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./quorum-desk.toml or ./.quorum-desk.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use quorum_desk_domain::ConfigIssueCode;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.backend.default, "gpt5");
        assert_eq!(config.backend.verbosity, "minimal");
        assert!(config.backend.voting);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quorum-desk"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\ndefault = \"mistral\"\n\n[server]\nbind = \"0.0.0.0:1234\""
        )
        .unwrap();

        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load(Some(file.path())).unwrap();
            assert_eq!(config.backend.default, "mistral");
            assert_eq!(config.backend.verbosity, "minimal");
            assert_eq!(config.server.bind, "0.0.0.0:1234");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "quorum-desk.toml",
                r#"
[backend]
default = "claude"
verbosity = "balanced"
"#,
            )?;
            jail.set_env("QUORUM_DESK_BACKEND__DEFAULT", "mistral");
            jail.set_env("QUORUM_DESK_BACKEND__VOTING", "false");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.backend.default, "mistral");
            assert_eq!(config.backend.verbosity, "balanced");
            assert!(!config.backend.voting);
            Ok(())
        });
    }

    #[test]
    fn test_bare_verbosity_env() {
        Jail::expect_with(|jail| {
            jail.create_file(".quorum-desk.toml", "[backend]\nverbosity = \"balanced\"")?;
            jail.set_env("VERBOSITY", "verbose");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.backend.verbosity, "verbose");
            Ok(())
        });
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("quorum-desk.toml", "[backend\ndefault = ")?;
            assert!(matches!(
                ConfigLoader::load(None),
                Err(ConfigError::Load(_))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_check_splits_errors_and_warnings() {
        let mut config = FileConfig::default();
        config.backend.consensus = vec!["gpt5".to_string(), "gpt5".to_string()];
        let warnings = ConfigLoader::check(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0].code,
            ConfigIssueCode::DuplicateBackend { .. }
        ));

        config.backend.timeout_seconds = 0;
        assert!(matches!(
            ConfigLoader::check(&config),
            Err(ConfigError::Invalid(issues)) if issues.len() == 2
        ));
    }
}
