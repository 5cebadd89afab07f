//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STENCIL_<SECTION>__<KEY>`, e.g.
//!    `STENCIL_DEFAULTS__LICENSE=MIT`
//! 3. Config file (`--config FILE` or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults offered for new projects.
    pub defaults: Defaults,
    /// Where sticky answers are remembered.
    pub preferences: PreferencesConfig,
    /// Which profile `stencil new` uses.
    pub profile: ProfileConfig,
    /// Template lookup.
    pub templates: TemplateConfig,
    /// Post-generation hooks.
    pub hooks: HooksConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub version: String,
    pub license: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            version: "0.1.0".into(),
            license: "Unlicense".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Built-in profile name or profile TOML path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    pub skip_install: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

/// Keys understood by `stencil config get`.
pub const KEYS: &[&str] = &[
    "defaults.version",
    "defaults.license",
    "preferences.path",
    "profile.path",
    "templates.dir",
    "hooks.skip_install",
    "output.no_color",
];

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist unless `create` is set (the
    /// `init` command is about to write it); the default location is
    /// always optional.
    pub fn load(config_file: Option<&PathBuf>, create: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), !create),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("rs", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }

    /// The file sticky answers are stored in.
    pub fn preferences_path(&self) -> PathBuf {
        if let Some(path) = &self.preferences.path {
            return path.clone();
        }
        directories::ProjectDirs::from("rs", "stencil", "stencil")
            .map(|d| d.data_dir().join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from(".stencil-preferences.json"))
    }

    /// Look up a dotted key for display.  Unset optional keys are empty.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        let value = match key {
            "defaults.version" => self.defaults.version.clone(),
            "defaults.license" => self.defaults.license.clone(),
            "preferences.path" => path(&self.preferences.path),
            "profile.path" => self.profile.path.clone().unwrap_or_default(),
            "templates.dir" => path(&self.templates.dir),
            "hooks.skip_install" => self.hooks.skip_install.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_match_the_question_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.version, "0.1.0");
        assert_eq!(cfg.defaults.license, "Unlicense");
        assert!(!cfg.hooks.skip_install);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_overrides_defaults_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nlicense = \"MIT\"\n\n[hooks]\nskip_install = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg.defaults.license, "MIT");
        assert_eq!(cfg.defaults.version, "0.1.0");
        assert!(cfg.hooks.skip_install);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nlicense = \"MIT\"\n").unwrap();

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("STENCIL_DEFAULTS__LICENSE".to_string(), "ISC".to_string()),
            ("STENCIL_OUTPUT__NO_COLOR".to_string(), "true".to_string()),
        ])));

        let cfg = AppConfig::load_from(&path, true, env).unwrap();
        assert_eq!(cfg.defaults.license, "ISC");
        assert!(cfg.output.no_color);
    }

    #[test]
    fn serialised_default_round_trips_through_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, toml::to_string_pretty(&AppConfig::default()).unwrap()).unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.license").as_deref(), Some("Unlicense"));
        assert_eq!(cfg.get("templates.dir").as_deref(), Some(""));
        assert_eq!(cfg.get("hooks.skip_install").as_deref(), Some("false"));
        assert!(cfg.get("does.not.exist").is_none());
    }

    #[test]
    fn every_listed_key_resolves() {
        let cfg = AppConfig::default();
        for key in KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn preferences_path_honours_override() {
        let mut cfg = AppConfig::default();
        cfg.preferences.path = Some(PathBuf::from("/tmp/prefs.json"));
        assert_eq!(cfg.preferences_path(), PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
