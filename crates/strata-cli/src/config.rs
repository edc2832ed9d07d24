//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STRATA_<SECTION>__<KEY>`, e.g.
//!    `STRATA_DEFAULTS__OUTPUT_DIR`
//! 3. `./.strata.toml`
//! 4. `<user config dir>/strata/config.toml`
//! 5. Built-in defaults (always present)
//!
//! `--config FILE` replaces layers 3 and 4 with a single, required file.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use strata_adapters::BootstrapConfig;
use strata_core::domain::MarkerFile;

use crate::{
    cli::OutputFormat,
    error::{CliError, CliResult},
};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".strata.toml";

const ENV_PREFIX: &str = "STRATA";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `scaffold` and `bootstrap`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Environment bootstrap settings.
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Output root used when `--output` is absent.
    pub output_dir: PathBuf,
    /// Marker file name used when `--marker` is absent.
    pub marker_file: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated_projects"),
            marker_file: MarkerFile::DEFAULT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist unless `may_be_missing` (the command is about to create it).
    pub fn load(config_file: Option<&PathBuf>, may_be_missing: bool) -> CliResult<Self> {
        let layers: Vec<(PathBuf, bool)> = match config_file {
            Some(path) => vec![(path.clone(), !may_be_missing)],
            None => Self::global_path()
                .into_iter()
                .chain(std::iter::once(Self::local_path()))
                .map(|p| (p, false))
                .collect(),
        };
        Self::from_layers(&layers, true)
    }

    /// Defaults overlaid with one file only; no environment.
    ///
    /// Used by `config set`, which must not persist values that came from
    /// another layer.
    pub fn load_file(path: &Path) -> CliResult<Self> {
        Self::from_layers(&[(path.to_path_buf(), false)], false)
    }

    fn from_layers(files: &[(PathBuf, bool)], with_env: bool) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| CliError::config_with("Failed to build default configuration", e))?;

        let mut builder = Config::builder().add_source(defaults);
        for (path, required) in files {
            debug!(path = %path.display(), required, "config layer");
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(*required),
            );
        }
        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("bootstrap.dev_dependencies"),
            );
        }

        builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| CliError::config_with(format!("Failed to load configuration: {e}"), e))
    }

    /// User-level config file, if a home directory can be determined.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Per-directory config file, relative to the working directory.
    pub fn local_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// The file `config set` writes and `config path` reports:
    /// `--config`, else `./.strata.toml` if present, else the user file.
    pub fn active_path(config_file: Option<&PathBuf>) -> CliResult<PathBuf> {
        if let Some(path) = config_file {
            return Ok(path.clone());
        }
        let local = Self::local_path();
        if local.exists() {
            return Ok(local);
        }
        Self::global_path().ok_or_else(|| {
            CliError::config("Could not determine the user configuration directory")
        })
    }

    /// The configured marker file name, validated.
    pub fn marker_file(&self) -> CliResult<MarkerFile> {
        MarkerFile::new(self.defaults.marker_file.as_str())
            .map_err(|e| CliError::config_with("Invalid defaults.marker_file", e))
    }

    // ── key access ────────────────────────────────────────────────────────

    /// Look up a dotted key such as `defaults.output_dir`.
    pub fn get(&self, key: &str) -> CliResult<Value> {
        let tree = self.to_value()?;
        tree.pointer(&pointer(key))
            .cloned()
            .ok_or_else(|| CliError::ConfigKeyNotFound { key: key.into() })
    }

    /// Set a dotted key from its command-line spelling.
    ///
    /// The current value decides how `raw` is read: booleans parse as
    /// `true`/`false`, lists split on commas, everything else is a string.
    /// The result must still deserialize, so `output.format = xml` fails.
    pub fn set(&mut self, key: &str, raw: &str) -> CliResult<()> {
        let mut tree = self.to_value()?;
        let slot = tree
            .pointer_mut(&pointer(key))
            .ok_or_else(|| CliError::ConfigKeyNotFound { key: key.into() })?;

        *slot = match &*slot {
            Value::Object(_) => {
                return Err(invalid(format!(
                    "'{key}' is a section; set one of its keys instead"
                )));
            }
            Value::Bool(_) => Value::Bool(
                raw.trim()
                    .parse()
                    .map_err(|_| invalid(format!("'{key}' expects true or false, got '{raw}'")))?,
            ),
            Value::Array(_) => Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
            _ => Value::String(raw.to_string()),
        };

        *self = serde_json::from_value(tree).map_err(|e| CliError::InvalidInput {
            message: format!("'{raw}' is not a valid value for '{key}'"),
            source: Some(Box::new(e)),
        })?;
        Ok(())
    }

    /// Every leaf key with its value, sorted by key.
    pub fn entries(&self) -> CliResult<Vec<(String, Value)>> {
        let mut out = Vec::new();
        flatten("", &self.to_value()?, &mut out);
        Ok(out)
    }

    /// Write as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| CliError::config_with("Failed to serialise configuration", e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
                message: format!("Failed to create config directory '{}'", parent.display()),
                source: e,
            })?;
        }

        std::fs::write(path, toml).map_err(|e| CliError::IoError {
            message: format!("Failed to write config to '{}'", path.display()),
            source: e,
        })
    }

    fn to_value(&self) -> CliResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| CliError::config_with("Failed to serialise configuration", e))
    }
}

/// Render a config value the way a user would type it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn pointer(key: &str) -> String {
    key.split('.').fold(String::new(), |mut acc, part| {
        acc.push('/');
        acc.push_str(part);
        acc
    })
}

fn invalid(message: String) -> CliError {
    CliError::InvalidInput {
        message,
        source: None,
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_match_generator_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.output_dir, PathBuf::from("generated_projects"));
        assert_eq!(cfg.defaults.marker_file, "__init__.py");
        assert_eq!(cfg.output.format, OutputFormat::Auto);
        assert!(cfg.bootstrap.register_git_alias);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn file_overrides_defaults_partially() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "c.toml",
            "[defaults]\nmarker_file = \"README.md\"\n\n[bootstrap]\nregister_git_alias = false\n",
        );

        let cfg = AppConfig::load_file(&path).unwrap();
        assert_eq!(cfg.defaults.marker_file, "README.md");
        assert_eq!(cfg.defaults.output_dir, PathBuf::from("generated_projects"));
        assert!(!cfg.bootstrap.register_git_alias);
        assert_eq!(
            cfg.bootstrap.dev_dependencies,
            BootstrapConfig::default().dev_dependencies
        );
    }

    #[test]
    fn later_layer_wins() {
        let dir = TempDir::new().unwrap();
        let global = write(&dir, "global.toml", "[defaults]\noutput_dir = \"/g\"\n");
        let local = write(&dir, "local.toml", "[defaults]\noutput_dir = \"/l\"\n");

        let cfg = AppConfig::from_layers(&[(global, false), (local, false)], false).unwrap();
        assert_eq!(cfg.defaults.output_dir, PathBuf::from("/l"));
    }

    #[test]
    fn explicit_file_is_required() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = AppConfig::load(Some(&missing), false).unwrap_err();
        assert!(AppConfig::load(Some(&missing), true).is_ok());
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.toml", "[defaults\n");
        assert!(matches!(
            AppConfig::load_file(&path),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            display_value(&cfg.get("defaults.marker_file").unwrap()),
            "__init__.py"
        );
        assert_eq!(display_value(&cfg.get("output.no_color").unwrap()), "false");
        assert!(matches!(
            cfg.get("defaults.language"),
            Err(CliError::ConfigKeyNotFound { .. })
        ));
    }

    #[test]
    fn set_follows_existing_types() {
        let mut cfg = AppConfig::default();
        cfg.set("output.no_color", "true").unwrap();
        cfg.set("bootstrap.dev_dependencies", "ruff, mypy").unwrap();
        cfg.set("defaults.output_dir", "/srv/projects").unwrap();
        cfg.set("output.format", "json").unwrap();

        assert!(cfg.output.no_color);
        assert_eq!(cfg.bootstrap.dev_dependencies, vec!["ruff", "mypy"]);
        assert_eq!(cfg.defaults.output_dir, PathBuf::from("/srv/projects"));
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn set_rejects_bad_values_and_sections() {
        let mut cfg = AppConfig::default();
        assert!(matches!(
            cfg.set("output.no_color", "maybe"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(matches!(
            cfg.set("output.format", "xml"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(matches!(
            cfg.set("defaults", "x"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(matches!(
            cfg.set("nope.key", "x"),
            Err(CliError::ConfigKeyNotFound { .. })
        ));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.set("defaults.marker_file", "README.md").unwrap();
        cfg.save(&path).unwrap();

        assert_eq!(AppConfig::load_file(&path).unwrap(), cfg);
    }

    #[test]
    fn entries_are_dotted_leaves() {
        let keys: Vec<String> = AppConfig::default()
            .entries()
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert!(keys.contains(&"defaults.output_dir".to_string()));
        assert!(keys.contains(&"bootstrap.dev_dependencies".to_string()));
        assert!(!keys.contains(&"defaults".to_string()));
    }

    #[test]
    fn invalid_marker_in_config_is_configuration_error() {
        let mut cfg = AppConfig::default();
        cfg.defaults.marker_file = "a/b".into();
        assert_eq!(cfg.marker_file().unwrap_err().exit_code(), 4);
    }
}
