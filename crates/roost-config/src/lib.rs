//! Workspace configuration for Roost (`roost.toml`) and tracing setup.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::ReentrantMutex;
use roost_finder::{FinderOptions, DEFAULT_ALIAS};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod diagnostics;
mod schema;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use schema::json_schema;

pub const ROOST_CONFIG_ENV_VAR: &str = "ROOST_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RoostConfig {
    pub finder: FinderConfig,
    pub logging: LoggingConfig,
}

/// `[finder]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FinderConfig {
    /// Maximum number of fields combined in one generated finder name.
    #[schemars(range(min = 1))]
    pub depth: usize,

    /// Entity alias used in generated JPQL.
    pub alias: String,

    /// Also introduce `countFind...` methods next to each finder.
    pub count_queries: bool,

    /// Field names never used when generating finder names.
    pub exclude: Vec<String>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            alias: DEFAULT_ALIAS.to_owned(),
            count_queries: true,
            exclude: Vec::new(),
        }
    }
}

/// `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive
    /// string such as `roost.finder=trace,info`.
    pub level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            // Hand-written `roost.toml` files use any casing and `warning`.
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is passed through as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        // A malformed directive string must not silence logging entirely.
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective filter: the configured level with `RUST_LOG` merged on top.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        match env_directives {
            // Later directives win, so `RUST_LOG` refines the configured level. If
            // the combination does not parse, `RUST_LOG` alone is tried before
            // falling back to the configured level.
            Some(env_directives) => {
                let config_directives = Self::normalize_level_directives(&self.level);
                tracing_subscriber::EnvFilter::try_new(format!(
                    "{config_directives},{env_directives}"
                ))
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` includes a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl RoostConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_from_str(&read_config(path.as_ref())?)
    }

    /// Like [`RoostConfig::load_from_str`], also reporting unknown keys and
    /// values that [`RoostConfig::finder_options`] will replace.
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let mut unknown_keys = Vec::new();
        let deserializer = toml::Deserializer::new(text);
        let config: RoostConfig = serde_ignored::deserialize(deserializer, |path| {
            unknown_keys.push(path.to_string());
        })?;
        unknown_keys.sort();
        unknown_keys.dedup();

        let diagnostics = ConfigDiagnostics {
            unknown_keys,
            warnings: config.validate(),
        };
        Ok((config, diagnostics))
    }

    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        Self::load_from_str_with_diagnostics(&read_config(path.as_ref())?)
    }

    /// Semantic checks that deserialization cannot express.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.finder.depth == 0 {
            warnings.push(ConfigWarning::InvalidValue {
                toml_path: "finder.depth".to_owned(),
                message: "must be at least 1; using 1".to_owned(),
            });
        }
        if !is_java_identifier(&self.finder.alias) {
            warnings.push(ConfigWarning::InvalidValue {
                toml_path: "finder.alias".to_owned(),
                message: format!(
                    "`{}` is not a valid JPQL identifier; using `{DEFAULT_ALIAS}`",
                    self.finder.alias
                ),
            });
        }
        for (idx, name) in self.finder.exclude.iter().enumerate() {
            if name.trim().is_empty() {
                warnings.push(ConfigWarning::InvalidValue {
                    toml_path: format!("finder.exclude[{idx}]"),
                    message: "empty field name is ignored".to_owned(),
                });
            }
        }
        warnings
    }

    /// Options for the finder services, with invalid values replaced.
    pub fn finder_options(&self) -> FinderOptions {
        for warning in self.validate() {
            tracing::warn!(target: "roost.config", toml_path = warning.toml_path(), "{warning}");
        }

        let alias = if is_java_identifier(&self.finder.alias) {
            self.finder.alias.clone()
        } else {
            DEFAULT_ALIAS.to_owned()
        };
        let exclusions: BTreeSet<String> = self
            .finder
            .exclude
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();

        FinderOptions {
            depth: self.finder.depth.max(1),
            alias,
            count_queries: self.finder.count_queries,
            exclusions,
        }
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn is_java_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

// Reentrant so `with_config_env_lock` callers can run discovery, which
// takes the lock again, on the same thread.
static CONFIG_ENV_LOCK: OnceLock<ReentrantMutex<()>> = OnceLock::new();

fn config_env_lock() -> &'static ReentrantMutex<()> {
    CONFIG_ENV_LOCK.get_or_init(|| ReentrantMutex::new(()))
}

/// Runs `f` while holding the lock that config discovery takes.
///
/// Tests that set [`ROOST_CONFIG_ENV_VAR`] wrap the mutation and the
/// discovery call in this so other threads never observe the override.
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = config_env_lock().lock();
    f()
}

/// Finds the configuration file for a workspace root.
///
/// Search order:
/// 1) `ROOST_CONFIG_PATH` (absolute or relative to `workspace_root`)
/// 2) `roost.toml` in `workspace_root`
/// 3) `.roost.toml` in `workspace_root`
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    let _guard = config_env_lock().lock();
    if let Some(value) = std::env::var_os(ROOST_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        // An explicit path is returned even when missing so loading reports
        // the I/O error instead of silently using defaults.
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["roost.toml", ".roost.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Loads the configuration for a workspace root, falling back to defaults
/// when no file is found.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(RoostConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((RoostConfig::default(), None));
    };

    let config = RoostConfig::load_from_path(&path)?;
    tracing::debug!(target: "roost.config", path = %path.display(), "loaded config");
    Ok((config, Some(path)))
}

/// Installs the global fmt subscriber described by `config`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
