//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/quiztree/quiztree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `QUIZTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, DEFAULT_POINTS_PER_CORRECT};

/// Unified configuration for quiztree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Points awarded per correct answer (default: 10)
    pub points_per_correct: u32,
    /// Print each question's media reference while playing
    pub show_media: bool,
    /// Question feed file; the built-in album set when unset
    pub feed: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
            show_media: true,
            feed: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub points_per_correct: Option<u32>,
    pub show_media: Option<bool>,
    pub feed: Option<PathBuf>,
}

/// Get the XDG config directory for quiztree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quiztree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("quiztree.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// An unset variable is `None`; a set but unparsable one is an error.
fn env_value<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment override: {e}"),
        }),
    }
}

/// Expand `~`, `$VAR` and `${VAR}`; the input is kept when expansion fails.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e.message()),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            points_per_correct: overlay
                .points_per_correct
                .unwrap_or(self.points_per_correct),
            show_media: overlay.show_media.unwrap_or(self.show_media),
            feed: overlay.feed.clone().or_else(|| self.feed.clone()),
        }
    }

    fn expand_paths(&mut self) {
        if let Some(feed) = &self.feed {
            self.feed = Some(PathBuf::from(expand_env_vars(
                feed.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; unlike the
    ///   global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load from the given files, then apply `QUIZTREE_*` process environment overrides.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        Self::load_layers(global, explicit, None)
    }

    /// Like [`Settings::load_from`], but the override layer reads `vars`
    /// instead of the process environment.
    pub fn load_from_env<I>(
        global: Option<&Path>,
        explicit: Option<&Path>,
        vars: I,
    ) -> Result<Self, ApplicationError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::load_layers(global, explicit, Some(vars.into_iter().collect()))
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global {
            debug!(path = %path.display(), "loading global config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!(path = %path.display(), "loading explicit config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current, env)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply QUIZTREE_* environment variables as explicit overrides.
    ///
    /// `env` replaces the process environment when given. Unparsable values
    /// are config errors.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("QUIZTREE")
                    .prefix_separator("_")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get::<u32>("points_per_correct"))? {
            settings.points_per_correct = val;
        }
        if let Some(val) = env_value(config.get_bool("show_media"))? {
            settings.show_media = val;
        }
        if let Some(val) = env_value(config.get_string("feed"))? {
            settings.feed = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# quiztree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/quiztree/quiztree.toml
#   Explicit: quiztree --config <file>
#   Env:      QUIZTREE_* environment variables (e.g. QUIZTREE_POINTS_PER_CORRECT=5)

# Points awarded per correct answer
# points_per_correct = 10

# Print each question's media reference while playing
# show_media = true

# Question feed (TOML with [[questions]] tables); built-in album set if unset
# feed = "~/quiz/albums.toml"
"#
        .to_string()
    }
}
