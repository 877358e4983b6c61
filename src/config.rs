//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avltree/avltree.toml`
//! 3. Local config: `--config <path>`, or `./.avltree.toml` when present
//! 4. Environment variables: `AVLTREE_*` prefix
//!
//! Command line flags are applied on top of the loaded settings by the CLI layer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, Value, ValueKind};
use serde::de::DeserializeOwned;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "AVLTREE";

/// File name looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILE: &str = ".avltree.toml";

/// How tree changes are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Box-drawing diagram of the whole tree
    #[default]
    Tree,
    /// Values in ascending order on one line
    Inorder,
    /// Render nothing
    #[serde(rename = "none")]
    #[value(name = "none")]
    Quiet,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStyle::Tree => "tree",
            RenderStyle::Inorder => "inorder",
            RenderStyle::Quiet => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for RenderStyle {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(RenderStyle::Tree),
            "inorder" => Ok(RenderStyle::Inorder),
            "none" => Ok(RenderStyle::Quiet),
            other => Err(ApplicationError::Config {
                message: format!("unknown render style '{other}' (tree, inorder, none)"),
            }),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: Option<RenderStyle>,
    pub show_height: Option<bool>,
    pub redraw_noops: Option<bool>,
    pub prompt: Option<String>,
    pub seed: Option<Vec<i64>>,
}

/// Unified configuration for avltree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Rendering after each change (default: tree)
    pub render: RenderStyle,
    /// Annotate nodes with height and balance factor
    pub show_height: bool,
    /// Redraw even when a call left the tree unchanged
    pub redraw_noops: bool,
    /// REPL prompt
    pub prompt: String,
    /// Values inserted when a session starts
    pub seed: Vec<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderStyle::default(),
            show_height: false,
            redraw_noops: false,
            prompt: "avl> ".into(),
            seed: Vec::new(),
        }
    }
}

/// Get the XDG config directory for avltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avltree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: overlay.render.unwrap_or(self.render),
            show_height: overlay.show_height.unwrap_or(self.show_height),
            redraw_noops: overlay.redraw_noops.unwrap_or(self.redraw_noops),
            prompt: overlay
                .prompt
                .clone()
                .unwrap_or_else(|| self.prompt.clone()),
            seed: overlay.seed.clone().unwrap_or_else(|| self.seed.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `local` path must exist; without one `./.avltree.toml` is used
    /// if present.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let local = match local {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(LOCAL_CONFIG_FILE)).filter(|p| p.exists()),
        };
        let global = global_config_path().filter(|p| p.exists());

        Self::load_layers(
            global.as_deref(),
            local.as_deref(),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Layered load with every source given explicitly.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            debug!("loading global config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config
        if let Some(path) = local {
            debug!("loading local config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current, env)
    }

    /// Apply AVLTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("seed")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        // Set but malformed is an error, unset keeps the lower layers
        if let Some(val) = lookup::<String>(&config, "render")? {
            settings.render = val.parse()?;
        }
        if let Some(val) = lookup::<bool>(&config, "show_height")? {
            settings.show_height = val;
        }
        if let Some(val) = lookup::<bool>(&config, "redraw_noops")? {
            settings.redraw_noops = val;
        }
        if let Some(val) = lookup::<String>(&config, "prompt")? {
            settings.prompt = val;
        }
        if let Some(val) = lookup::<Value>(&config, "seed")? {
            settings.seed = parse_seed(val)?;
        }

        Ok(settings)
    }

    /// Serialize settings to TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize: {}", e),
        })
    }

    /// Commented template for a new config file.
    pub fn template() -> String {
        r#"# avltree configuration
# Global: $XDG_CONFIG_HOME/avltree/avltree.toml
# Local:  ./.avltree.toml (or --config <path>)

# Rendering after each change: "tree", "inorder" or "none"
render = "tree"

# Show (h=height, b=balance) next to each node
show_height = false

# Redraw after calls that left the tree unchanged
redraw_noops = false

# REPL prompt
prompt = "avl> "

# Values inserted at session start
seed = []
"#
        .to_string()
    }
}

/// `None` when `key` is not set; a value that is set but malformed is an error.
fn lookup<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("{}_{}: {}", ENV_PREFIX, key.to_ascii_uppercase(), e),
        }),
    }
}

/// Comma-separated integers; a single number arrives already parsed as a scalar.
/// An empty value clears the seed.
fn parse_seed(value: Value) -> Result<Vec<i64>, ApplicationError> {
    let raw: Vec<String> = match value.kind {
        ValueKind::I64(v) => return Ok(vec![v]),
        ValueKind::String(s) => s.split(',').map(str::to_string).collect(),
        ValueKind::Array(items) => items
            .into_iter()
            .map(Value::into_string)
            .collect::<Result<_, _>>()
            .map_err(config_err)?,
        other => vec![other.to_string()],
    };
    if raw.iter().all(|s| s.trim().is_empty()) {
        return Ok(Vec::new());
    }
    raw.iter()
        .map(|s| {
            s.trim().parse::<i64>().map_err(|e| ApplicationError::Config {
                message: format!("{ENV_PREFIX}_SEED: invalid value '{}': {}", s.trim(), e),
            })
        })
        .collect()
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_layers(None, None, env_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.render, RenderStyle::Tree);
        assert_eq!(settings.prompt, "avl> ");
    }

    #[test]
    fn given_env_overrides_when_loading_then_env_wins() {
        let env = env_from(&[
            ("AVLTREE_RENDER", "inorder"),
            ("AVLTREE_SHOW_HEIGHT", "true"),
            ("AVLTREE_SEED", "3,1,2"),
        ]);
        let settings = Settings::load_layers(None, None, env).unwrap();
        assert_eq!(settings.render, RenderStyle::Inorder);
        assert!(settings.show_height);
        assert_eq!(settings.seed, vec![3, 1, 2]);
        assert!(!settings.redraw_noops);
    }

    #[test]
    fn given_bad_render_env_when_loading_then_config_error() {
        let env = env_from(&[("AVLTREE_RENDER", "sideways")]);
        let err = Settings::load_layers(None, None, env).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_partial_overlay_when_merge_then_unspecified_fields_kept() {
        let base = Settings {
            show_height: true,
            seed: vec![1],
            ..Settings::default()
        };
        let overlay = RawSettings {
            render: Some(RenderStyle::Quiet),
            ..RawSettings::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.render, RenderStyle::Quiet);
        assert!(merged.show_height);
        assert_eq!(merged.seed, vec![1]);
    }

    #[test]
    fn given_render_names_when_parsed_then_round_trip_display() {
        for style in [RenderStyle::Tree, RenderStyle::Inorder, RenderStyle::Quiet] {
            assert_eq!(style.to_string().parse::<RenderStyle>().unwrap(), style);
        }
        assert!("diagonal".parse::<RenderStyle>().is_err());
    }

    #[test]
    fn given_template_when_parsed_then_equals_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
