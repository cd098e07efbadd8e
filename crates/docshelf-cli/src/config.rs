//! Configuration for the Docshelf CLI.
//!
//! Provides the [`DocshelfConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `DOCSHELF_CONFIG` environment variable
//! 3. XDG default: `~/.config/docshelf/config.toml`
//! 4. Built-in defaults
//!
//! `DOCSHELF_<SECTION>_<KEY>` environment variables overlay file values.

use confyg::{Confygery, env};
use docshelf_content::DelimiterMode;
use docshelf_core::traits::ConfigProvider;
use docshelf_core::util::paths::resolve_against;
use docshelf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "DOCSHELF_CONFIG";

/// Prefix of environment overlay variables.
pub const ENV_PREFIX: &str = "DOCSHELF";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Docshelf CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocshelfConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path that relative paths are resolved against.
    pub base_path: Option<String>,

    /// Documentation source configuration.
    pub docs: DocsConfig,

    /// Static site output configuration.
    pub site: SiteConfig,
}

/// Documentation source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Directory holding the `*.md` files.
    pub root: String,

    /// How frontmatter delimiters are located.
    pub delimiter: DelimiterMode,
}

/// Static site output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory the `build` command writes to.
    pub output: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for DocshelfConfig {
    fn default() -> Self {
        Self {
            project_name: "docshelf".to_string(),
            base_path: None,
            docs: DocsConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root: "doc".to_string(),
            delimiter: DelimiterMode::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: "site".to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl DocshelfConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path` (from `--config` flag)
    /// 2. `DOCSHELF_CONFIG` env var
    /// 3. XDG default: `~/.config/docshelf/config.toml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("docs");
        env_opts.add_section("site");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_config_path_with(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("docshelf").join("config.toml"))
    }

    /// Directory the `build` command writes to, resolved against the base path.
    pub fn site_output(&self) -> Result<PathBuf> {
        Ok(resolve_against(&self.base_path()?, &self.site.output))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `DOCSHELF_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

fn resolve_config_path_with(explicit: Option<&str>, env_value: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Some(path) = env_value {
        return Some(PathBuf::from(path));
    }

    DocshelfConfig::default_config_path()
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for DocshelfConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(docshelf_core::util::paths::expand_path(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn docs_root(&self) -> Result<PathBuf> {
        Ok(resolve_against(&self.base_path()?, &self.docs.root))
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
