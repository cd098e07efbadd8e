//! Handlers for `docshelf config {path,get,set,init,export}`.
//!
//! Each handler returns the lines it wants printed so the dispatcher owns
//! stdout. Values are addressed by dotted keys (`docs.root`).

use crate::cli::ConfigAction;
use crate::config::DocshelfConfig;
use docshelf_core::{Error, Result};
use std::path::{Path, PathBuf};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Takes the raw `--config` path rather than a loaded config, since `path`
/// and `init` must work before any file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let lines = match action {
        ConfigAction::Path => {
            let path = config_file(config_path)?;
            if !path.exists() {
                eprintln!("(no file yet; `docshelf config init` creates it)");
            }
            vec![path.display().to_string()]
        }
        ConfigAction::Get { key } => vec![config_get(config_path, &key)?],
        ConfigAction::Set { key, value } => {
            let path = config_set(config_path, &key, &value)?;
            vec![format!("{key} = {value} written to {}", path.display())]
        }
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(f) => PathBuf::from(f),
                None => DocshelfConfig::default_config_path()
                    .ok_or_else(|| Error::config("No config directory on this platform"))?,
            };
            config_init(&path, force)?;
            vec![format!("Wrote default configuration to {}", path.display())]
        }
        ConfigAction::Export { docker_env } => {
            config_export(&DocshelfConfig::load(config_path)?, docker_env)?
        }
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

// ============================================================================
// Command handlers
// ============================================================================

fn config_file(config_path: Option<&str>) -> Result<PathBuf> {
    DocshelfConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("No config directory on this platform"))
}

/// The effective value at `key`, after file, env and defaults are merged.
fn config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = DocshelfConfig::load(config_path)?;
    let tree = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    lookup(&tree, key)
        .map(display_value)
        .ok_or_else(|| Error::config(format!("Unknown configuration key '{key}'")))
}

/// Write `key = value` into the config file, returning the file's path.
fn config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<PathBuf> {
    let path = config_file(config_path)?;
    if !path.exists() {
        return Err(Error::config(format!(
            "{} does not exist; run `docshelf config init` first",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut tree: toml::Value = toml::from_str(&text)
        .map_err(|e| Error::config(format!("{} is not valid TOML: {e}", path.display())))?;

    set_checked(&mut tree, key, value)?;

    let out = toml::to_string_pretty(&tree).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, out).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Write the default configuration to `path`.
fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "{} already exists; pass --force to replace it",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io_with_path(e, dir))?;
    }
    let contents = DocshelfConfig::default().to_toml_string()?;
    std::fs::write(path, contents).map_err(|e| Error::io_with_path(e, path))
}

/// `KEY=value` lines, or `--env KEY=value` for `docker run`.
fn config_export(config: &DocshelfConfig, docker_env: bool) -> Result<Vec<String>> {
    let flag = if docker_env { "--env " } else { "" };
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{flag}{key}={value}"))
        .collect())
}

// ============================================================================
// Dotted-key helpers
// ============================================================================

fn lookup<'a>(tree: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(tree, |node, part| node.as_table()?.get(part))
}

/// Store `value` at `key`, creating missing tables on the way.
fn assign(tree: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config(format!("Malformed key '{key}'")));
    }

    let mut node = tree;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        node = node
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{key}' passes through a non-table value")))?
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    node.as_table_mut()
        .ok_or_else(|| Error::config(format!("'{key}' passes through a non-table value")))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Assign `key` and check that the tree still describes a [`DocshelfConfig`].
///
/// A value that only fits the schema as a string (`docs.root = 2024`) is
/// stored as a string.
fn set_checked(tree: &mut toml::Value, key: &str, value: &str) -> Result<()> {
    let mut candidate = tree.clone();
    assign(&mut candidate, key, infer_value(value))?;
    if fits_schema(&candidate).is_err() {
        candidate = tree.clone();
        assign(&mut candidate, key, toml::Value::String(value.to_string()))?;
        fits_schema(&candidate)
            .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    }
    *tree = candidate;
    Ok(())
}

fn fits_schema(tree: &toml::Value) -> std::result::Result<DocshelfConfig, toml::de::Error> {
    tree.clone().try_into()
}

/// Interpret a command-line value as a bool, integer, float, or string.
fn infer_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(raw.to_string())
    }
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) | toml::Value::Array(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_content::DelimiterMode;
    use tempfile::TempDir;

    /// A temp dir holding a default `config.toml`.
    fn default_file() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        config_init(&path, false).unwrap();
        (dir, path)
    }

    fn s(path: &Path) -> Option<&str> {
        path.to_str()
    }

    #[test]
    fn test_config_file_explicit() {
        let path = config_file(Some("/explicit/config.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/explicit/config.toml"));
    }

    #[test]
    fn test_config_get() {
        let (_dir, path) = default_file();
        assert_eq!(config_get(s(&path), "project_name").unwrap(), "docshelf");
        assert_eq!(config_get(s(&path), "docs.delimiter").unwrap(), "search");
        assert!(config_get(s(&path), "docs").unwrap().contains("root = \"doc\""));
    }

    #[test]
    fn test_config_get_unknown_key() {
        let (_dir, path) = default_file();
        let err = config_get(s(&path), "docs.colour").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_config_set_round_trips_through_load() {
        let (_dir, path) = default_file();

        config_set(s(&path), "project_name", "handbook").unwrap();
        config_set(s(&path), "docs.delimiter", "anchored").unwrap();

        let loaded = DocshelfConfig::load(s(&path)).unwrap();
        assert_eq!(loaded.project_name, "handbook");
        assert_eq!(loaded.docs.delimiter, DelimiterMode::Anchored);
    }

    #[test]
    fn test_config_set_rejects_invalid_value() {
        let (_dir, path) = default_file();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = config_set(s(&path), "docs.delimiter", "sideways").unwrap_err();

        assert!(err.to_string().contains("docs.delimiter"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_config_set_requires_existing_file() {
        let err = config_set(Some("/nonexistent/config.toml"), "project_name", "x").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_config_init_creates_parents_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docshelf").join("config.toml");

        config_init(&path, false).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[docs]"));
        assert!(written.contains("[site]"));

        let err = config_init(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        std::fs::write(&path, "stale").unwrap();
        config_init(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn test_config_export() {
        let config = DocshelfConfig::default();

        let plain = config_export(&config, false).unwrap();
        assert!(plain.contains(&"DOCSHELF_DOCS_ROOT=doc".to_string()));

        let docker = config_export(&config, true).unwrap();
        assert!(docker.iter().all(|l| l.starts_with("--env DOCSHELF_")));
        assert_eq!(docker.len(), plain.len());
    }

    #[test]
    fn test_lookup_and_assign() {
        let mut tree = toml::Value::Table(toml::map::Map::new());

        assign(&mut tree, "site.output", toml::Value::String("public".into())).unwrap();
        assign(&mut tree, "project_name", toml::Value::String("x".into())).unwrap();

        assert_eq!(
            lookup(&tree, "site.output"),
            Some(&toml::Value::String("public".into()))
        );
        assert!(lookup(&tree, "site.missing").is_none());
        assert!(lookup(&tree, "project_name.deeper").is_none());
    }

    #[test]
    fn test_assign_through_scalar_fails() {
        let mut tree: toml::Value = toml::from_str("project_name = \"x\"").unwrap();
        assert!(assign(&mut tree, "project_name.inner", toml::Value::Integer(1)).is_err());
        assert!(assign(&mut tree, "docs.", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_set_checked_keeps_numeric_looking_strings() {
        let mut tree = toml::Value::try_from(DocshelfConfig::default()).unwrap();
        set_checked(&mut tree, "docs.root", "2024").unwrap();
        assert_eq!(
            lookup(&tree, "docs.root"),
            Some(&toml::Value::String("2024".into()))
        );
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value("true"), toml::Value::Boolean(true));
        assert_eq!(infer_value("-7"), toml::Value::Integer(-7));
        assert_eq!(infer_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(infer_value("doc"), toml::Value::String("doc".into()));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&toml::Value::String("doc".into())), "doc");
        assert_eq!(display_value(&toml::Value::Integer(3)), "3");
        assert_eq!(display_value(&toml::Value::Boolean(false)), "false");
    }
}
