//! Configuration for the catalog file and collection sizes.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (`--file`)
//! 2. Config file (.shelfmark/config.yaml)
//! 3. Defaults (./titles.txt, 50 live / 25 restored)
//!
//! Config file discovery:
//! - Searches current directory and parents for .shelfmark/config.yaml
//! - Paths in config file are relative to the directory holding .shelfmark/

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Capacity;

/// Default catalog file name
pub const DEFAULT_CATALOG_FILE: &str = "titles.txt";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (relative to the project root)
    pub file: Option<String>,
    pub title_capacity: Option<usize>,
    pub restored_capacity: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Path to the pipe-delimited catalog file
    pub catalog_file: PathBuf,
    /// Collection size limits
    pub capacity: Capacity,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Catalog file to use, preferring an explicit override
    pub fn catalog_file_or(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.catalog_file.clone())
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".shelfmark").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Load configuration, searching for a config file from `start` upward
fn load_config_from(start: &Path) -> Result<ResolvedConfig> {
    let config_file = find_config_file(start);

    let Some(config_path) = config_file else {
        return Ok(ResolvedConfig {
            catalog_file: start.join(DEFAULT_CATALOG_FILE),
            capacity: Capacity::default(),
            config_file: None,
        });
    };

    let config = load_config_file(&config_path)?;

    // Base directory is the parent of .shelfmark/ (i.e., grandparent of config.yaml)
    let base_dir = config_path
        .parent()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));

    let catalog_file = resolve_path(
        base_dir,
        config.catalog.file.as_deref().unwrap_or(DEFAULT_CATALOG_FILE),
    );

    let defaults = Capacity::default();
    let capacity = Capacity {
        titles: config.catalog.title_capacity.unwrap_or(defaults.titles),
        restored: config.catalog.restored_capacity.unwrap_or(defaults.restored),
    };

    Ok(ResolvedConfig {
        catalog_file,
        capacity,
        config_file: Some(config_path),
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    load_config_from(&cwd)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(".shelfmark");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", body).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(temp.path()).unwrap();

        assert_eq!(config.catalog_file, temp.path().join("titles.txt"));
        assert_eq!(config.capacity, Capacity::default());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
version: "1.0"
catalog:
  file: data/library.txt
  title_capacity: 100
"#,
        );

        let parsed = load_config_file(&path).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.catalog.file, Some("data/library.txt".to_string()));
        assert_eq!(parsed.catalog.title_capacity, Some(100));
        assert_eq!(parsed.catalog.restored_capacity, None);
    }

    #[test]
    fn test_config_discovered_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
version: "1.0"
catalog:
  file: data/library.txt
  restored_capacity: 5
"#,
        );
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(&nested).unwrap();

        assert_eq!(config.catalog_file, temp.path().join("data/library.txt"));
        assert_eq!(config.capacity.titles, 50);
        assert_eq!(config.capacity.restored, 5);
        assert!(config.config_file.is_some());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "catalog: [not, a, map]");

        assert!(load_config_from(temp.path()).is_err());
    }

    #[test]
    fn test_catalog_file_override() {
        let config = ResolvedConfig {
            catalog_file: PathBuf::from("/srv/titles.txt"),
            capacity: Capacity::default(),
            config_file: None,
        };

        assert_eq!(
            config.catalog_file_or(None),
            PathBuf::from("/srv/titles.txt")
        );
        assert_eq!(
            config.catalog_file_or(Some(Path::new("other.txt"))),
            PathBuf::from("other.txt")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "titles.txt"),
            PathBuf::from("/home/user/project/titles.txt")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/titles.txt"),
            PathBuf::from("/absolute/titles.txt")
        );
    }
}
