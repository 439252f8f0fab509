use crate::error::{CheckerError, Result};
use ny_local_common::{ColumnScope, MatchMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 参照リストを上書きする環境変数（パス区切り文字で連結）
pub const REFERENCES_ENV: &str = "NY_LOCAL_REFERENCES";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 参照リスト（NY Grown & Certified 等）
    pub references: Vec<PathBuf>,
    pub mode: MatchMode,
    pub column_scope: ColumnScope,
    /// 照合列を固定する場合の列名
    pub column: Option<String>,
    pub use_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CheckerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ny-local").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            references: vec![
                PathBuf::from("NY Grown & Certified-Grid view.csv"),
                PathBuf::from("Small Farms and Producers-Grid 2 (1).csv"),
            ],
            mode: MatchMode::Token,
            column_scope: ColumnScope::ProductColumns,
            column: None,
            use_cache: true,
        }
    }

    /// 参照リストを取得（環境変数を優先）
    pub fn reference_paths(&self) -> Vec<PathBuf> {
        if let Some(value) = std::env::var_os(REFERENCES_ENV) {
            let paths: Vec<PathBuf> = std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !paths.is_empty() {
                return paths;
            }
        }

        self.references.clone()
    }

    pub fn add_reference(&mut self, path: PathBuf) -> Result<()> {
        if !self.references.contains(&path) {
            self.references.push(path);
        }
        self.save()
    }

    pub fn clear_references(&mut self) -> Result<()> {
        self.references.clear();
        self.save()
    }

    pub fn set_mode(&mut self, mode: MatchMode) -> Result<()> {
        self.mode = mode;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.references.len(), 2);
        assert_eq!(config.mode, MatchMode::Token);
        assert!(config.use_cache);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            references: vec![PathBuf::from("refs/grown.csv")],
            mode: MatchMode::Cell,
            column: Some("Item Description".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.references, vec![PathBuf::from("refs/grown.csv")]);
        assert_eq!(loaded.mode, MatchMode::Cell);
        assert_eq!(loaded.column.as_deref(), Some("Item Description"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "mode": "cell" }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mode, MatchMode::Cell);
        assert_eq!(loaded.column_scope, ColumnScope::ProductColumns);
        assert_eq!(loaded.references.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CheckerError::JsonParse(_))
        ));
    }
}
