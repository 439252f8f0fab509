//! 語彙キャッシュモジュール
//!
//! 参照ファイルの内容・導出モード・列範囲の SHA-256 をキーにして
//! 構築済み語彙を保存し、同じ入力での再構築をスキップする。

use crate::error::Result;
use log::warn;
use ny_local_common::{BuildWarning, ColumnScope, MatchMode, Vocabulary};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = "vocabulary-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// キャッシュキー → 構築結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// 参照ファイルのパス
    pub sources: Vec<String>,
    /// 構築時の警告（キャッシュヒット時も再表示する）
    pub warnings: Vec<BuildWarning>,
    pub vocabulary: Vocabulary,
}

impl VocabularyCache {
    const CURRENT_VERSION: u32 = 1;

    /// 既定のキャッシュフォルダ
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("ny-local"))
    }

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（無い・壊れている場合は空）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, VocabularyCache>(reader) {
            Ok(cache) => {
                if cache.version != Self::CURRENT_VERSION {
                    warn!("vocabulary cache version mismatch, rebuilding");
                    return Self::default();
                }
                cache
            }
            Err(e) => {
                warn!("ignoring unreadable vocabulary cache {}: {}", cache_path.display(), e);
                Self::default()
            }
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（存在しなければ `false`）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VocabularyCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// キャッシュキーを計算する
///
/// 読めないファイルは "missing" としてキーに含める。
pub fn compute_cache_key(paths: &[PathBuf], mode: MatchMode, scope: ColumnScope) -> String {
    let mut hasher = Sha256::new();
    hasher.update(mode.as_str().as_bytes());
    hasher.update(b"\0");
    hasher.update(scope.to_string().as_bytes());

    for path in paths {
        hasher.update(b"\0");
        hasher.update(path.display().to_string().as_bytes());
        hasher.update(b"\0");
        match std::fs::read(path) {
            Ok(bytes) => {
                hasher.update((bytes.len() as u64).to_le_bytes());
                hasher.update(&bytes);
            }
            Err(_) => hasher.update(b"missing"),
        }
    }

    hex::encode(hasher.finalize())
}
