//! 参照リスト読み込み・語彙構築モジュール
//!
//! ファイルパスを `ReferenceSource` として扱い、共通ライブラリの
//! `VocabularyBuilder` で語彙を構築する。`cache_dir` を渡すと
//! 参照ファイルの内容ハッシュをキーに結果を再利用する。

pub mod cache;

pub use cache::{compute_cache_key, CacheEntry, VocabularyCache};

use crate::error::{CheckerError, Result};
use crate::loader;
use log::{debug, info, warn};
use ny_local_common::{BuildReport, ReferenceSource, Table, VocabularyBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ファイルから読み込む参照リスト
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> std::result::Result<Table, Box<dyn std::error::Error>> {
        Ok(loader::load_table(&self.path)?)
    }
}

/// フォルダ直下の参照リスト（CSV/Excel）を名前順で列挙
pub fn scan_reference_dir(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(CheckerError::FolderNotFound(folder.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && loader::is_table_file(p))
        .collect();

    paths.sort();
    Ok(paths)
}

/// 使用する参照リストを決める
///
/// 明示指定（`--reference` と `--reference-dir`）があればそれだけを使い、
/// 無ければ設定ファイル（環境変数）の値を使う。
pub fn resolve_reference_paths(
    explicit: &[PathBuf],
    reference_dir: Option<&Path>,
    configured: Vec<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let mut paths = explicit.to_vec();
    if let Some(dir) = reference_dir {
        paths.extend(scan_reference_dir(dir)?);
    }

    if paths.is_empty() {
        return Ok(configured);
    }
    Ok(paths)
}

/// 語彙構築の結果
#[derive(Debug, Clone)]
pub struct VocabularyOutcome {
    pub report: BuildReport,
    /// キャッシュから取得したか
    pub from_cache: bool,
}

impl VocabularyOutcome {
    /// 利用者に表示する警告行
    pub fn warning_lines(&self) -> Vec<String> {
        self.report
            .warnings
            .iter()
            .map(|w| format!("⚠ {}", w))
            .collect()
    }
}

/// 参照ファイル群から語彙を構築する
///
/// - `cache_dir` が `Some` ならキャッシュを参照・更新する
/// - 空語彙はキャッシュしない（`EmptyVocabulary` をそのまま返す）
/// - キャッシュの保存失敗は警告のみで、構築結果は返す
pub fn build_vocabulary(
    paths: &[PathBuf],
    builder: VocabularyBuilder,
    cache_dir: Option<&Path>,
) -> Result<VocabularyOutcome> {
    if paths.is_empty() {
        return Err(CheckerError::NoReferences);
    }

    let key = compute_cache_key(paths, builder.mode(), builder.column_scope());
    let mut cache = cache_dir.map(VocabularyCache::load);

    if let Some(cache) = &cache {
        if let Some(entry) = cache.get(&key) {
            debug!("vocabulary cache hit: {}", key);
            return Ok(VocabularyOutcome {
                report: BuildReport {
                    vocabulary: entry.vocabulary.clone(),
                    warnings: entry.warnings.clone(),
                },
                from_cache: true,
            });
        }
        debug!("vocabulary cache miss: {}", key);
    }

    let sources: Vec<FileSource> = paths.iter().map(FileSource::new).collect();
    let dyn_sources: Vec<&dyn ReferenceSource> =
        sources.iter().map(|s| s as &dyn ReferenceSource).collect();
    let report = builder.build(&dyn_sources)?;

    info!(
        "built {} vocabulary with {} entries from {} reference list(s)",
        builder.mode(),
        report.vocabulary.len(),
        paths.len()
    );

    if let (Some(cache), Some(dir)) = (cache.as_mut(), cache_dir) {
        cache.insert(
            key,
            CacheEntry {
                sources: paths.iter().map(|p| p.display().to_string()).collect(),
                warnings: report.warnings.clone(),
                vocabulary: report.vocabulary.clone(),
            },
        );
        if let Err(e) = cache.save(dir) {
            warn!("failed to save vocabulary cache to {}: {}", dir.display(), e);
        }
    }

    Ok(VocabularyOutcome {
        report,
        from_cache: false,
    })
}
