//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 全ての参照ソースが失敗、または語彙が一つも得られなかった
    #[error(
        "reference vocabulary is empty ({} warning(s)); refusing to match{}",
        .warnings.len(),
        format_warnings(.warnings)
    )]
    EmptyVocabulary { warnings: Vec<String> },

    /// 照合対象の列が解決できない
    #[error("could not find a column for item descriptions. Expected one of: {}", .expected.join(", "))]
    ColumnNotFound { expected: Vec<String> },

    /// アップロードされた表を解析できない
    #[error("failed to parse uploaded table: {0}")]
    UploadParse(String),
}

fn format_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        String::new()
    } else {
        format!(": {}", warnings.join("; "))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
