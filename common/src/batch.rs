//! バッチ集計モジュール
//!
//! アップロード表の全行を照合し、`is_ny_local` 列を追加した表と
//! 件数・割合を返す。行同士は独立で、出力は入力と同じ行順。

use crate::error::Result;
use crate::matcher::is_match;
use crate::table::{ColumnSelector, Table};
use crate::vocabulary::{MatchMode, Vocabulary};
use serde::Serialize;

/// 追加する判定列の名前
pub const RESULT_COLUMN: &str = "is_ny_local";

/// 判定済みの1行（元のセルは変更しない）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRow {
    pub cells: Vec<Option<String>>,
    pub is_ny_local: bool,
}

/// バッチ照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    /// 元の列名（判定列は含まない）
    pub headers: Vec<String>,
    pub rows: Vec<AnnotatedRow>,
    /// 照合に使った列のインデックス
    pub column_index: usize,
    pub mode: MatchMode,
    pub match_count: usize,
    pub total_count: usize,
}

/// 集計サマリ（表示・JSON出力用）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub match_count: usize,
    pub total_count: usize,
    pub percent: f64,
    pub column: String,
    pub mode: MatchMode,
}

impl BatchResult {
    /// 行ごとの判定結果から組み立てる
    ///
    /// `flags` は `table` の行順と同じ長さであること。
    pub fn from_flags(table: &Table, column_index: usize, mode: MatchMode, flags: Vec<bool>) -> Self {
        debug_assert_eq!(table.len(), flags.len());

        let rows: Vec<AnnotatedRow> = table
            .rows()
            .iter()
            .zip(flags)
            .map(|(cells, is_ny_local)| AnnotatedRow {
                cells: cells.clone(),
                is_ny_local,
            })
            .collect();
        let match_count = rows.iter().filter(|r| r.is_ny_local).count();

        Self {
            headers: table.headers().to_vec(),
            total_count: rows.len(),
            rows,
            column_index,
            mode,
            match_count,
        }
    }

    /// 照合列の元の名前
    pub fn column_name(&self) -> &str {
        self.headers
            .get(self.column_index)
            .map(|h| h.as_str())
            .unwrap_or_default()
    }

    /// 一致率（%、丸めなし）
    pub fn percent(&self) -> f64 {
        percent(self.match_count, self.total_count)
    }

    /// 表示用に小数第2位で丸めた一致率
    pub fn rounded_percent(&self) -> f64 {
        round2(self.percent())
    }

    /// 判定列を末尾に付けた列名
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        headers.push(RESULT_COLUMN.to_string());
        headers
    }

    /// 一致した行のみ
    pub fn matched_rows(&self) -> impl Iterator<Item = &AnnotatedRow> {
        self.rows.iter().filter(|r| r.is_ny_local)
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            match_count: self.match_count,
            total_count: self.total_count,
            percent: self.rounded_percent(),
            column: self.column_name().to_string(),
            mode: self.mode,
        }
    }
}

/// 表の全行を照合する
///
/// 列が解決できなければ `ColumnNotFound` を返し、部分的な結果は作らない。
pub fn evaluate_batch(
    table: &Table,
    selector: &ColumnSelector,
    vocabulary: &Vocabulary,
) -> Result<BatchResult> {
    let column_index = selector.resolve(table)?;
    let mode = vocabulary.mode();

    let flags = table
        .column_values(column_index)
        .map(|value| is_match(value, vocabulary, mode))
        .collect();

    Ok(BatchResult::from_flags(table, column_index, mode, flags))
}

/// 一致率を計算する（総数0なら0.0）
pub fn percent(match_count: usize, total_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    match_count as f64 / total_count as f64 * 100.0
}

/// 小数第2位で丸める
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
