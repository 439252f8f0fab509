//! 並列バッチ照合
//!
//! 行ごとの判定は互いに独立なので rayon で分割し、
//! `collect` で入力と同じ行順に戻す。

use ny_local_common::{is_match, BatchResult, ColumnSelector, Result, Table, Vocabulary};
use rayon::prelude::*;

/// `ny_local_common::evaluate_batch` の並列版（結果は同一）
pub fn evaluate_batch_parallel(
    table: &Table,
    selector: &ColumnSelector,
    vocabulary: &Vocabulary,
) -> Result<BatchResult> {
    let column_index = selector.resolve(table)?;
    let mode = vocabulary.mode();

    let flags: Vec<bool> = table
        .rows()
        .par_iter()
        .map(|row| {
            let value = row.get(column_index).and_then(|c| c.as_deref());
            is_match(value, vocabulary, mode)
        })
        .collect();

    Ok(BatchResult::from_flags(table, column_index, mode, flags))
}
