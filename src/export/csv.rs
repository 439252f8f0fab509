//! CSV出力
//!
//! 元の列をそのまま残し、末尾に `is_ny_local`（true/false）を追加する。

use crate::error::Result;
use ny_local_common::BatchResult;
use std::io::Write;
use std::path::Path;

pub fn write_csv(result: &BatchResult, output_path: &Path) -> Result<()> {
    super::ensure_parent_dir(output_path)?;
    let file = std::fs::File::create(output_path)?;
    write_csv_to(result, file)
}

/// 任意のライターへCSVを書き出す
pub fn write_csv_to<W: Write>(result: &BatchResult, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(result.output_headers())?;

    for row in &result.rows {
        let mut record: Vec<&str> = row
            .cells
            .iter()
            .map(|c| c.as_deref().unwrap_or(""))
            .collect();
        record.push(if row.is_ny_local { "true" } else { "false" });
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
