//! Excel出力（rust_xlsxwriter）

use crate::error::{CheckerError, Result};
use ny_local_common::BatchResult;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

const SHEET_NAME: &str = "NY Local Check";

pub fn write_excel(result: &BatchResult, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| CheckerError::ExcelGeneration(format!("シート作成エラー: {}", e)))?;

    for (col, header) in result.output_headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| CheckerError::ExcelGeneration(format!("ヘッダー書き込みエラー: {}", e)))?;
    }

    let flag_col = result.headers.len() as u16;
    for (i, row) in result.rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;
        for (col, cell) in row.cells.iter().enumerate() {
            if let Some(value) = cell {
                worksheet
                    .write_string(excel_row, col as u16, value)
                    .map_err(|e| CheckerError::ExcelGeneration(format!("セル書き込みエラー: {}", e)))?;
            }
        }
        worksheet
            .write_boolean(excel_row, flag_col, row.is_ny_local)
            .map_err(|e| CheckerError::ExcelGeneration(format!("セル書き込みエラー: {}", e)))?;
    }

    super::ensure_parent_dir(output_path)?;
    workbook
        .save(output_path)
        .map_err(|e| CheckerError::ExcelGeneration(format!("保存エラー: {}", e)))?;

    Ok(())
}
