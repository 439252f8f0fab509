use super::clean_header;
use crate::error::Result;
use calamine::{open_workbook_auto, Data, Reader};
use ny_local_common::{Error, Table};
use std::path::Path;

/// Excel/ODSの先頭シートを読み込む（1行目は列名）
pub fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::UploadParse(format!("unable to open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::UploadParse("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::UploadParse(format!("unable to read worksheet '{}': {}", sheet_name, e)))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| Error::UploadParse(format!("worksheet '{}' is empty", sheet_name)))?
        .iter()
        .map(|cell| clean_header(&cell_to_string(cell).unwrap_or_default()))
        .collect();

    let rows: Vec<Vec<Option<String>>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}
