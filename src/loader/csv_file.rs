use super::clean_header;
use crate::error::Result;
use ny_local_common::{Error, Table};
use std::io::Read;
use std::path::Path;

/// CSVファイルを読み込む
pub fn read_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    read_csv_from_reader(file)
}

/// 任意のリーダーからCSVを読み込む（1行目は列名）
///
/// 列名より短い行は許容し、足りないセルは欠損扱い。
/// 列名より多くのフィールドを持つ行は `UploadParse` にする。
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::UploadParse(format!("unable to read CSV header: {}", e)))?
        .iter()
        .map(clean_header)
        .collect();

    if headers.is_empty() {
        return Err(Error::UploadParse("CSV has no header row".to_string()).into());
    }

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            Error::UploadParse(format!("unable to read CSV row {}: {}", line + 2, e))
        })?;
        if record.len() > headers.len() {
            return Err(Error::UploadParse(format!(
                "CSV row {} has {} fields but the header has {}",
                line + 2,
                record.len(),
                headers.len()
            ))
            .into());
        }
        let row = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}
