//! 表読み込みモジュール
//!
//! 拡張子に応じて CSV（csv クレート）または Excel（calamine）を
//! `Table` に変換する。解析に失敗した場合は `UploadParse`。

mod csv_file;
mod workbook;

pub use csv_file::{read_csv, read_csv_from_reader};
pub use workbook::read_workbook;

use crate::error::{CheckerError, Result};
use ny_local_common::{Error, Table};
use std::path::Path;

const CSV_EXTENSIONS: &[&str] = &["csv"];
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 読み込み可能な表ファイルか（拡張子で判定）
pub fn is_table_file(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| CSV_EXTENSIONS.contains(&ext.as_str()) || WORKBOOK_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// 表ファイルを読み込む
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(CheckerError::FileNotFound(path.display().to_string()));
    }

    match extension_of(path) {
        Some(ext) if CSV_EXTENSIONS.contains(&ext.as_str()) => read_csv(path),
        Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) => read_workbook(path),
        Some(ext) => Err(Error::UploadParse(format!(
            "unsupported file type: .{} (use .csv or .xlsx)",
            ext
        ))
        .into()),
        None => Err(Error::UploadParse(format!(
            "missing file extension: {}",
            path.display()
        ))
        .into()),
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// 列名の先頭に付いた BOM と前後の空白を除く
fn clean_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_table_file() {
        assert!(is_table_file(Path::new("list.csv")));
        assert!(is_table_file(Path::new("List.XLSX")));
        assert!(!is_table_file(Path::new("notes.txt")));
        assert!(!is_table_file(Path::new("README")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_table(&PathBuf::from("/nonexistent/upload.csv"));
        assert!(matches!(result, Err(CheckerError::FileNotFound(_))));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.txt");
        std::fs::write(&path, "item\napple\n").unwrap();

        let result = load_table(&path);
        assert!(matches!(
            result,
            Err(CheckerError::Core(Error::UploadParse(_)))
        ));
    }

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("\u{feff}Item "), "Item");
    }
}
