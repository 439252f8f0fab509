pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use ny_local_common::BatchResult;
use std::path::{Path, PathBuf};

/// 既定の出力ファイル名（拡張子なし）
pub const DEFAULT_STEM: &str = "ny_local_fuzzy_checked";

/// 出力先の親フォルダが無ければ作る
pub(crate) fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_STEM, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let csv_path = output.join(format!("{}.csv", DEFAULT_STEM));
        let excel_path = output.join(format!("{}.xlsx", DEFAULT_STEM));
        (csv_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_STEM);
        let csv_path = parent.join(format!("{}.csv", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (csv_path, excel_path)
    }
}

/// 判定結果を書き出し、作成したファイルのパスを返す
pub fn export_result(result: &BatchResult, format: &ExportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    let written = match format {
        ExportFormat::Csv => {
            let output_path = output_path_for_format(output, "csv");
            csv::write_csv(result, &output_path)?;
            vec![output_path]
        }
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, "xlsx");
            excel::write_excel(result, &output_path)?;
            vec![output_path]
        }
        ExportFormat::Both => {
            let (csv_path, excel_path) = output_paths_for_both(output);
            csv::write_csv(result, &csv_path)?;
            excel::write_excel(result, &excel_path)?;
            vec![csv_path, excel_path]
        }
    };

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path_for_format(dir.path(), "csv");
        assert_eq!(path, dir.path().join("ny_local_fuzzy_checked.csv"));
    }

    #[test]
    fn test_output_path_keeps_file_name() {
        let path = output_path_for_format(Path::new("out/result.csv"), "csv");
        assert_eq!(path, PathBuf::from("out/result.csv"));
    }

    #[test]
    fn test_output_paths_for_both_share_stem() {
        let (csv_path, excel_path) = output_paths_for_both(Path::new("out/march.csv"));
        assert_eq!(csv_path, PathBuf::from("out/march.csv"));
        assert_eq!(excel_path, PathBuf::from("out/march.xlsx"));
    }
}
