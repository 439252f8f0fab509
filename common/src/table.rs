//! 表データモジュール
//!
//! 参照表・アップロード表を「列名 + 行」の形で保持する。
//! セルは全てテキストとして扱い、欠損セルは `None`。

use crate::error::{Error, Result};
use crate::normalize::{is_product_header, normalize_header, HEADER_KEYWORDS, PREFERRED_COLUMNS};
use serde::{Deserialize, Serialize};

/// 列名付きの表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// 列名と行から表を作る
    ///
    /// 列数より短い行は `None` で埋める。長い行の扱いは読み込み側で検査すること
    /// （ここでは列数で切り詰める）。
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// 文字列スライスから表を作る（空文字は欠損セル扱い）
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }

    /// 元の列名
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 正規化済みの列名
    pub fn normalized_headers(&self) -> Vec<String> {
        self.headers.iter().map(|h| normalize_header(h)).collect()
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セル値を取得
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// 指定列の値を行順に返す
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(column).and_then(|c| c.as_deref()))
    }

    /// 商品列ヒューリスティックに該当する列のインデックス
    pub fn product_columns(&self) -> Vec<usize> {
        self.normalized_headers()
            .iter()
            .enumerate()
            .filter(|(_, h)| is_product_header(h))
            .map(|(i, _)| i)
            .collect()
    }
}

/// 照合対象列の選び方
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnSelector {
    /// 列名ヒューリスティックで自動検出
    #[default]
    AutoDetect,
    /// 列名を明示（大文字小文字・前後空白は無視）
    Explicit(String),
    /// 列インデックスで指定（0始まり）。正規化後に同名の列があっても区別できる
    Index(usize),
}

impl ColumnSelector {
    /// 表から列インデックスを解決する
    pub fn resolve(&self, table: &Table) -> Result<usize> {
        let headers = table.normalized_headers();

        let found = match self {
            ColumnSelector::Explicit(name) => {
                let wanted = normalize_header(name);
                headers.iter().position(|h| *h == wanted)
            }
            ColumnSelector::Index(index) => (*index < headers.len()).then_some(*index),
            ColumnSelector::AutoDetect => headers
                .iter()
                .position(|h| PREFERRED_COLUMNS.contains(&h.as_str()))
                .or_else(|| headers.iter().position(|h| is_product_header(h))),
        };

        found.ok_or_else(|| Error::ColumnNotFound {
            expected: self.expected_names(),
        })
    }

    /// エラー表示用の候補列名
    pub fn expected_names(&self) -> Vec<String> {
        match self {
            ColumnSelector::Explicit(name) => vec![normalize_header(name)],
            ColumnSelector::Index(index) => vec![format!("column #{}", index + 1)],
            ColumnSelector::AutoDetect => {
                let mut names: Vec<String> = Vec::new();
                for name in PREFERRED_COLUMNS.iter().chain(HEADER_KEYWORDS.iter()) {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
                names
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pads_short_rows() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![Some("1".into())]],
        );
        assert_eq!(table.cell(0, 0), Some("1"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn test_from_strs_empty_is_missing() {
        let table = Table::from_strs(&["Item"], &[&[""], &["corn"]]);
        assert_eq!(table.cell(0, 0), None);
        assert_eq!(table.cell(1, 0), Some("corn"));
    }

    #[test]
    fn test_auto_detect_prefers_exact_names() {
        let table = Table::from_strs(&["Item Code", " Description ", "Qty"], &[]);
        assert_eq!(ColumnSelector::AutoDetect.resolve(&table).unwrap(), 1);
    }

    #[test]
    fn test_auto_detect_falls_back_to_keyword() {
        let table = Table::from_strs(&["Vendor", "Product Title"], &[]);
        assert_eq!(ColumnSelector::AutoDetect.resolve(&table).unwrap(), 1);
    }

    #[test]
    fn test_auto_detect_not_found() {
        let table = Table::from_strs(&["Vendor", "Qty"], &[]);
        let err = ColumnSelector::AutoDetect.resolve(&table).unwrap_err();
        match err {
            Error::ColumnNotFound { expected } => {
                assert!(expected.contains(&"item description".to_string()));
                assert!(expected.contains(&"product".to_string()));
                assert_eq!(expected.iter().filter(|e| *e == "item").count(), 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_is_case_insensitive() {
        let table = Table::from_strs(&["Vendor", "Name"], &[]);
        let selector = ColumnSelector::Explicit("  NAME ".into());
        assert_eq!(selector.resolve(&table).unwrap(), 1);
    }

    #[test]
    fn test_explicit_missing_column() {
        let table = Table::from_strs(&["Vendor"], &[]);
        let selector = ColumnSelector::Explicit("Name".into());
        assert!(matches!(
            selector.resolve(&table),
            Err(Error::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_index_distinguishes_duplicate_headers() {
        let table = Table::from_strs(
            &["Description", "description "],
            &[&["Banana", "Sweet Corn"]],
        );
        assert_eq!(ColumnSelector::Explicit("description".into()).resolve(&table).unwrap(), 0);
        assert_eq!(ColumnSelector::Index(1).resolve(&table).unwrap(), 1);
    }

    #[test]
    fn test_index_out_of_range() {
        let table = Table::from_strs(&["Item"], &[]);
        match ColumnSelector::Index(3).resolve(&table).unwrap_err() {
            Error::ColumnNotFound { expected } => assert_eq!(expected, vec!["column #4"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_product_columns() {
        let table = Table::from_strs(&["Farm", "Products", "Item", "County"], &[]);
        assert_eq!(table.product_columns(), vec![1, 2]);
    }
}
