//! 照合列の一覧表示・対話式選択モジュール

use crate::error::{CheckerError, Result};
use dialoguer::Select;
use ny_local_common::normalize::is_product_header;
use ny_local_common::{ColumnSelector, Table};

/// 列の情報
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub index: usize,
    pub original: String,
    pub normalized: String,
    /// 自動検出で選ばれる列か
    pub auto_detected: bool,
    /// 商品列ヒューリスティックに該当するか
    pub product_like: bool,
}

/// 表の列一覧を返す
pub fn describe_columns(table: &Table) -> Vec<ColumnInfo> {
    let detected = ColumnSelector::AutoDetect.resolve(table).ok();

    table
        .headers()
        .iter()
        .zip(table.normalized_headers())
        .enumerate()
        .map(|(index, (original, normalized))| ColumnInfo {
            index,
            original: original.clone(),
            product_like: is_product_header(&normalized),
            normalized,
            auto_detected: detected == Some(index),
        })
        .collect()
}

/// 選んだ列の selector（正規化後に同名の列があっても位置で区別する）
pub fn selector_for(column: &ColumnInfo) -> ColumnSelector {
    ColumnSelector::Index(column.index)
}

/// 対話式で照合列を選ぶ
///
/// 自動検出できた列を初期選択にする。Esc で中断。
pub fn select_column_interactive(table: &Table) -> Result<ColumnSelector> {
    let columns = describe_columns(table);
    if columns.is_empty() {
        return Err(ny_local_common::Error::ColumnNotFound {
            expected: ColumnSelector::AutoDetect.expected_names(),
        }
        .into());
    }

    let items: Vec<String> = columns
        .iter()
        .map(|c| {
            if c.auto_detected {
                format!("{} (auto-detected)", c.original)
            } else {
                c.original.clone()
            }
        })
        .collect();
    let default = columns.iter().position(|c| c.auto_detected).unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Select the item description column")
        .items(&items[..])
        .default(default)
        .interact_opt()
        .map_err(|e| CheckerError::Prompt(e.to_string()))?;

    match choice {
        Some(index) => {
            println!("→ {} を使用", columns[index].original);
            Ok(selector_for(&columns[index]))
        }
        None => Err(CheckerError::SelectionCancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_columns() {
        let table = Table::from_strs(&["Vendor", " Item Description", "Item Code"], &[]);
        let columns = describe_columns(&table);

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1].normalized, "item description");
        assert!(columns[1].auto_detected);
        assert!(!columns[2].auto_detected);
        assert!(columns[2].product_like);
        assert!(!columns[0].product_like);
    }

    #[test]
    fn test_selector_for_duplicate_header_keeps_position() {
        let table = Table::from_strs(
            &["Description", "description "],
            &[&["Banana", "Sweet Corn"]],
        );
        let columns = describe_columns(&table);
        let selector = selector_for(&columns[1]);

        assert_eq!(selector.resolve(&table).unwrap(), 1);
        assert_eq!(table.cell(0, selector.resolve(&table).unwrap()), Some("Sweet Corn"));
    }

    #[test]
    fn test_describe_columns_without_candidate() {
        let table = Table::from_strs(&["Vendor", "Qty"], &[]);
        assert!(describe_columns(&table).iter().all(|c| !c.auto_detected));
    }
}
