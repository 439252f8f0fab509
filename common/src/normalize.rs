//! テキスト正規化モジュール
//!
//! 参照表のセルと照合対象の値を同じ規則で正規化する:
//! 小文字化、前後の空白除去、連続する空白の1文字への圧縮。

use regex::Regex;

/// 列名ヒューリスティックで使う部分文字列
pub const HEADER_KEYWORDS: &[&str] = &["product", "description", "item"];

/// 自動検出で完全一致を優先する列名
pub const PREFERRED_COLUMNS: &[&str] = &[
    "item description",
    "description",
    "product name",
    "product",
    "item",
];

lazy_static::lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// セル文字列を正規化する
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    WHITESPACE_RE.replace_all(&lowered, " ").into_owned()
}

/// 列名を正規化する（セルと同じ規則）
pub fn normalize_header(header: &str) -> String {
    normalize_text(header)
}

/// 正規化済みテキストを単語に分割する（空トークンは含まない）
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

/// 列名が商品列ヒューリスティックに該当するか
pub fn is_product_header(normalized_header: &str) -> bool {
    HEADER_KEYWORDS
        .iter()
        .any(|keyword| normalized_header.contains(keyword))
}
