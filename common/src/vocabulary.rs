//! 参照語彙モジュール
//!
//! 参照表（NY Grown & Certified 等）から照合用の語彙を構築する。
//!
//! ## 導出モード
//! - token: 商品列のセルを単語に分割し、各単語を語彙にする
//! - cell: 全列のセル全体（正規化済み）を語彙にする
//!
//! 読み込みに失敗したソースは警告として記録し、構築自体は続行する。
//! 最終的に語彙が空なら `Error::EmptyVocabulary` を返す。

use crate::error::{Error, Result};
use crate::normalize::{normalize_text, tokens};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 照合ポリシー（語彙の導出方法と照合方法の組）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// 単語単位の完全一致
    #[default]
    Token,
    /// セル全体を語彙にし、部分文字列として含まれていれば一致
    Cell,
}

impl MatchMode {
    /// 呼び出し側に提示する照合ポリシーの説明
    pub fn policy_description(&self) -> &'static str {
        match self {
            MatchMode::Token => {
                "token: a row matches when any whole word of its description \
                 equals a word taken from the product columns of the reference lists"
            }
            MatchMode::Cell => {
                "cell: a row matches when any whole reference cell appears as a substring \
                 of its description; short reference entries cause false positives \
                 (\"apple\" matches \"pineapple juice\"), this is a known trade-off"
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Token => "token",
            MatchMode::Cell => "cell",
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token" | "word" => Ok(MatchMode::Token),
            "cell" | "substring" => Ok(MatchMode::Cell),
            _ => Err(format!("Unknown mode: {}. Use token or cell", s)),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// token モードで語彙に使う列の範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnScope {
    /// 列名に product / description / item を含む列のみ
    #[default]
    ProductColumns,
    /// 全列
    AllColumns,
}

impl fmt::Display for ColumnScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnScope::ProductColumns => write!(f, "product-columns"),
            ColumnScope::AllColumns => write!(f, "all-columns"),
        }
    }
}

/// 参照表の供給元
pub trait ReferenceSource {
    /// 警告表示用の名前
    fn name(&self) -> String;

    /// 表を読み込む
    fn load(&self) -> std::result::Result<Table, Box<dyn std::error::Error>>;
}

/// 読み込み済みの表をそのまま供給するソース
#[derive(Debug, Clone)]
pub struct InMemorySource {
    pub name: String,
    pub table: Table,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl ReferenceSource for InMemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> std::result::Result<Table, Box<dyn std::error::Error>> {
        Ok(self.table.clone())
    }
}

/// 構築時の警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildWarning {
    pub source: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// ファイル欠損・解析失敗
    LoadFailed(String),
    /// token モードで商品列が見つからない
    NoProductColumn { columns: Vec<String> },
    /// 読み込めたが語彙が一つも得られない
    NoTerms,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::LoadFailed(reason) => {
                write!(f, "failed to load reference list {}: {}", self.source, reason)
            }
            WarningKind::NoProductColumn { columns } => write!(
                f,
                "no product/description/item column in {} (columns: {})",
                self.source,
                columns.join(", ")
            ),
            WarningKind::NoTerms => write!(f, "reference list {} contributed no terms", self.source),
        }
    }
}

/// 照合用語彙（構築後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    mode: MatchMode,
    terms: BTreeSet<String>,
}

impl Vocabulary {
    /// 任意の語から語彙を作る（正規化し、空文字は除外）
    ///
    /// token モードでは複数語の入力を単語に分割して登録する。
    pub fn from_terms<I, S>(mode: MatchMode, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for term in terms {
            let normalized = normalize_text(term.as_ref());
            match mode {
                MatchMode::Token => set.extend(tokens(&normalized).map(|t| t.to_string())),
                MatchMode::Cell => {
                    if !normalized.is_empty() {
                        set.insert(normalized);
                    }
                }
            }
        }
        Self { mode, terms: set }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(|t| t.as_str())
    }

    /// 語をソート順に返す
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_str())
    }
}

/// 構築結果
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub vocabulary: Vocabulary,
    pub warnings: Vec<BuildWarning>,
}

/// 語彙ビルダー
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyBuilder {
    mode: MatchMode,
    scope: ColumnScope,
}

impl VocabularyBuilder {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            scope: ColumnScope::default(),
        }
    }

    pub fn scope(mut self, scope: ColumnScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn column_scope(&self) -> ColumnScope {
        self.scope
    }

    /// 全ソースから語彙を構築する
    pub fn build(&self, sources: &[&dyn ReferenceSource]) -> Result<BuildReport> {
        let mut terms = BTreeSet::new();
        let mut warnings = Vec::new();

        for source in sources {
            let name = source.name();
            let table = match source.load() {
                Ok(table) => table,
                Err(e) => {
                    warnings.push(BuildWarning {
                        source: name,
                        kind: WarningKind::LoadFailed(e.to_string()),
                    });
                    continue;
                }
            };

            match self.table_terms(&table) {
                Some(found) if found.is_empty() => warnings.push(BuildWarning {
                    source: name,
                    kind: WarningKind::NoTerms,
                }),
                Some(found) => terms.extend(found),
                None => warnings.push(BuildWarning {
                    source: name,
                    kind: WarningKind::NoProductColumn {
                        columns: table.normalized_headers(),
                    },
                }),
            }
        }

        if terms.is_empty() {
            return Err(Error::EmptyVocabulary {
                warnings: warnings.iter().map(|w| w.to_string()).collect(),
            });
        }

        Ok(BuildReport {
            vocabulary: Vocabulary {
                mode: self.mode,
                terms,
            },
            warnings,
        })
    }

    /// 1つの表から語を抽出する
    ///
    /// token モードかつ商品列が無い場合は `None`。
    pub fn table_terms(&self, table: &Table) -> Option<BTreeSet<String>> {
        let columns: Vec<usize> = match (self.mode, self.scope) {
            (MatchMode::Token, ColumnScope::ProductColumns) => {
                let found = table.product_columns();
                if found.is_empty() {
                    return None;
                }
                found
            }
            _ => (0..table.headers().len()).collect(),
        };

        let mut terms = BTreeSet::new();
        for &column in &columns {
            for value in table.column_values(column).flatten() {
                let normalized = normalize_text(value);
                match self.mode {
                    MatchMode::Token => {
                        terms.extend(tokens(&normalized).map(|t| t.to_string()));
                    }
                    MatchMode::Cell => {
                        if !normalized.is_empty() {
                            terms.insert(normalized);
                        }
                    }
                }
            }
        }
        Some(terms)
    }
}

/// `VocabularyBuilder::new(mode).build(sources)` の短縮形
pub fn build(sources: &[&dyn ReferenceSource], mode: MatchMode) -> Result<BuildReport> {
    VocabularyBuilder::new(mode).build(sources)
}
