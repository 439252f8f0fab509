//! NY Local Common Library
//!
//! 参照語彙の構築・照合・バッチ集計（I/Oを含まない純粋なロジック）

pub mod error;
pub mod normalize;
pub mod table;
pub mod vocabulary;
pub mod matcher;
pub mod batch;

pub use error::{Error, Result};
pub use table::{ColumnSelector, Table};
pub use vocabulary::{
    build, BuildReport, BuildWarning, ColumnScope, InMemorySource, MatchMode, ReferenceSource,
    Vocabulary, VocabularyBuilder, WarningKind,
};
pub use matcher::{is_match, matched_term};
pub use batch::{evaluate_batch, AnnotatedRow, BatchResult, BatchSummary, RESULT_COLUMN};
