//! NY LOCAL Product Checker
//!
//! 購入品リスト（CSV/Excel）を NY LOCAL 参照リストと照合し、
//! `is_ny_local` 列を付けて書き出す。

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod vocab;
pub mod matcher;
pub mod column_picker;
pub mod export;

pub use ny_local_common as common;
