use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("参照リストが指定されていません。`ny-local config --add-reference FILE` または --reference で指定してください")]
    NoReferences,

    #[error(transparent)]
    Core(#[from] ny_local_common::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("列選択が中断されました")]
    SelectionCancelled,
}

pub type Result<T> = std::result::Result<T, CheckerError>;
