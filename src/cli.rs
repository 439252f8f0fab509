use clap::{Parser, Subcommand};
use ny_local_common::MatchMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ny-local")]
#[command(about = "NY LOCAL product checker: flags purchased items found in the NY local reference lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 参照リストと語彙の指定（check / vocab 共通）
#[derive(clap::Args, Debug, Clone, Default)]
pub struct VocabularyArgs {
    /// 参照リスト（複数指定可、省略時は設定ファイルの値）
    #[arg(short, long = "reference")]
    pub references: Vec<PathBuf>,

    /// 参照リストのフォルダ（直下の .csv/.xlsx を全て使う）
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,

    /// 照合モード (token/cell)
    #[arg(short, long)]
    pub mode: Option<MatchMode>,

    /// token モードで全列から語彙を作る（既定は商品列のみ）
    #[arg(long)]
    pub all_columns: bool,

    /// 語彙キャッシュを使わない
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アップロード表を照合して結果を出力
    Check {
        /// 照合する表（.csv/.xlsx）
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        vocabulary: VocabularyArgs,

        /// 照合列を明示（省略時は列名から自動検出）
        #[arg(short, long, conflicts_with = "pick_column")]
        column: Option<String>,

        /// 照合列を対話式で選ぶ
        #[arg(long)]
        pick_column: bool,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/xlsx/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 行を並列で照合する
        #[arg(long)]
        parallel: bool,

        /// 結果の先頭N行を表示
        #[arg(long, default_value = "10")]
        show_rows: usize,

        /// 集計サマリをJSONで保存
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// 参照語彙を構築して表示
    Vocab {
        #[command(flatten)]
        vocabulary: VocabularyArgs,

        /// 語彙を全て表示
        #[arg(long)]
        list: bool,
    },

    /// 表の列名と自動検出される照合列を表示
    Columns {
        /// 対象の表（.csv/.xlsx）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 参照リストを追加
        #[arg(long)]
        add_reference: Option<PathBuf>,

        /// 参照リストを全て削除
        #[arg(long)]
        clear_references: bool,

        /// 既定の照合モードを設定 (token/cell)
        #[arg(long)]
        set_mode: Option<MatchMode>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 語彙キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, xlsx, or both", s)),
        }
    }
}
