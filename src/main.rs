use clap::Parser;
use log::{debug, warn};
use ny_local_checker::{cli, column_picker, config, error, export, loader, matcher, vocab};
use ny_local_common::{evaluate_batch, BatchResult, ColumnScope, ColumnSelector, VocabularyBuilder};
use cli::{Cli, Commands, VocabularyArgs};
use config::Config;
use error::Result;
use std::path::PathBuf;
use vocab::{VocabularyCache, VocabularyOutcome};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Check {
            input,
            vocabulary,
            column,
            pick_column,
            output,
            format,
            parallel,
            show_rows,
            summary_json,
        } => {
            println!("🗽 ny-local - NY LOCAL Product Checker\n");

            // 1. 参照語彙
            println!("[1/4] 参照リストから語彙を構築中...");
            let outcome = build_vocabulary(&vocabulary, &config)?;
            let vocabulary = &outcome.report.vocabulary;
            println!(
                "✔ 語彙 {}件 ({}){}\n",
                vocabulary.len(),
                vocabulary.mode(),
                if outcome.from_cache { " (キャッシュ)" } else { "" }
            );

            // 2. アップロード表
            println!("[2/4] 表を読み込み中...");
            let table = loader::load_table(&input)?;
            println!("✔ {}行を読み込み", table.len());
            println!("  Cleaned columns: {:?}\n", table.normalized_headers());

            // 3. 照合
            println!("[3/4] 照合中...");
            let selector = if pick_column {
                column_picker::select_column_interactive(&table)?
            } else {
                match column.or_else(|| config.column.clone()) {
                    Some(name) => ColumnSelector::Explicit(name),
                    None => ColumnSelector::AutoDetect,
                }
            };
            debug!("column selector: {:?}", selector);

            let result = if parallel {
                matcher::evaluate_batch_parallel(&table, &selector, vocabulary)?
            } else {
                evaluate_batch(&table, &selector, vocabulary)?
            };
            println!("✔ Using column: '{}'", result.column_name());
            println!("  Policy: {}\n", result.mode.policy_description());
            print_result(&result, show_rows);

            // 4. 出力
            println!("\n[4/4] 結果を保存中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            for path in export::export_result(&result, &format, &output_dir)? {
                println!("✔ 出力: {}", path.display());
            }

            if let Some(summary_path) = summary_json {
                let json = serde_json::to_string_pretty(&result.summary())?;
                std::fs::write(&summary_path, json)?;
                println!("✔ サマリ: {}", summary_path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Vocab { vocabulary, list } => {
            let outcome = build_vocabulary(&vocabulary, &config)?;
            let vocabulary = &outcome.report.vocabulary;

            println!("語彙:");
            println!("  モード: {}", vocabulary.mode());
            println!("  件数: {}", vocabulary.len());
            println!("  キャッシュ: {}", if outcome.from_cache { "ヒット" } else { "なし" });
            println!("  ポリシー: {}", vocabulary.mode().policy_description());

            if list {
                println!();
                for term in vocabulary.iter() {
                    println!("{}", term);
                }
            }
        }

        Commands::Columns { input } => {
            let table = loader::load_table(&input)?;
            println!("列一覧: {}", input.display());
            for info in column_picker::describe_columns(&table) {
                let marker = if info.auto_detected {
                    " ← auto-detected"
                } else if info.product_like {
                    " (candidate)"
                } else {
                    ""
                };
                println!("  {}) {} [{}]{}", info.index + 1, info.original, info.normalized, marker);
            }
            if ColumnSelector::AutoDetect.resolve(&table).is_err() {
                println!("⚠ 自動検出できる列がありません。--column または --pick-column で指定してください");
            }
        }

        Commands::Config { add_reference, clear_references, set_mode, show } => {
            let mut config = config;

            if clear_references {
                config.clear_references()?;
                println!("✔ 参照リストを削除しました");
            }

            if let Some(path) = add_reference {
                let display = path.display().to_string();
                config.add_reference(path)?;
                println!("✔ 参照リストを追加しました: {}", display);
            }

            if let Some(mode) = set_mode {
                config.set_mode(mode)?;
                println!("✔ 照合モードを設定しました: {}", mode);
            }

            if show {
                println!("設定:");
                println!("  参照リスト:");
                for path in config.reference_paths() {
                    let state = if path.exists() { "" } else { " (見つかりません)" };
                    println!("    - {}{}", path.display(), state);
                }
                println!("  照合モード: {}", config.mode);
                println!("  語彙の列範囲: {}", config.column_scope);
                println!("  照合列: {}", config.column.as_deref().unwrap_or("自動検出"));
                println!("  キャッシュ: {}", if config.use_cache { "有効" } else { "無効" });
            }
        }

        Commands::Cache { clear, info } => {
            let Some(cache_dir) = VocabularyCache::default_dir() else {
                println!("キャッシュフォルダが見つかりません");
                return Ok(());
            };
            let cache_path = VocabularyCache::cache_path(&cache_dir);

            if info || !clear {
                if cache_path.exists() {
                    let cache = VocabularyCache::load(&cache_dir);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match VocabularyCache::clear(&cache_dir) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// 引数と設定から語彙を構築し、警告をログと画面に出す
fn build_vocabulary(args: &VocabularyArgs, config: &Config) -> Result<VocabularyOutcome> {
    let paths = vocab::resolve_reference_paths(
        &args.references,
        args.reference_dir.as_deref(),
        config.reference_paths(),
    )?;
    for path in &paths {
        debug!("reference list: {}", path.display());
    }

    let mode = args.mode.unwrap_or(config.mode);
    let scope = if args.all_columns {
        ColumnScope::AllColumns
    } else {
        config.column_scope
    };
    let builder = VocabularyBuilder::new(mode).scope(scope);

    let cache_dir = if args.no_cache || !config.use_cache {
        None
    } else {
        VocabularyCache::default_dir()
    };

    let outcome = vocab::build_vocabulary(&paths, builder, cache_dir.as_deref())?;
    for warning in &outcome.report.warnings {
        warn!("{}", warning);
    }
    for line in outcome.warning_lines() {
        println!("  {}", line);
    }
    Ok(outcome)
}

fn print_result(result: &BatchResult, show_rows: usize) {
    println!("### 📊 NY Product Match Results");
    println!(
        "🟢 {} out of {} items matched ({} match, {:.2}%)",
        result.match_count,
        result.total_count,
        result.mode,
        result.rounded_percent()
    );

    if show_rows == 0 || result.rows.is_empty() {
        return;
    }

    println!();
    let column = result.column_index;
    for row in result.rows.iter().take(show_rows) {
        let value = row.cells.get(column).and_then(|c| c.as_deref()).unwrap_or("");
        let mark = if row.is_ny_local { "🟢" } else { "⚪" };
        println!("  {} {}", mark, value);
    }
    if result.rows.len() > show_rows {
        println!("  ... 他 {}行", result.rows.len() - show_rows);
    }
}
