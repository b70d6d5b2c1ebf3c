use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use stamp_renamer_core::{
    app_paths, apply_plan, generate_plan, load_config, load_config_from, save_config, AppConfig,
    CollisionPolicy, RenameMode, RenameOptions, RenamePlan, VideoFallback,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "stamp-renamer")]
#[command(about = "写真・動画を撮影日時ベースのファイル名に一括リネームします")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rename(RenameArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Args)]
struct RenameArgs {
    #[arg(long)]
    dir: PathBuf,
    #[arg(long)]
    mode: Option<RenameMode>,
    /// Literal date label for special mode, e.g. 2023_07_00
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    suffix_len: Option<usize>,
    #[arg(long)]
    video_fallback: Option<VideoFallback>,
    #[arg(long)]
    on_collision: Option<CollisionPolicy>,
    #[arg(long, default_value_t = false)]
    apply: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
    }
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let Some(mode) = args.mode.or(config.default_mode) else {
        anyhow::bail!("--mode (video / image / special) を指定してください");
    };

    let mut options = RenameOptions::new(args.dir, mode);
    options.special_date = args.date;
    options.suffix_len = args.suffix_len.unwrap_or(config.suffix_len);
    options.video_fallback = args.video_fallback.unwrap_or(config.video_fallback);
    options.collision = args.on_collision.unwrap_or(config.on_collision);

    let plan = generate_plan(&options)?;

    if !args.apply {
        match args.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            OutputFormat::Table => print_table(&plan),
        }
        eprintln!("dry-runモード: 実ファイルは変更していません。適用するには --apply を指定してください。");
        return Ok(());
    }

    let result = apply_plan(&plan, |op| {
        println!(
            "Renamed {} to {}",
            display_name(&op.from),
            display_name(&op.to)
        );
    })?;
    eprintln!(
        "適用完了: {}件 (ペア動画 {}件, スキップ {}件)",
        result.applied, result.companions, result.skipped
    );

    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("設定ファイル: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let paths = app_paths()?;
    if paths.config_path.exists() {
        anyhow::bail!(
            "設定ファイルは既に存在します: {}",
            paths.config_path.display()
        );
    }
    let path = save_config(&AppConfig::default())?;
    println!("設定ファイルを作成しました: {}", path.display());
    Ok(())
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_table(plan: &RenamePlan) {
    println!("元ファイル -> 新ファイル (source)");
    for candidate in &plan.candidates {
        println!(
            "{} -> {} ({:?})",
            display_name(&candidate.original_path),
            display_name(&candidate.target_path),
            candidate.source
        );
        if let Some(companion) = &candidate.companion {
            println!(
                "  + {} -> {}",
                display_name(&companion.original_path),
                display_name(&companion.target_path)
            );
        }
    }

    println!(
        "\n集計: scanned={} dir_skip={} unmatched_skip={} planned={} companions={} mode={} on_collision={}",
        plan.stats.scanned_entries,
        plan.stats.skipped_dirs,
        plan.stats.skipped_unmatched,
        plan.stats.planned,
        plan.stats.companions,
        plan.mode,
        plan.collision
    );
}
