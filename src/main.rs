// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use label_sync::utils::logging::{format_error, format_info, format_success, format_warning};
use label_sync::{
    Config, GithubClient, JsonExporter, ReconcileOptions, ReconcileReport, Reconciler,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "label_sync")]
#[command(author = "cipher")]
#[command(version)]
#[command(
    about = "Keep a common set of issue labels on every repository of a GitHub organization",
    long_about = None
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Organization to reconcile (overrides ORG_NAME)
    #[arg(long, value_name = "ORG")]
    org: Option<String>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing reference labels and delete every other label (default)
    Sync(SyncArgs),

    /// Show what a sync would change without touching any repository
    Plan(SyncArgs),

    /// Print the reference label set
    Labels,
}

#[derive(Args, Default)]
struct SyncArgs {
    #[arg(long)]
    dry_run: bool,

    /// Leave archived repositories untouched
    #[arg(long)]
    skip_archived: bool,

    /// Only reconcile this repository (repeatable)
    #[arg(long = "repo", value_name = "NAME")]
    repositories: Vec<String>,

    /// Write a JSON report of the run to FILE
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    label_sync::utils::logging::init_logger(cli.color, cli.verbose);

    match cli.command {
        Some(Commands::Labels) => cmd_labels(&cli.config),
        Some(Commands::Plan(mut args)) => {
            args.dry_run = true;
            cmd_sync(&cli.config, cli.org, cli.color, args).await
        }
        Some(Commands::Sync(args)) => cmd_sync(&cli.config, cli.org, cli.color, args).await,
        None => cmd_sync(&cli.config, cli.org, cli.color, SyncArgs::default()).await,
    }
}

fn config_path(path: &Path) -> Option<&Path> {
    if path.exists() {
        info!("Loading configuration from: {}", path.display());
        Some(path)
    } else {
        info!(
            "Config file {} not found, using built-in defaults",
            path.display()
        );
        None
    }
}

fn load_config(path: &Path, org: Option<String>) -> Result<Config> {
    Config::load(config_path(path), org).context("Failed to load configuration")
}

fn cmd_labels(path: &Path) -> Result<()> {
    let labels = Config::load_reference_labels(config_path(path))
        .context("Failed to load reference labels")?;

    for label in labels.iter() {
        println!("#{}  {}", label.color, label.name);
    }

    Ok(())
}

async fn cmd_sync(path: &Path, org: Option<String>, color: bool, args: SyncArgs) -> Result<()> {
    let config = load_config(path, org)?;
    let reference = config
        .reference_labels()
        .context("Invalid reference label set")?;

    let mut options = ReconcileOptions::from(&config.sync);
    options.dry_run |= args.dry_run;
    options.skip_archived |= args.skip_archived;
    if !args.repositories.is_empty() {
        options.repositories = args.repositories;
    }
    options.show_progress = std::io::stderr().is_terminal();
    options.colored = color;

    let exporter = args
        .report
        .map(JsonExporter::new)
        .transpose()
        .context("Failed to prepare report file")?;

    let client = GithubClient::new(&config.github).context("Failed to create GitHub client")?;

    let org = config.github.org.as_str();
    info!(
        "Reconciling {} reference labels across {}{}",
        reference.len(),
        org,
        if options.dry_run { " (dry run)" } else { "" }
    );

    let report = Reconciler::new(&client, &reference, options)
        .reconcile(org)
        .await
        .with_context(|| format!("Reconciliation of {} aborted", org))?;

    print_summary(&report);

    if let Some(exporter) = exporter {
        exporter
            .export_report(&report, true)
            .context("Failed to write report")?;
    }

    Ok(())
}

fn print_summary(report: &ReconcileReport) {
    let stats = &report.stats;

    if report.dry_run {
        println!(
            "{}",
            format_info(&format!(
                "{} repositories checked, {} label changes pending",
                stats.repositories_processed,
                report.pending_changes()
            ))
        );
        return;
    }

    let summary = format!(
        "{} repositories reconciled in {}s: {} created, {} already present, {} deleted",
        stats.repositories_processed,
        stats.duration_secs,
        stats.labels_created,
        stats.labels_already_existing,
        stats.labels_deleted
    );

    if report.has_failures() {
        println!("{}", format_warning(&summary));
        println!(
            "{}",
            format_error(&format!(
                "{} label operations failed ({:.1}% succeeded)",
                stats.mutations_failed,
                stats.success_rate()
            ))
        );
    } else {
        println!("{}", format_success(&summary));
    }

    if stats.repositories_skipped > 0 {
        println!(
            "{}",
            format_info(&format!(
                "{} repositories skipped",
                stats.repositories_skipped
            ))
        );
    }
}
