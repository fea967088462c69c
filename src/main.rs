//! cds-bias - batch runner for clinical MCQ bias experiments

#![allow(missing_docs)]

use anyhow::{Context, bail};
use cds_bias_lab::config::Config;
use cds_bias_lab::core::batch::{
    BatchCoordinator, BatchJob, JobHandle, JobStatus, ProgressSnapshot,
};
use cds_bias_lab::core::completion::OpenAiCompatibleClient;
use cds_bias_lab::core::dataset::{
    QuestionBank, QuestionRange, Selection, VignetteType, load_questions, question_ranges,
};
use cds_bias_lab::core::demographics::expand_work_items;
use cds_bias_lab::core::export::{summarize_by_variant, write_results_file};
use cds_bias_lab::utils::logging::init_logging;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "cds-bias", version, about)]
struct Cli {
    /// YAML configuration file; defaults and environment only when omitted
    #[arg(short, long, global = true, env = "CDS_BIAS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the question bank categories in the catalog
    Catalog,
    /// List the preset question ranges available in a bank
    Ranges(DatasetArgs),
    /// Print rendered prompts without calling the model
    Preview {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Number of prompts to print
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Submit a batch and write the results to CSV
    Run {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Results CSV path
        #[arg(short, long)]
        output: PathBuf,
        /// Override the configured worker count
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[derive(Args)]
struct DatasetArgs {
    /// Question bank CSV
    #[arg(long, required_unless_present = "category", conflicts_with = "category")]
    dataset: Option<PathBuf>,
    /// Catalog category, e.g. emergency-medicine
    #[arg(long)]
    category: Option<String>,
    /// baseline or customized
    #[arg(long, default_value = "baseline")]
    vignette: VignetteType,
}

#[derive(Args)]
struct SelectionArgs {
    #[command(flatten)]
    source: DatasetArgs,
    /// Inclusive 1-based range, e.g. 51-100
    #[arg(long, conflicts_with = "ids")]
    range: Option<QuestionRange>,
    /// Comma separated question ids
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,
    /// Demographic variant labels; all configured variants when omitted
    #[arg(long = "variant", value_delimiter = ',')]
    variants: Vec<String>,
}

impl SelectionArgs {
    fn selection(&self) -> Selection {
        match (&self.range, self.ids.is_empty()) {
            (Some(range), _) => Selection::Range(*range),
            (None, false) => Selection::Ids(self.ids.clone()),
            (None, true) => Selection::All,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    if let Command::Run {
        concurrency: Some(concurrency),
        ..
    } = &cli.command
    {
        config.batch.concurrency = *concurrency;
        config.validate()?;
    }

    init_logging(&config.logging)?;

    match cli.command {
        Command::Catalog => {
            for (category, path) in &config.dataset.catalog {
                println!("{:<20} {}", category, path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Ranges(source) => {
            let bank = load_bank(&config, &source)?;
            for range in question_ranges(bank.row_count()) {
                println!("{:<10} {}", range.to_string(), range.label());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Preview { selection, limit } => {
            let job = build_job(&config, &selection)?;
            for item in job.items().iter().take(limit) {
                println!(
                    "--- {} [{}]",
                    item.id(),
                    item.variant_label().unwrap_or("baseline")
                );
                println!("{}\n", job.template().render_user(item.prompt()));
            }
            println!("{} prompt(s) in total", job.len());
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            selection, output, ..
        } => run_batch(&config, &selection, output).await,
    }
}

fn load_bank(config: &Config, source: &DatasetArgs) -> anyhow::Result<QuestionBank> {
    let path = match (&source.dataset, &source.category) {
        (Some(path), _) => path.clone(),
        (None, Some(category)) => config
            .dataset
            .resolve_category(category)
            .cloned()
            .with_context(|| format!("Unknown dataset category '{}'", category))?,
        (None, None) => bail!("Either --dataset or --category is required"),
    };
    Ok(load_questions(path, source.vignette, &config.dataset)?)
}

fn build_job(config: &Config, args: &SelectionArgs) -> anyhow::Result<BatchJob> {
    let bank = load_bank(config, &args.source)?;
    let questions = bank.select(&args.selection())?;

    let variants = match bank.vignette() {
        VignetteType::Customized => config
            .demographics
            .select(&args.variants)
            .map_err(anyhow::Error::msg)?,
        VignetteType::Baseline => Vec::new(),
    };
    if bank.vignette() == VignetteType::Baseline && !args.variants.is_empty() {
        warn!("--variant has no effect on baseline vignettes");
    }

    let items = expand_work_items(&questions, bank.vignette(), &variants)?;
    Ok(BatchJob::new(items, config.prompts.clone()))
}

async fn run_batch(
    config: &Config,
    args: &SelectionArgs,
    output: PathBuf,
) -> anyhow::Result<ExitCode> {
    let job = build_job(config, args)?;
    let client = OpenAiCompatibleClient::new(&config.provider)?;
    info!(
        "Running {} prompt(s) against {} ({})",
        job.len(),
        client.model(),
        client.endpoint()
    );

    let coordinator = BatchCoordinator::new(Arc::new(client), config.batch.clone());
    let handle = coordinator.submit(job)?;
    let snapshot = track_progress(&coordinator, &handle).await?;

    let results = coordinator.discard(&handle)?;
    write_results_file(&output, &results).await?;

    for (variant, summary) in summarize_by_variant(&results) {
        info!(
            "{}: {} of {} succeeded",
            variant,
            summary.succeeded,
            summary.total()
        );
    }
    info!(
        "Batch {} finished as {}: {} succeeded, {} failed, {} not dispatched",
        handle,
        snapshot.status,
        snapshot.succeeded,
        snapshot.failed,
        snapshot.total - snapshot.completed
    );

    Ok(match snapshot.status {
        JobStatus::Failed => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

/// Log progress until the job finishes; Ctrl-C cancels the job once
async fn track_progress(
    coordinator: &BatchCoordinator,
    handle: &JobHandle,
) -> anyhow::Result<ProgressSnapshot> {
    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancel_sent = false;
    let mut last_completed = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            signal = &mut ctrl_c, if !cancel_sent => {
                cancel_sent = true;
                if signal.is_ok() {
                    warn!("Interrupted, waiting for in-flight requests");
                    coordinator.cancel(handle)?;
                }
            }
        }

        let snapshot = coordinator.poll(handle)?;
        if last_completed != Some(snapshot.completed) {
            info!(
                "Completed task {} of {} ({}%)",
                snapshot.completed,
                snapshot.total,
                snapshot.percent()
            );
            last_completed = Some(snapshot.completed);
        }
        if snapshot.is_terminal() {
            return Ok(snapshot);
        }
    }
}
