//! Predictive Maintenance - Main Entry Point

mod api;
mod logic;
pub mod constants;

use std::path::PathBuf;
use clap::{Parser, Subcommand};

use api::commands;
use logic::config::PipelineConfig;

#[derive(Debug, Parser)]
#[command(name = "maintenance-core", version, about = "Failure alerts and maintenance recommendations from equipment workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one scan and print alerts and recommendations
    Scan {
        /// Workbook path (overrides PM_WORKBOOK_PATH)
        #[arg(long)]
        workbook: Option<PathBuf>,
        /// Seed for the split and bootstrap draws
        #[arg(long)]
        seed: Option<u64>,
        /// Number of trees in the forest
        #[arg(long)]
        trees: Option<u16>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Append this scan to the history log (same as PM_HISTORY_ENABLED=true)
        #[arg(long)]
        history: bool,
    },
    /// Interactive two-pane dashboard, scans on Enter
    Dashboard {
        #[arg(long)]
        workbook: Option<PathBuf>,
        /// Append every scan to the history log
        #[arg(long)]
        history: bool,
    },
    /// Write a synthetic workbook
    Generate {
        #[arg(long, default_value = constants::DEFAULT_WORKBOOK_PATH)]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 50)]
        equipment: u32,
    },
    /// Scan history maintenance
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// Merge all history files into one JSONL file
    Export { path: PathBuf },
    /// Summarize the history directory
    Stats,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = PipelineConfig::from_env();
    log::debug!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);

    match cli.command {
        None => commands::scan(&config, false),
        Some(Command::Scan { workbook, seed, trees, json, history }) => {
            let mut config = config;
            if let Some(path) = workbook {
                config = config.with_workbook(path);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(trees) = trees {
                config = config.with_trees(trees);
            }
            if history {
                config = config.with_history();
            }
            commands::scan(&config, json)
        }
        Some(Command::Dashboard { workbook, history }) => {
            let mut config = config;
            if let Some(path) = workbook {
                config = config.with_workbook(path);
            }
            if history {
                config = config.with_history();
            }
            commands::dashboard(config)
        }
        Some(Command::Generate { output, seed, equipment }) => commands::generate(&output, seed, equipment),
        Some(Command::History { action }) => match action {
            HistoryAction::Export { path } => commands::history_export(&config, &path),
            HistoryAction::Stats => commands::history_stats(&config),
        },
    }
}
