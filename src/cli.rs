use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_PATTERN: &str = "benchmark_results/*.csv";
pub const DEFAULT_REPORT_PATH: &str = "benchmark_analysis_report.md";
pub const DEFAULT_MANIFEST_PATH: &str = "benchmark_analysis_manifest.json";

#[derive(Parser, Debug)]
#[command(
    name = "benchgate",
    version,
    about = "Go/no-go evaluation and reporting for retrieval benchmark results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Analyze(AnalyzeArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Glob pattern selecting the benchmark CSV files.
    #[arg(long, short = 'p', default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_MANIFEST_PATH)]
    pub manifest_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = DEFAULT_MANIFEST_PATH)]
    pub manifest_path: PathBuf,
}
