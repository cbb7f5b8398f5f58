use crate::seed::DEFAULT_SEED_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HTTP server settings
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-server")]
#[command(about = "HTTP API for monthly product-sale analytics")]
pub struct ServerConfig {
    #[arg(long, env = "SALES_DB_PATH", default_value = "sales.db")]
    pub db_path: PathBuf,

    #[arg(long, env = "SALES_BIND", default_value = "0.0.0.0:5000")]
    pub bind: String,

    /// Source for GET /api/initialize-database
    #[arg(long, env = "SALES_SEED_URL", default_value = DEFAULT_SEED_URL)]
    pub seed_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Command-line interface
#[derive(Debug, Parser)]
#[command(name = "sales-insight")]
#[command(about = "Import product sales and query them by month")]
pub struct Cli {
    #[arg(long, global = true, env = "SALES_DB_PATH", default_value = "sales.db")]
    pub db_path: PathBuf,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the store contents with a JSON or CSV dump
    Import { file: PathBuf },

    /// Print statistics, histogram and category counts for a month
    Report {
        #[arg(long)]
        month: String,
    },

    /// Print one page of a month's records
    List {
        #[arg(long)]
        month: String,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<String>,

        #[arg(long)]
        page_size: Option<String>,
    },
}
