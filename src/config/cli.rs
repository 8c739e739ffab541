use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "user-feed")]
#[command(about = "Load users from a REST service and render them as a list or detail view")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, help = "TOML config file; overrides --base-url and --timeout-seconds")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Show the detail view for the user at this index")]
    pub select: Option<usize>,

    #[arg(long, help = "HTTP request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
