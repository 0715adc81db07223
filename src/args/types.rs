use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

use crate::gateway::{API_URL_ENV, ApiConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hole-by-hole golf score entry and leaderboard", long_about = None)]
pub struct Args {
    /// Full URL of the spreadsheet score API. Without it every load and save
    /// fails with a missing configuration error.
    #[arg(
        long,
        value_name = "API_URL",
        env = API_URL_ENV,
        value_parser = crate::args::validation::check_endpoint_url
    )]
    pub api_url: Option<Url>,
    #[arg(long, value_name = "ADDRESS", env = "GOLF_BIND", default_value = "0.0.0.0:8081")]
    pub bind: String,
    /// Directory served under /static.
    #[arg(long, value_name = "DIR", default_value = "./static")]
    pub static_dir: PathBuf,
    /// Emit logs as JSON lines.
    #[arg(long, env = "GOLF_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub api: ApiConfig,
    pub bind: String,
    pub static_dir: PathBuf,
    pub log_json: bool,
}
