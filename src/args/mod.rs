use clap::Parser;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

use crate::gateway::ApiConfig;

/// # Errors
///
/// Will return `Err` if the arguments are invalid
pub fn args_checks() -> Result<CleanArgs, String> {
    let args = Args::parse();
    CleanArgs::new(args)
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the bind address is empty
    pub fn new(args: Args) -> Result<Self, String> {
        let bind = args.bind.trim().to_string();
        if bind.is_empty() {
            return Err("bind address must not be empty".to_string());
        }
        Ok(CleanArgs {
            api: ApiConfig::new(args.api_url),
            bind,
            static_dir: args.static_dir,
            log_json: args.log_json,
        })
    }
}
