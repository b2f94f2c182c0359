//! Client configuration module

use std::path::PathBuf;

use clap::Args;

use crate::session::{HostAssertion, InitData};

/// Roamery client configuration, shared by every subcommand.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend API base URL
    #[arg(long, env = "ROAMERY_API_BASE", default_value = "http://localhost:8000")]
    pub api_base: String,

    /// Directory holding the static catalog feeds
    #[arg(long, env = "ROAMERY_CATALOG_DIR", default_value = "catalog")]
    pub catalog_dir: PathBuf,

    /// Session file path; the platform data directory when omitted
    #[arg(long, env = "ROAMERY_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Refuse to run without a verified identity
    #[arg(long, env = "ROAMERY_PRODUCTION")]
    pub production: bool,

    /// Signed identity payload handed over by the mini-app host
    #[arg(long, env = "TELEGRAM_INIT_DATA", hide_env_values = true)]
    pub init_data: Option<String>,

    /// Unsigned user-claim JSON riding along with the payload
    #[arg(long, env = "TELEGRAM_USER_JSON")]
    pub user_claim: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl AppConfig {
    /// Identity material the host environment offered for this run.
    #[must_use]
    pub fn assertion(&self) -> HostAssertion {
        HostAssertion {
            init_data: self.init_data.clone().map(InitData::new),
            user_claim: self.user_claim.clone(),
        }
    }
}
