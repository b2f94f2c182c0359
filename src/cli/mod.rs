use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roamery::{config::AppConfig, context::AppContext, session::SessionState};

mod buy;
mod countries;
mod esims;
mod logout;
mod packages;
mod whoami;

#[derive(Debug, Parser)]
#[command(name = "roamery", about = "Roamery eSIM storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List purchasable countries
    Countries,

    /// List catalog packages for one browsing scope
    Packages(packages::PackagesCommand),

    /// Buy a package
    Buy(buy::BuyArgs),

    /// Inspect and act on provisioned eSIMs
    Esims(esims::EsimsCommand),

    /// Show the established identity
    Whoami,

    /// End the session
    Logout,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_tracing(&self.config.log_level);

        let app = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to initialize: {error}"))?;

        match self.command {
            Commands::Countries => countries::run(&app),
            Commands::Packages(command) => packages::run(&app, command),
            Commands::Buy(args) => {
                let session = establish(&app, &self.config).await?;

                buy::run(&app, &session, args).await
            }
            Commands::Esims(command) => {
                let session = establish(&app, &self.config).await?;

                esims::run(&app, &session, command).await
            }
            Commands::Whoami => {
                let session = establish(&app, &self.config).await?;

                whoami::run(&session)
            }
            Commands::Logout => {
                let session = establish(&app, &self.config).await?;

                logout::run(&app, &session).await
            }
        }
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn establish(app: &AppContext, config: &AppConfig) -> Result<SessionState, String> {
    app.session
        .establish(&config.assertion())
        .await
        .map_err(|error| format!("failed to establish identity: {error}"))
}
