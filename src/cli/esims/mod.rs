use std::io;

use clap::{Args, Subcommand};

use roamery::{context::AppContext, esim::EsimRecord, render, session::SessionState};

mod cancel;
mod delete;
mod list;
mod refresh;
mod topup;

#[derive(Debug, Args)]
pub(crate) struct EsimsCommand {
    #[command(subcommand)]
    command: EsimsSubcommand,
}

#[derive(Debug, Subcommand)]
enum EsimsSubcommand {
    /// List provisioned eSIMs, freshest first
    List,

    /// Cancel a not-yet-installed eSIM
    Cancel(cancel::CancelArgs),

    /// Remove a finished eSIM from the listing
    Delete(delete::DeleteArgs),

    /// Re-read usage figures for an in-use eSIM
    Refresh(refresh::RefreshArgs),

    /// List top-up offers or apply one
    Topup(topup::TopupArgs),
}

pub(crate) async fn run(
    app: &AppContext,
    session: &SessionState,
    command: EsimsCommand,
) -> Result<(), String> {
    match command.command {
        EsimsSubcommand::List => list::run(app, session).await,
        EsimsSubcommand::Cancel(args) => cancel::run(app, session, args).await,
        EsimsSubcommand::Delete(args) => delete::run(app, session, args).await,
        EsimsSubcommand::Refresh(args) => refresh::run(app, session, args).await,
        EsimsSubcommand::Topup(args) => topup::run(app, session, args).await,
    }
}

/// Renders the listing an action handed back, skipping an empty one.
fn write_refreshed_list(records: &[EsimRecord]) -> Result<(), String> {
    if records.is_empty() {
        return Ok(());
    }

    render::write_esim_list(io::stdout(), records)
        .map_err(|error| format!("failed to render eSIMs: {error}"))
}
