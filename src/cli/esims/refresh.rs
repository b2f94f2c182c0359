use std::{io, slice};

use clap::Args;

use roamery::{context::AppContext, render, session::SessionState};

#[derive(Debug, Args)]
pub(crate) struct RefreshArgs {
    /// ICCID of the target eSIM
    #[arg(long)]
    iccid: String,
}

pub(crate) async fn run(
    app: &AppContext,
    session: &SessionState,
    args: RefreshArgs,
) -> Result<(), String> {
    let record = app
        .esims
        .refresh(&session.user, &args.iccid)
        .await
        .map_err(|error| format!("failed to refresh: {error}"))?;

    render::write_esim_list(io::stdout(), slice::from_ref(&record))
        .map_err(|error| format!("failed to render eSIMs: {error}"))
}
