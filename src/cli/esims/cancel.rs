use clap::Args;

use roamery::{context::AppContext, session::SessionState};

#[derive(Debug, Args)]
pub(crate) struct CancelArgs {
    /// ICCID of the target eSIM
    #[arg(long)]
    iccid: String,
}

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(
    app: &AppContext,
    session: &SessionState,
    args: CancelArgs,
) -> Result<(), String> {
    let records = app
        .esims
        .cancel(&session.user, &args.iccid)
        .await
        .map_err(|error| format!("failed to cancel: {error}"))?;

    println!("cancelled {}", args.iccid);
    println!();

    super::write_refreshed_list(&records)
}
