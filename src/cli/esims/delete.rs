use clap::Args;

use roamery::{context::AppContext, session::SessionState};

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// ICCID of the target eSIM
    #[arg(long)]
    iccid: String,
}

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(
    app: &AppContext,
    session: &SessionState,
    args: DeleteArgs,
) -> Result<(), String> {
    let records = app
        .esims
        .delete(&session.user, &args.iccid)
        .await
        .map_err(|error| format!("failed to delete: {error}"))?;

    println!("deleted {}", args.iccid);
    println!();

    super::write_refreshed_list(&records)
}
