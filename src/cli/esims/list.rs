use std::io;

use roamery::{context::AppContext, render, session::SessionState};

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(app: &AppContext, session: &SessionState) -> Result<(), String> {
    let records = app
        .esims
        .list(&session.user)
        .await
        .map_err(|error| format!("failed to list eSIMs: {error}"))?;

    if records.is_empty() {
        println!("no eSIMs yet");

        return Ok(());
    }

    render::write_esim_list(io::stdout(), &records)
        .map_err(|error| format!("failed to render eSIMs: {error}"))
}
