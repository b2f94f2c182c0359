use roamery::{context::AppContext, session::SessionState};

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(app: &AppContext, session: &SessionState) -> Result<(), String> {
    app.session
        .logout(&session.user)
        .await
        .map_err(|error| format!("failed to log out: {error}"))?;

    println!("session ended");

    Ok(())
}
