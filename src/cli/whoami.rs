use roamery::session::SessionState;

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) fn run(session: &SessionState) -> Result<(), String> {
    let user = &session.user;

    println!("user: {}", user.display_name());
    println!("id: {}", user.id);

    if let Some(username) = &user.username {
        println!("username: @{username}");
    }

    println!("verified: {}", session.verified);
    println!("established: {}", session.established_at);

    Ok(())
}
