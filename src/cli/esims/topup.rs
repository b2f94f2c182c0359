use std::io;

use clap::Args;

use roamery::{context::AppContext, render, session::SessionState};

#[derive(Debug, Args)]
pub(crate) struct TopupArgs {
    /// ICCID of the target eSIM
    #[arg(long)]
    iccid: String,

    /// Top-up package to apply; omit to list the offers
    #[arg(long)]
    package_code: Option<String>,
}

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(
    app: &AppContext,
    session: &SessionState,
    args: TopupArgs,
) -> Result<(), String> {
    let offers = app
        .esims
        .topup_offers(&session.user, &args.iccid)
        .await
        .map_err(|error| format!("failed to fetch top-up offers: {error}"))?;

    let Some(code) = args.package_code else {
        if offers.is_empty() {
            println!("no top-up offers");

            return Ok(());
        }

        return render::write_package_table(io::stdout(), &offers)
            .map_err(|error| format!("failed to render offers: {error}"));
    };

    let package = offers
        .into_iter()
        .find(|package| package.package_code == code)
        .ok_or_else(|| format!("no top-up offer {code} for {}", args.iccid))?;

    let records = app
        .esims
        .topup(&session.user, &args.iccid, &package)
        .await
        .map_err(|error| format!("failed to top up: {error}"))?;

    println!("topped up {}", args.iccid);
    println!();

    super::write_refreshed_list(&records)
}
