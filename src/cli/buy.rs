use clap::Args;
use tracing::warn;

use roamery::{
    catalog::Package, context::AppContext, purchase::PurchaseFlow, session::SessionState,
};

#[derive(Debug, Args)]
pub(crate) struct BuyArgs {
    /// Package code from the catalog listing
    #[arg(long)]
    package_code: String,

    /// Rental length in days; daily plans only
    #[arg(long)]
    days: Option<u32>,

    /// Number of eSIMs to provision
    #[arg(long)]
    count: Option<u32>,
}

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(
    app: &AppContext,
    session: &SessionState,
    args: BuyArgs,
) -> Result<(), String> {
    let package = find_package(app, &args.package_code)
        .ok_or_else(|| format!("unknown package code {}", args.package_code))?;

    let daily = package.is_daily();
    let name = package.name.clone();

    let mut flow = PurchaseFlow::default();

    flow.select(package);

    if daily {
        flow.provide_days(args.days)
            .map_err(|error| format!("failed to choose a rental length: {error}"))?;
    } else if args.days.is_some() {
        warn!("days option ignored for fixed-length plans");
    }

    flow.provide_count(args.count)
        .map_err(|error| format!("failed to choose a count: {error}"))?;

    app.purchases
        .submit(&session.user, &mut flow)
        .await
        .map_err(|error| format!("purchase failed: {error}"))?;

    println!("purchased {name}");

    Ok(())
}

fn find_package(app: &AppContext, code: &str) -> Option<Package> {
    let feeds = [
        app.catalog.local_packages(),
        app.catalog.regional_packages(),
        app.catalog.global_packages(),
    ];

    feeds
        .into_iter()
        .flatten()
        .find(|package| package.package_code == code)
}
