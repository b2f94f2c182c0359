use std::io;

use clap::{Args, Subcommand};

use roamery::{
    catalog::{Package, Scope, VolumeBucket, scope},
    context::AppContext,
    render,
};

#[derive(Debug, Args)]
pub(crate) struct PackagesCommand {
    #[command(subcommand)]
    command: PackagesSubcommand,
}

#[derive(Debug, Subcommand)]
enum PackagesSubcommand {
    /// Packages covering a single country
    Local(LocalArgs),

    /// Packages of one regional group
    Regional(RegionalArgs),

    /// Worldwide packages of one volume tier
    Global(GlobalArgs),
}

#[derive(Debug, Args)]
struct LocalArgs {
    /// ISO country code, e.g. JP
    #[arg(long)]
    country: String,
}

#[derive(Debug, Args)]
struct RegionalArgs {
    /// Regional slug from the catalog
    #[arg(long)]
    slug: String,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Volume tier key: 1gb, 3gb, 5gb, 10gb or 20gb
    #[arg(long)]
    bucket: VolumeBucket,
}

pub(crate) fn run(app: &AppContext, command: PackagesCommand) -> Result<(), String> {
    let (feed, scope) = match command.command {
        PackagesSubcommand::Local(args) => (
            app.catalog.local_packages(),
            Scope::Local {
                country: args.country,
            },
        ),
        PackagesSubcommand::Regional(args) => (
            app.catalog.regional_packages(),
            Scope::Regional { slug: args.slug },
        ),
        PackagesSubcommand::Global(args) => (
            app.catalog.global_packages(),
            Scope::Global {
                bucket: args.bucket,
            },
        ),
    };

    list(scope::filter_scope(feed, &scope))
}

#[expect(clippy::print_stdout, reason = "command output")]
fn list(packages: Vec<Package>) -> Result<(), String> {
    if packages.is_empty() {
        println!("no packages");

        return Ok(());
    }

    render::write_package_table(io::stdout(), &packages)
        .map_err(|error| format!("failed to render packages: {error}"))
}
