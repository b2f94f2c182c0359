use std::io;

use roamery::{catalog::scope, context::AppContext, render};

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) fn run(app: &AppContext) -> Result<(), String> {
    let countries =
        scope::countries_with_packages(app.catalog.countries(), &app.catalog.local_packages());

    if countries.is_empty() {
        println!("no countries available");

        return Ok(());
    }

    render::write_country_table(io::stdout(), &countries)
        .map_err(|error| format!("failed to render countries: {error}"))
}
