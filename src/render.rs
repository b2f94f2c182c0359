//! Terminal output

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    catalog::{Country, Package, scope},
    esim::{ActionKind, EsimRecord, can_cancel, can_delete, can_refresh, can_top_up},
    money,
};

/// Bytes in a mebibyte, the unit of the usage display.
const MIB: u64 = 1_048_576;

/// Writes the purchasable-country table.
///
/// # Errors
///
/// Returns an error when the table cannot be written to `out`.
pub fn write_country_table(mut out: impl io::Write, countries: &[Country]) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Code", "Country"]);

    for country in countries {
        builder.push_record([country.code.as_str(), country.name.as_str()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")
}

/// Writes a package table in the order the caller provided.
///
/// # Errors
///
/// Returns an error when the table cannot be written to `out`.
pub fn write_package_table(mut out: impl io::Write, packages: &[Package]) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Package", "Data", "Duration", "Top-up", "Price"]);

    for package in packages {
        builder.push_record([
            package.name.clone(),
            scope::volume_label(package.volume),
            format!("{}d", package.duration),
            top_up_marker(package).to_owned(),
            money::format_price(package.retail_price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..3), Alignment::right());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")
}

/// Writes one block per `eSIM` record, blank-line separated.
///
/// # Errors
///
/// Returns an error when a block cannot be written to `out`.
pub fn write_esim_list(mut out: impl io::Write, records: &[EsimRecord]) -> io::Result<()> {
    for (idx, record) in records.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }

        write_esim_block(&mut out, record)?;
    }

    Ok(())
}

fn write_esim_block(out: &mut impl io::Write, record: &EsimRecord) -> io::Result<()> {
    let package_name = record
        .current_package()
        .map_or("-", |package| package.package_name.as_str());

    let order_date = record
        .current_package()
        .and_then(|package| package.create_time.as_deref())
        .map_or("-", short_date);

    let expires = short_date(record.expired_time.as_deref().unwrap_or("N/A"));
    let qr = record.qr_code_url.as_deref().map_or("-", qr_link);

    writeln!(out, "eSIM: {package_name}")?;
    writeln!(out, "ICCID: {}", record.iccid)?;
    writeln!(
        out,
        "Data: {} MB | Used: {} MB",
        format_mb(record.total_volume),
        format_mb(record.order_usage)
    )?;
    writeln!(out, "Order: {order_date} | Expires: {expires}")?;
    writeln!(out, "Status: {}", record.status())?;
    writeln!(out, "QR: {qr}")?;
    writeln!(out, "Actions: {}", permitted_actions(record))
}

/// The lifecycle actions the record's state permits, comma separated.
fn permitted_actions(record: &EsimRecord) -> String {
    let status = record.status();
    let mut actions = Vec::new();

    if can_cancel(status) {
        actions.push(ActionKind::Cancel.to_string());
    }

    if can_top_up(record) {
        actions.push(ActionKind::TopUp.to_string());
    }

    if can_refresh(status) {
        actions.push(ActionKind::Refresh.to_string());
    }

    if can_delete(status) {
        actions.push(ActionKind::Delete.to_string());
    }

    actions.join(", ")
}

fn top_up_marker(package: &Package) -> &'static str {
    if package.supports_top_up() { "Yes" } else { "No" }
}

/// Formats a byte count as mebibytes with one decimal, e.g. `"50.0"`.
fn format_mb(bytes: u64) -> String {
    let tenths = (u128::from(bytes) * 10 + u128::from(MIB) / 2) / u128::from(MIB);

    format!("{}.{}", tenths / 10, tenths % 10)
}

/// The date part of an upstream timestamp; short values pass through.
fn short_date(raw: &str) -> &str {
    raw.get(..10).unwrap_or(raw)
}

/// The install link behind a QR image URL.
fn qr_link(url: &str) -> &str {
    url.strip_suffix(".png").unwrap_or(url)
}
