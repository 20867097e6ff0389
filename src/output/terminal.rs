//! Terminal output utilities.
//!
//! Provides formatting helpers for the summary report.

use crate::models::IpNetwork;
use crate::processing::SummaryRow;
use colored::Colorize;
use std::fmt;

/// Quote `value` and right-align it to at least `width` columns. Longer values are
/// never truncated.
pub fn format_field<T: fmt::Display>(value: T, width: usize) -> String {
    format!("{:>width$}", format!("\"{value}\""))
}

/// One report line, fields quoted and aligned under [`HEADER`].
pub fn format_row(row: &SummaryRow) -> String {
    format!(
        "{j},{gap},{cidr},{broadcast},{size}",
        j = format_field(row.j, 6),
        gap = format_field(&row.gap, 8),
        cidr = format_field(row.cidr, 20),
        broadcast = format_field(format!("{}_br", row.broadcast), 22),
        size = format_field(row.size, 10),
    )
}

pub const HEADER: &str =
    r#" "cnt",   "gap",              "cidr",           "broadcast",    "size""#;

/// Print the report rows to stdout, gap rows highlighted.
pub fn print_summary(rows: &[SummaryRow]) {
    log::info!("#Start print_summary() rows={}", rows.len());
    println!("{HEADER}");
    for row in rows {
        let line = format_row(row);
        if row.is_gap() {
            println!("{}", line.on_red());
        } else {
            println!("{line}");
        }
    }
    let gaps = rows.iter().filter(|r| r.is_gap()).count();
    println!(
        "#{}# {} blocks, {gaps} gaps",
        "NOTE".on_red(),
        rows.len() - gaps
    );
}

/// Print networks one per line.
pub fn print_networks(nets: &[IpNetwork]) {
    for net in nets {
        println!("{net}");
    }
}
