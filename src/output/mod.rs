//! Output formatting for the command line report.
//!
//! - [`terminal`] - aligned rows with colored gap markers

mod terminal;

pub use terminal::{format_field, format_row, print_networks, print_summary, HEADER};
