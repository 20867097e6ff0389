//! Gap finding between networks.
//!
//! Identifies unused address blocks between merged networks.

use super::{cidr_merge, iprange_to_cidrs};
use crate::error::AddrError;
use crate::models::{IpAddress, IpNetwork, IpSpan};
use serde::Serialize;

/// Represents a row of the summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// Row index (0 for gap rows).
    pub j: usize,
    /// Gap indicator, or the source index of a used block.
    pub gap: String,
    /// The block itself.
    pub cidr: IpNetwork,
    /// Broadcast (last) address.
    pub broadcast: IpAddress,
    /// Number of addresses, saturating for the whole IPv6 space.
    pub size: u128,
}

impl SummaryRow {
    fn new(j: usize, gap: &str, cidr: IpNetwork) -> SummaryRow {
        SummaryRow {
            j,
            gap: gap.to_string(),
            cidr,
            broadcast: cidr.broadcast(),
            size: cidr.size(),
        }
    }

    pub fn is_gap(&self) -> bool {
        self.j == 0
    }
}

/// Unused blocks lying strictly between consecutive merged networks.
pub fn find_gaps<I, T>(items: I) -> Result<Vec<IpNetwork>, AddrError>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    Ok(summary_rows(items)?
        .into_iter()
        .filter(SummaryRow::is_gap)
        .map(|row| row.cidr)
        .collect())
}

/// Merged networks interleaved with the gap blocks between them, ascending.
pub fn summary_rows<I, T>(items: I) -> Result<Vec<SummaryRow>, AddrError>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    let merged = cidr_merge(items)?;
    let mut rows = Vec::with_capacity(merged.len());
    let mut next_ip: Option<u128> = None;

    for (i, net) in merged.iter().enumerate() {
        // Look for unused gaps before this block
        if let Some(next) = next_ip.filter(|n| *n < net.first()) {
            let version = net.version();
            let gaps = iprange_to_cidrs(
                IpAddress::from_parts(next, version),
                IpAddress::from_parts(net.first() - 1, version),
            )?;
            log::debug!("gap of {} blocks before {net}", gaps.len());
            rows.extend(gaps.into_iter().map(|g| SummaryRow::new(0, "-gap-", g)));
        }
        rows.push(SummaryRow::new(i + 1, &format!("Net{}", i + 1), *net));
        next_ip = net.last().checked_add(1);
    }
    Ok(rows)
}
