//! Spanning blocks and range to CIDR decomposition.

use super::cidr_exclude;
use crate::error::AddrError;
use crate::models::{IpAddress, IpNetwork, IpSpan};

/// Smallest single CIDR block covering every item, possibly overshooting both ends.
///
/// Needs at least two items of one version.
pub fn spanning_cidr<I, T>(items: I) -> Result<IpNetwork, AddrError>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    let mut nets: Vec<IpNetwork> = items.into_iter().map(Into::into).collect();
    nets.sort_by_key(|n| n.sort_key());
    let (lowest, highest) = match (nets.first(), nets.last()) {
        (Some(lowest), Some(highest)) if nets.len() > 1 => (*lowest, *highest),
        _ => {
            return Err(AddrError::Value(
                "IP sequence must contain at least 2 elements".to_string(),
            ))
        }
    };
    if lowest.version() != highest.version() {
        return Err(AddrError::mismatch(lowest, highest));
    }

    let mut span = highest.cidr();
    while span.prefixlen() > 0 && span.contains(&highest) && !span.contains(&lowest) {
        span = IpNetwork::from_parts(span.first(), span.prefixlen() - 1, span.version()).cidr();
    }
    log::trace!("spanning_cidr({lowest} .. {highest}) -> {span}");
    Ok(span)
}

/// Blocks of `span` from the one starting at `first` onwards, after cutting `first - 1`.
fn trim_below(span: IpNetwork, first: u128) -> Result<Vec<IpNetwork>, AddrError> {
    let cut = IpAddress::from_parts(first - 1, span.version());
    Ok(cidr_exclude(span, cut)?
        .into_iter()
        .skip_while(|c| c.first() != first)
        .collect())
}

/// Blocks of `span` up to the one ending at `last`, after cutting `last + 1`.
fn trim_above(span: IpNetwork, last: u128) -> Result<Vec<IpNetwork>, AddrError> {
    let cut = IpAddress::from_parts(last + 1, span.version());
    let mut kept = Vec::new();
    for cidr in cidr_exclude(span, cut)? {
        kept.push(cidr);
        if cidr.last() == last {
            break;
        }
    }
    Ok(kept)
}

/// Exact, minimal list of aligned CIDR blocks covering `start.first ..= end.last`.
pub fn iprange_to_cidrs<S, E>(start: S, end: E) -> Result<Vec<IpNetwork>, AddrError>
where
    S: Into<IpNetwork>,
    E: Into<IpNetwork>,
{
    let start = start.into();
    let end = end.into();
    if start.version() != end.version() {
        return Err(AddrError::mismatch(start, end));
    }
    let (first, last) = (start.first(), end.last());
    if first > last {
        return Err(AddrError::Format(format!(
            "lower bound {start} greater than upper bound {end}"
        )));
    }

    let span = spanning_cidr([start, end])?;
    let cidrs = match (span.first() == first, span.last() == last) {
        (true, true) => vec![span],
        (false, true) => trim_below(span, first)?,
        (true, false) => trim_above(span, last)?,
        (false, false) => {
            let mut cidrs = trim_below(span, first)?;
            if let Some(top) = cidrs.pop() {
                cidrs.extend(trim_above(top, last)?);
            }
            cidrs
        }
    };
    log::debug!("iprange_to_cidrs({start}, {end}) -> {} blocks", cidrs.len());
    Ok(cidrs)
}
