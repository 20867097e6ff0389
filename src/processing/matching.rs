//! Looking up which candidate networks hold an address.
//!
//! Candidates are sorted by their ordering key, least specific first at an equal start,
//! and a scan stops at the first miss after a hit.

use crate::models::{IpAddress, IpNetwork, IpSpan};

fn sorted_candidates<I, T>(candidates: I) -> Vec<IpNetwork>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    let mut nets: Vec<IpNetwork> = candidates.into_iter().map(Into::into).collect();
    nets.sort_by_key(|n| n.sort_key());
    nets
}

/// The least specific candidate containing `ip`.
pub fn largest_matching_cidr<I, T>(ip: &IpAddress, candidates: I) -> Option<IpNetwork>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    sorted_candidates(candidates)
        .into_iter()
        .find(|net| net.contains(ip))
}

/// The most specific candidate containing `ip`.
pub fn smallest_matching_cidr<I, T>(ip: &IpAddress, candidates: I) -> Option<IpNetwork>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    all_matching_cidrs(ip, candidates).pop()
}

/// Every candidate containing `ip`, least specific first.
pub fn all_matching_cidrs<I, T>(ip: &IpAddress, candidates: I) -> Vec<IpNetwork>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    let mut matches = Vec::new();
    for net in sorted_candidates(candidates) {
        if net.contains(ip) {
            matches.push(net);
        } else if !matches.is_empty() {
            break;
        }
    }
    log::trace!("all_matching_cidrs({ip}) -> {} matches", matches.len());
    matches
}
