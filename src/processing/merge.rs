//! CIDR summarisation.
//!
//! Each network is reduced to the string of its prefix bits. Sorted bit-strings are then
//! folded repeatedly: siblings (`p0`, `p1`) collapse to `p` and a string that prefixes the
//! next one swallows it. A collapse at one level can expose a sibling pair one level up,
//! so passes continue until nothing changes.

use crate::error::AddrError;
use crate::models::{IpAddress, IpNetwork, IpSpan, Version};
use itertools::Itertools;

/// Prefix bits of a network, most significant first.
fn prefix_bits(net: &IpNetwork) -> String {
    let mut bits = net.version().int_to_bits(net.first(), Some(""));
    bits.truncate(usize::from(net.prefixlen()));
    bits
}

fn bits_to_network(bits: &str, version: Version) -> Result<IpNetwork, AddrError> {
    let width = usize::from(version.width());
    let padded = format!("{bits:0<width$}");
    let value = version.bits_to_int(&padded)?;
    Ok(IpNetwork::from_parts(value, bits.len() as u8, version))
}

/// `p0` followed by `p1`: the common parent `p`.
fn sibling_parent<'a>(lhs: &'a str, rhs: &str) -> Option<&'a str> {
    let parent = lhs.strip_suffix('0')?;
    (rhs.len() == lhs.len() && rhs.starts_with(parent) && rhs.ends_with('1')).then_some(parent)
}

/// One sweep over sorted bit-strings; returns the reduced list and whether anything changed.
fn reduce_pass(cidrs: Vec<String>) -> (Vec<String>, bool) {
    let mut reduced: Vec<String> = Vec::with_capacity(cidrs.len());
    let mut changed = false;
    for rhs in cidrs {
        let Some(lhs) = reduced.last_mut() else {
            reduced.push(rhs);
            continue;
        };
        if let Some(parent) = sibling_parent(lhs, &rhs) {
            let parent = parent.to_string();
            *lhs = parent;
            changed = true;
        } else if rhs.len() > lhs.len() && rhs.starts_with(lhs.as_str()) {
            changed = true;
        } else {
            reduced.push(rhs);
        }
    }
    (reduced, changed)
}

/// Reduce sorted, unique bit-strings to a fixed point.
fn reduce_bit_cidrs(mut cidrs: Vec<String>) -> Vec<String> {
    let mut passes = 0;
    loop {
        passes += 1;
        let (reduced, changed) = reduce_pass(cidrs);
        cidrs = reduced;
        if !changed {
            break;
        }
    }
    log::trace!("reduce_bit_cidrs() fixed point after {passes} passes");
    cidrs
}

/// Smallest sorted list of networks covering exactly the addresses of `items`.
///
/// Duplicates, contained blocks and adjacent siblings are merged away. An empty input
/// gives an empty list; mixing IPv4 and IPv6 fails with a version mismatch.
pub fn cidr_merge<I, T>(items: I) -> Result<Vec<IpNetwork>, AddrError>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    let nets: Vec<IpNetwork> = items.into_iter().map(Into::into).collect();
    let Some(version) = nets.first().map(|n| n.version()) else {
        return Ok(Vec::new());
    };
    if let Some(other) = nets.iter().find(|n| n.version() != version) {
        return Err(AddrError::mismatch(nets[0], other));
    }

    let bit_cidrs: Vec<String> = if nets.iter().any(|n| n.prefixlen() == 0) {
        vec![String::new()]
    } else {
        nets.iter().map(prefix_bits).sorted().dedup().collect()
    };
    let unique = bit_cidrs.len();
    let merged = reduce_bit_cidrs(bit_cidrs)
        .iter()
        .map(|bits| bits_to_network(bits, version))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "cidr_merge() {} items, {unique} unique, {} merged",
        nets.len(),
        merged.len()
    );
    Ok(merged)
}

/// Every distinct address covered by `items`, ascending.
pub fn iter_unique_ips<I, T>(items: I) -> Result<impl Iterator<Item = IpAddress>, AddrError>
where
    I: IntoIterator<Item = T>,
    T: Into<IpNetwork>,
{
    Ok(cidr_merge(items)?.into_iter().flat_map(|net| net.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(items: &[&str]) -> Vec<IpNetwork> {
        items.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn merged(items: &[&str]) -> Vec<String> {
        cidr_merge(nets(items))
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_reduce_pass() {
        let input = vec!["10".to_string(), "11".to_string()];
        assert_eq!(reduce_pass(input), (vec!["1".to_string()], true));
        let input = vec!["0".to_string(), "1".to_string()];
        assert_eq!(reduce_pass(input), (vec![String::new()], true));
        let input = vec!["10".to_string(), "1011".to_string(), "11".to_string()];
        assert_eq!(
            reduce_pass(input),
            (vec!["1".to_string()], true)
        );
        let input = vec!["00".to_string(), "11".to_string()];
        assert!(!reduce_pass(input).1);
    }

    #[test]
    fn test_adjacent() {
        assert_eq!(merged(&["192.0.2.0/24", "192.0.3.0/24"]), vec!["192.0.2.0/23"]);
        assert_eq!(
            merged(&["192.0.2.0/24", "192.0.4.0/24"]),
            vec!["192.0.2.0/24", "192.0.4.0/24"]
        );
        assert_eq!(merged(&["192.0.1.0/24", "192.0.2.0/24"]).len(), 2);
    }

    #[test]
    fn test_cascade() {
        assert_eq!(
            merged(&["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/25", "10.0.1.0/24"]),
            vec!["10.0.0.0/23"]
        );
        assert_eq!(
            merged(&["10.0.0.3", "10.0.0.0", "10.0.0.2", "10.0.0.1"]),
            vec!["10.0.0.0/30"]
        );
    }

    #[test]
    fn test_contained_and_duplicates() {
        assert_eq!(
            merged(&["10.0.0.0/8", "10.1.0.0/16", "10.0.0.0/8", "10.2.3.4"]),
            vec!["10.0.0.0/8"]
        );
        assert_eq!(merged(&["192.0.2.77/24", "192.0.2.0/24"]), vec!["192.0.2.0/24"]);
    }

    #[test]
    fn test_match_all() {
        assert_eq!(merged(&["0.0.0.0/0", "10.0.0.0/8"]), vec!["0.0.0.0/0"]);
        assert_eq!(merged(&["0.0.0.0/1", "128.0.0.0/1"]), vec!["0.0.0.0/0"]);
        assert_eq!(merged(&["::/1", "8000::/1"]), vec!["::/0"]);
    }

    #[test]
    fn test_v6() {
        assert_eq!(
            merged(&["2001:db8::/33", "2001:db8:8000::/33", "2001:db8::1"]),
            vec!["2001:db8::/32"]
        );
    }

    #[test]
    fn test_empty_and_mixed() {
        assert!(cidr_merge(Vec::<IpNetwork>::new()).unwrap().is_empty());
        assert!(matches!(
            cidr_merge(nets(&["10.0.0.0/8", "::/0"])),
            Err(AddrError::VersionMismatch(_))
        ));
    }

    #[test]
    fn test_addresses_as_input() {
        let addrs: Vec<IpAddress> = vec!["10.0.0.0".parse().unwrap(), "10.0.0.1".parse().unwrap()];
        let out = cidr_merge(&addrs).unwrap();
        assert_eq!(out, nets(&["10.0.0.0/31"]));
    }

    #[test]
    fn test_iter_unique_ips() {
        let ips: Vec<String> = iter_unique_ips(nets(&["10.0.0.0/31", "10.0.0.1", "10.0.0.2"]))
            .unwrap()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(ips, vec!["10.0.0.0", "10.0.0.1", "10.0.0.2"]);
    }
}
