//! IPv4/IPv6 addresses, CIDR networks and arbitrary ranges, with the set algebra to
//! merge, exclude, span and decompose them.

pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod well_known;

pub use error::AddrError;
pub use models::{
    cidr_abbrev_to_verbose, IpAddress, IpNetwork, IpRange, IpSpan, SortKey, Subnets, Version,
};
pub use processing::{
    all_matching_cidrs, cidr_exclude, cidr_merge, find_gaps, iprange_to_cidrs, iter_iprange,
    iter_unique_ips, largest_matching_cidr, smallest_matching_cidr, spanning_cidr, summary_rows,
    IpIter, SummaryRow,
};

/// Parse command line style items: networks, bare addresses, `start-end` ranges and
/// classful abbreviations such as `10.0`.
///
/// A range turns into its CIDR blocks; abbreviations are only tried when the text is not
/// already a valid network.
pub fn parse_items<S: AsRef<str>>(items: &[S]) -> Result<Vec<IpNetwork>, AddrError> {
    let mut nets = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if item.contains('-') {
            let range: IpRange = item.parse()?;
            nets.extend(range.cidrs()?);
            continue;
        }
        let net = match item.parse::<IpNetwork>() {
            Ok(net) => net,
            Err(e) => {
                log::trace!("{item:?} is not a network ({e}), trying classful abbreviation");
                IpNetwork::parse_abbrev(item).map_err(|_| e)?
            }
        };
        nets.push(net);
    }
    log::debug!("parse_items() {} items -> {} networks", items.len(), nets.len());
    Ok(nets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let nets = parse_items(&["192.0.2.0/24", "10.0", "10.0.0.1", "192.0.3.1-192.0.3.2"]).unwrap();
        let out: Vec<String> = nets.iter().map(|n| n.to_string()).collect();
        assert_eq!(
            out,
            vec!["192.0.2.0/24", "10.0.0.0/8", "10.0.0.1/32", "192.0.3.1/32", "192.0.3.2/32"]
        );
    }

    #[test]
    fn test_parse_items_errors() {
        assert!(matches!(parse_items(&["nonsense"]), Err(AddrError::Format(_))));
        assert!(matches!(
            parse_items(&["10.0.0.1-::1"]),
            Err(AddrError::VersionMismatch(_))
        ));
        assert!(parse_items::<&str>(&[]).unwrap().is_empty());
    }
}
