//! Removing one block from another.

use crate::error::AddrError;
use crate::models::{IpNetwork, IpSpan};

/// Networks left over after cutting `exclude` out of `target`, sorted.
///
/// `target` is halved repeatedly; at each level the half without `exclude` is kept and the
/// other half is split again, down to the prefix length of `exclude`. Blocks that do not
/// overlap return `target` (host bits cleared) untouched.
pub fn cidr_exclude<T, E>(target: T, exclude: E) -> Result<Vec<IpNetwork>, AddrError>
where
    T: Into<IpNetwork>,
    E: Into<IpNetwork>,
{
    let target = target.into();
    let exclude = exclude.into();
    let version = target.version();
    if exclude.version() != version {
        return Err(AddrError::mismatch(target, exclude));
    }
    if !target.overlaps(&exclude) {
        return Ok(vec![target.cidr()]);
    }

    let width = version.width();
    let mut cidrs = Vec::new();
    let mut new_prefixlen = target.prefixlen() + 1;
    let mut base = target.first();
    while new_prefixlen <= width && exclude.prefixlen() >= new_prefixlen {
        let half = 1u128 << u32::from(width - new_prefixlen);
        let lower = IpNetwork::from_parts(base, new_prefixlen, version);
        let upper = IpNetwork::from_parts(base + half, new_prefixlen, version);
        let (matched, unmatched) = if lower.contains(&exclude) {
            (lower, upper)
        } else if upper.contains(&exclude) {
            (upper, lower)
        } else {
            cidrs.push(target.cidr());
            break;
        };
        cidrs.push(unmatched);
        base = matched.first();
        new_prefixlen += 1;
    }
    cidrs.sort_by_key(|c| c.sort_key());
    log::debug!("cidr_exclude({target}, {exclude}) -> {} blocks", cidrs.len());
    Ok(cidrs)
}
