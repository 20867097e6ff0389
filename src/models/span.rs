//! Behaviour shared by addresses, networks and ranges.
//!
//! Anything that covers a contiguous block of one address space implements [`IpSpan`];
//! containment and the well-known classification predicates are defined once on top of it.

use super::Version;
use crate::well_known::{
    IPV4_LINK_LOCAL, IPV4_LOOPBACK, IPV4_MULTICAST, IPV4_PRIVATE, IPV4_RESERVED,
    IPV6_LINK_LOCAL, IPV6_LOOPBACK, IPV6_MULTICAST, IPV6_PRIVATE, IPV6_RESERVED,
};

/// Ordering key used to sort addresses and networks together.
///
/// At equal `first` a wider block sorts before a narrower one, a bare address sorts
/// after every network starting at the same point, and a network written with host
/// bits sorts after the pure network of the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub version: Version,
    pub first: u128,
    /// `width - bit_length(size)`; a bare address uses the full width.
    pub net_size_bits: i16,
    /// Offset of the literal value from `first`.
    pub host_bits: u128,
}

/// A contiguous block of addresses within one version.
pub trait IpSpan {
    fn version(&self) -> Version;

    /// Integer value of the lowest address covered.
    fn first(&self) -> u128;

    /// Integer value of the highest address covered.
    fn last(&self) -> u128;

    /// Number of addresses covered. The whole IPv6 space saturates at `u128::MAX`.
    fn size(&self) -> u128 {
        (self.last() - self.first()).saturating_add(1)
    }

    /// Bit length of [`IpSpan::size`], exact even for the whole IPv6 space.
    fn size_bits(&self) -> u32 {
        let span = self.last() - self.first();
        if span == u128::MAX {
            129
        } else {
            128 - (span + 1).leading_zeros()
        }
    }

    /// True if `other` falls entirely within this block. Different versions never match.
    fn contains<S: IpSpan + ?Sized>(&self, other: &S) -> bool {
        self.version() == other.version()
            && other.first() >= self.first()
            && other.last() <= self.last()
    }

    /// True if the two blocks share at least one address.
    fn overlaps<S: IpSpan + ?Sized>(&self, other: &S) -> bool {
        self.version() == other.version()
            && other.first() <= self.last()
            && other.last() >= self.first()
    }

    fn is_multicast(&self) -> bool {
        match self.version() {
            Version::V4 => IPV4_MULTICAST.contains(self),
            Version::V6 => IPV6_MULTICAST.contains(self),
        }
    }

    fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// Loopback block, RFC 3330 and 4291.
    fn is_loopback(&self) -> bool {
        match self.version() {
            Version::V4 => IPV4_LOOPBACK.contains(self),
            Version::V6 => IPV6_LOOPBACK.contains(self),
        }
    }

    /// Link-local block, RFC 3927 and 4291.
    fn is_link_local(&self) -> bool {
        match self.version() {
            Version::V4 => IPV4_LINK_LOCAL.contains(self),
            Version::V6 => IPV6_LINK_LOCAL.contains(self),
        }
    }

    /// Internal use only (RFC 1918, 3330, 4193, 3879, 2365), link-local included.
    fn is_private(&self) -> bool {
        let table = match self.version() {
            Version::V4 => &*IPV4_PRIVATE,
            Version::V6 => &*IPV6_PRIVATE,
        };
        table.iter().any(|block| block.contains(self)) || self.is_link_local()
    }

    /// IANA reserved block, RFC 3330 and 3171.
    fn is_reserved(&self) -> bool {
        let table = match self.version() {
            Version::V4 => &*IPV4_RESERVED,
            Version::V6 => &*IPV6_RESERVED,
        };
        table.iter().any(|block| block.contains(self))
    }
}

/// `width - bit_length(size)` for any span.
pub(crate) fn net_size_bits<S: IpSpan + ?Sized>(span: &S) -> i16 {
    i16::from(span.version().width()) - span.size_bits() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IpAddress, IpNetwork, IpRange};

    fn net(s: &str) -> IpNetwork {
        s.parse().unwrap()
    }

    fn addr(s: &str) -> IpAddress {
        s.parse().unwrap()
    }

    #[test]
    fn test_size_bits() {
        assert_eq!(net("10.0.0.0/24").size_bits(), 9);
        assert_eq!(net("10.0.0.1/32").size_bits(), 1);
        assert_eq!(net("0.0.0.0/0").size_bits(), 33);
        assert_eq!(net("::/0").size_bits(), 129);
        assert_eq!(net("::/0").size(), u128::MAX);
        assert_eq!(net_size_bits(&net("::/0")), -1);
        assert_eq!(net_size_bits(&net("10.0.0.0/8")), 7);
    }

    #[test]
    fn test_contains_and_overlaps() {
        let n = net("192.0.2.0/24");
        assert!(n.contains(&addr("192.0.2.200")));
        assert!(!n.contains(&addr("192.0.3.0")));
        assert!(n.contains(&net("192.0.2.128/25")));
        assert!(!n.contains(&net("192.0.2.0/23")));
        assert!(n.overlaps(&net("192.0.2.0/23")));
        assert!(!n.contains(&addr("::ffff:192.0.2.1")));
        let r = IpRange::new(addr("192.0.2.10"), addr("192.0.2.20")).unwrap();
        assert!(n.contains(&r));
        assert!(r.contains(&addr("192.0.2.15")));
        assert!(!r.contains(&n));
    }

    #[test]
    fn test_classification_v4() {
        assert!(addr("127.0.0.1").is_loopback());
        assert!(addr("10.1.2.3").is_private());
        assert!(addr("172.31.255.255").is_private());
        assert!(!addr("172.32.0.0").is_private());
        assert!(addr("239.1.1.1").is_private());
        assert!(addr("169.254.0.1").is_link_local());
        assert!(addr("169.254.0.1").is_private());
        assert!(addr("224.0.0.1").is_multicast());
        assert!(!addr("224.0.0.1").is_unicast());
        assert!(addr("8.8.8.8").is_unicast());
        assert!(addr("240.0.0.1").is_reserved());
        assert!(addr("226.0.0.1").is_reserved());
        assert!(!addr("8.8.8.8").is_reserved());
        assert!(net("10.20.0.0/16").is_private());
        assert!(!net("10.0.0.0/7").is_private());
    }

    #[test]
    fn test_classification_v6() {
        assert!(addr("::1").is_loopback());
        assert!(!addr("::2").is_loopback());
        assert!(addr("fe80::1").is_link_local());
        assert!(addr("fe80::1").is_private());
        assert!(addr("fd00::1").is_private());
        assert!(addr("ff02::1").is_multicast());
        assert!(addr("ff02::1").is_reserved());
        assert!(addr("2001:db8::1").is_unicast());
        assert!(!addr("2001:db8::1").is_private());
        assert!(addr("::1").is_reserved());
    }

    #[test]
    fn test_sort_key_order() {
        let wide = net("10.0.0.0/8").sort_key();
        let narrow = net("10.0.0.0/24").sort_key();
        let host = net("10.0.0.1/24").sort_key();
        let bare = addr("10.0.0.0").sort_key();
        assert!(wide < narrow);
        assert!(narrow < host);
        assert!(host < bare);
        assert!(net("10.0.0.0/32").sort_key() < bare);
    }
}
