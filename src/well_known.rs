//! Well-known IANA address blocks, built once per process.

use crate::models::{IpAddress, IpNetwork, IpRange, IpSpan, Version};
use lazy_static::lazy_static;

/// An entry of a well-known table: either a CIDR block or an arbitrary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownBlock {
    Network(IpNetwork),
    Range(IpRange),
}

impl IpSpan for KnownBlock {
    fn version(&self) -> Version {
        match self {
            KnownBlock::Network(n) => n.version(),
            KnownBlock::Range(r) => IpSpan::version(r),
        }
    }

    fn first(&self) -> u128 {
        match self {
            KnownBlock::Network(n) => n.first(),
            KnownBlock::Range(r) => r.first(),
        }
    }

    fn last(&self) -> u128 {
        match self {
            KnownBlock::Network(n) => n.last(),
            KnownBlock::Range(r) => r.last(),
        }
    }
}

fn net(cidr: &str) -> IpNetwork {
    cidr.parse().expect("Invalid well-known CIDR?")
}

fn block(cidr: &str) -> KnownBlock {
    KnownBlock::Network(net(cidr))
}

fn range(start: &str, end: &str) -> KnownBlock {
    let start: IpAddress = start.parse().expect("Invalid well-known address?");
    let end: IpAddress = end.parse().expect("Invalid well-known address?");
    KnownBlock::Range(IpRange::new(start, end).expect("Invalid well-known range?"))
}

lazy_static! {
    pub static ref IPV4_LOOPBACK: IpNetwork = net("127.0.0.0/8");
    pub static ref IPV4_PRIVATE: Vec<KnownBlock> = vec![
        block("10.0.0.0/8"),
        block("172.16.0.0/12"),
        block("192.0.2.0/24"),
        block("192.168.0.0/16"),
        range("239.0.0.0", "239.255.255.255"),
    ];
    pub static ref IPV4_LINK_LOCAL: IpNetwork = net("169.254.0.0/16");
    pub static ref IPV4_MULTICAST: IpNetwork = net("224.0.0.0/4");
    /// 6to4 relay anycast, RFC 3068.
    pub static ref IPV4_6TO4: IpNetwork = net("192.88.99.0/24");
    pub static ref IPV4_RESERVED: Vec<KnownBlock> = vec![
        block("39.0.0.0/8"),
        block("128.0.0.0/16"),
        block("191.255.0.0/16"),
        block("192.0.0.0/24"),
        block("223.255.255.0/24"),
        block("240.0.0.0/4"),
        range("234.0.0.0", "238.255.255.255"),
        range("225.0.0.0", "231.255.255.255"),
    ];

    pub static ref IPV6_LOOPBACK: IpAddress = "::1".parse().expect("Invalid well-known address?");
    pub static ref IPV6_PRIVATE: Vec<KnownBlock> = vec![
        block("fc00::/7"),
        block("fec0::/10"),
    ];
    pub static ref IPV6_LINK_LOCAL: IpNetwork = net("fe80::/10");
    pub static ref IPV6_MULTICAST: IpNetwork = net("ff00::/8");
    pub static ref IPV6_RESERVED: Vec<KnownBlock> = vec![
        block("ff00::/12"),
        block("::/8"),
        block("100::/8"),
        block("200::/7"),
        block("400::/6"),
        block("800::/5"),
        block("1000::/4"),
        block("4000::/3"),
        block("6000::/3"),
        block("8000::/3"),
        block("a000::/3"),
        block("c000::/3"),
        block("e000::/4"),
        block("f000::/5"),
        block("f800::/6"),
        block("fe00::/9"),
    ];
}
