//! IPv4 and IPv6 networks in CIDR notation.
//!
//! Provides [`IpNetwork`], an address plus a prefix length. The address keeps any host
//! bits it was written with; [`IpNetwork::cidr`] strips them.

use super::abbrev::cidr_abbrev_to_verbose;
use super::range::{index_of, slice_of};
use super::span::{net_size_bits, IpSpan, SortKey};
use super::{IpAddress, Version};
use crate::error::AddrError;
use crate::processing::IpIter;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Address plus prefix length.
///
/// Equality and hashing use `(version, first, last)`, so `10.0.0.1/24 == 10.0.0.0/24`.
#[derive(Debug, Clone, Copy)]
pub struct IpNetwork {
    version: Version,
    value: u128,
    prefixlen: u8,
}

/// Parse a prefix given as an integer length, a netmask or an ACL style hostmask.
fn parse_prefix(text: &str, version: Version) -> Result<u8, AddrError> {
    let text = text.trim();
    if let Ok(len) = text.parse::<i64>() {
        return if (0..=i64::from(version.width())).contains(&len) {
            Ok(len as u8)
        } else {
            Err(AddrError::Format(format!(
                "CIDR prefix /{len} out of range for {version}"
            )))
        };
    }
    let mask = IpAddress::parse_with(text, version)?;
    if mask.is_netmask() {
        Ok(mask.netmask_bits())
    } else if mask.is_hostmask() {
        let netmask = IpAddress::from_parts(version.max_int() ^ mask.value(), version);
        Ok(netmask.netmask_bits())
    } else {
        Err(AddrError::Format(format!(
            "CIDR prefix mask {mask} is invalid"
        )))
    }
}

impl IpNetwork {
    /// Build from an integer address and a prefix length.
    pub fn new(value: u128, prefixlen: u8, version: Version) -> Result<IpNetwork, AddrError> {
        if prefixlen > version.width() {
            return Err(AddrError::Format(format!(
                "CIDR prefix /{prefixlen} out of range for {version}"
            )));
        }
        Ok(IpNetwork {
            version,
            value: version.check(value)?,
            prefixlen,
        })
    }

    /// Caller guarantees both parts are in range.
    pub(crate) fn from_parts(value: u128, prefixlen: u8, version: Version) -> IpNetwork {
        debug_assert!(value <= version.max_int() && prefixlen <= version.width());
        IpNetwork {
            version,
            value,
            prefixlen,
        }
    }

    /// Parse `addr/prefix`, `addr/netmask`, `addr/hostmask` or a bare address with an
    /// explicit version.
    pub fn parse_with(text: &str, version: Version) -> Result<IpNetwork, AddrError> {
        let (addr, prefix) = split_cidr(text)?;
        let addr = IpAddress::parse_with(addr, version)?;
        let prefixlen = match prefix {
            Some(p) => parse_prefix(p, version)?,
            None => version.width(),
        };
        Ok(IpNetwork::from_parts(addr.value(), prefixlen, version))
    }

    /// Parse with IPv4 classful defaults for abbreviated input, e.g. `10` is
    /// `10.0.0.0/8` and `192.168` is `192.168.0.0/24`.
    pub fn parse_abbrev(text: &str) -> Result<IpNetwork, AddrError> {
        cidr_abbrev_to_verbose(text).parse()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// The literal address value, host bits included.
    pub fn value(&self) -> u128 {
        self.value
    }

    pub fn prefixlen(&self) -> u8 {
        self.prefixlen
    }

    /// The literal address this network was written with.
    pub fn ip(&self) -> IpAddress {
        IpAddress::from_parts(self.value, self.version)
    }

    pub fn network(&self) -> IpAddress {
        IpAddress::from_parts(self.first(), self.version)
    }

    pub fn broadcast(&self) -> IpAddress {
        IpAddress::from_parts(self.last(), self.version)
    }

    pub fn netmask(&self) -> IpAddress {
        IpAddress::from_parts(self.version.netmask(self.prefixlen), self.version)
    }

    pub fn hostmask(&self) -> IpAddress {
        IpAddress::from_parts(self.version.hostmask(self.prefixlen), self.version)
    }

    /// Canonical form with host bits cleared.
    pub fn cidr(&self) -> IpNetwork {
        IpNetwork::from_parts(self.first(), self.prefixlen, self.version)
    }

    /// In-place prefix change.
    pub fn set_prefixlen(&mut self, prefixlen: u8) -> Result<(), AddrError> {
        if prefixlen > self.version.width() {
            return Err(AddrError::Format(format!(
                "CIDR prefix /{prefixlen} out of range for {}",
                self.version
            )));
        }
        self.prefixlen = prefixlen;
        Ok(())
    }

    /// In-place prefix change from a length, netmask or hostmask string.
    pub fn set_prefix(&mut self, prefix: &str) -> Result<(), AddrError> {
        self.prefixlen = parse_prefix(prefix, self.version)?;
        Ok(())
    }

    /// Move forward by `num` whole blocks, in place. The value becomes network aligned.
    pub fn increment(&mut self, num: u128) -> Result<(), AddrError> {
        let offset = self.block_offset(num)?;
        let hostmask = self.version.hostmask(self.prefixlen);
        self.value = self
            .first()
            .checked_add(offset)
            .filter(|v| {
                v.checked_add(hostmask)
                    .map_or(false, |last| last <= self.version.max_int())
            })
            .ok_or_else(|| AddrError::Boundary("increment exceeds address boundary".to_string()))?;
        Ok(())
    }

    /// Move back by `num` whole blocks, in place. The value becomes network aligned.
    pub fn decrement(&mut self, num: u128) -> Result<(), AddrError> {
        let offset = self.block_offset(num)?;
        self.value = self
            .first()
            .checked_sub(offset)
            .ok_or_else(|| AddrError::Boundary("decrement is less than zero".to_string()))?;
        Ok(())
    }

    fn block_offset(&self, num: u128) -> Result<u128, AddrError> {
        if num == 0 {
            return Ok(0);
        }
        let shift = u32::from(self.version.width() - self.prefixlen);
        (shift < 128)
            .then(|| num.checked_mul(1u128 << shift))
            .flatten()
            .ok_or_else(|| {
                AddrError::Boundary(format!("{num} blocks of {self} exceed the address space"))
            })
    }

    /// The network `step` blocks after this one.
    pub fn next(&self, step: u128) -> Result<IpNetwork, AddrError> {
        let mut copy = self.cidr();
        copy.increment(step)?;
        Ok(copy)
    }

    /// The network `step` blocks before this one.
    pub fn previous(&self, step: u128) -> Result<IpNetwork, AddrError> {
        let mut copy = self.cidr();
        copy.decrement(step)?;
        Ok(copy)
    }

    /// Every enclosing network from `/min_prefixlen` up to, not including, this one,
    /// least specific first.
    pub fn supernet(&self, min_prefixlen: u8) -> Result<Vec<IpNetwork>, AddrError> {
        if min_prefixlen > self.version.width() {
            return Err(AddrError::Value(format!(
                "CIDR prefix /{min_prefixlen} invalid for {}",
                self.version
            )));
        }
        let mut supernet = self.cidr();
        let mut supernets = Vec::new();
        while supernet.prefixlen > min_prefixlen {
            supernet.prefixlen -= 1;
            supernet = supernet.cidr();
            supernets.push(supernet);
        }
        supernets.reverse();
        Ok(supernets)
    }

    /// The first `count` (default: all) subnets of size `/new_prefixlen`.
    pub fn subnet(&self, new_prefixlen: u8, count: Option<u128>) -> Result<Subnets, AddrError> {
        let width = self.version.width();
        if new_prefixlen > width {
            return Err(AddrError::Value(format!(
                "CIDR prefix /{new_prefixlen} invalid for {}",
                self.version
            )));
        }
        if new_prefixlen < self.prefixlen {
            return Err(AddrError::Value(format!(
                "/{new_prefixlen} is wider than {self}, subnets must have a prefix of at least /{}",
                self.prefixlen
            )));
        }
        let available = match u32::from(new_prefixlen - self.prefixlen) {
            bits if bits >= 128 => u128::MAX,
            bits => 1u128 << bits,
        };
        let count = count.unwrap_or(available);
        if count < 1 || count > available {
            return Err(AddrError::Boundary(format!(
                "count {count} outside of {self} subnet boundary ({available} available)"
            )));
        }
        Ok(Subnets {
            version: self.version,
            base: self.first(),
            prefixlen: new_prefixlen,
            index: 0,
            count,
        })
    }

    /// All addresses from network to broadcast.
    pub fn iter(&self) -> IpIter {
        IpIter::new(self.version, self.first(), self.last(), 1)
    }

    /// Usable host addresses.
    ///
    /// IPv4 drops the network and broadcast addresses (nothing for blocks under 4
    /// addresses); IPv6 only drops `::` when the block starts at zero.
    pub fn iter_hosts(&self) -> IpIter {
        let (first, last) = (self.first(), self.last());
        match self.version {
            Version::V4 if self.size() >= 4 => IpIter::new(self.version, first + 1, last - 1, 1),
            Version::V4 => IpIter::empty(self.version),
            Version::V6 if first == 0 && last == 0 => IpIter::empty(self.version),
            Version::V6 if first == 0 => IpIter::new(self.version, 1, last, 1),
            Version::V6 => self.iter(),
        }
    }

    /// Address at `index`; negative indices count back from the broadcast address.
    pub fn get(&self, index: i128) -> Result<IpAddress, AddrError> {
        index_of(self, index)
    }

    /// Lazy `[start:stop:step]` slice. IPv6 networks cannot be sliced.
    pub fn slice(
        &self,
        start: Option<i128>,
        stop: Option<i128>,
        step: Option<i128>,
    ) -> Result<IpIter, AddrError> {
        slice_of(self, start, stop, step)
    }

    /// Numerically equivalent IPv4 network, prefix shortened by 96 bits.
    pub fn to_v4(&self) -> Result<IpNetwork, AddrError> {
        match self.version {
            Version::V4 => Ok(*self),
            Version::V6 => {
                let addr = self.ip().to_v4()?;
                let prefixlen = self.prefixlen.checked_sub(96).ok_or_else(|| {
                    AddrError::Conversion(format!(
                        "{self} is wider than an IPv4 network can represent"
                    ))
                })?;
                Ok(IpNetwork::from_parts(addr.value(), prefixlen, Version::V4))
            }
        }
    }

    /// IPv4-mapped IPv6 equivalent, prefix lengthened by 96 bits.
    pub fn to_v6(&self) -> IpNetwork {
        match self.version {
            Version::V4 => {
                IpNetwork::from_parts(self.ip().to_v6().value(), self.prefixlen + 96, Version::V6)
            }
            Version::V6 => *self,
        }
    }

    /// IPv4-compatible IPv6 equivalent, prefix lengthened by 96 bits.
    pub fn to_v6_compat(&self) -> IpNetwork {
        match self.version {
            Version::V4 => IpNetwork::from_parts(self.value, self.prefixlen + 96, Version::V6),
            Version::V6 => *self,
        }
    }

    /// Full ordering key, host bits included.
    pub fn sort_key(&self) -> SortKey {
        SortKey {
            version: self.version,
            first: self.first(),
            net_size_bits: net_size_bits(self),
            host_bits: self.value - self.first(),
        }
    }
}

/// Split `addr/prefix`; more than one `/` is a format error.
fn split_cidr(text: &str) -> Result<(&str, Option<&str>), AddrError> {
    let mut parts = text.trim().split('/');
    let addr = parts.next().unwrap_or_default();
    let prefix = parts.next();
    if parts.next().is_some() {
        return Err(AddrError::Format(format!("invalid address/prefix {text:?}")));
    }
    Ok((addr, prefix))
}

impl IpSpan for IpNetwork {
    fn version(&self) -> Version {
        self.version
    }

    fn first(&self) -> u128 {
        self.value & self.version.netmask(self.prefixlen)
    }

    fn last(&self) -> u128 {
        self.value | self.version.hostmask(self.prefixlen)
    }
}

impl PartialEq for IpNetwork {
    fn eq(&self, other: &IpNetwork) -> bool {
        (self.version, self.first(), self.last()) == (other.version, other.first(), other.last())
    }
}

impl Eq for IpNetwork {}

impl Hash for IpNetwork {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.version, self.first(), self.last()).hash(state);
    }
}

impl PartialOrd for IpNetwork {
    fn partial_cmp(&self, other: &IpNetwork) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IpNetwork {
    /// `(version, first, prefixlen)`: wider blocks first at an equal start.
    fn cmp(&self, other: &IpNetwork) -> Ordering {
        (self.version, self.first(), self.prefixlen).cmp(&(other.version, other.first(), other.prefixlen))
    }
}

impl PartialEq<IpAddress> for IpNetwork {
    fn eq(&self, _other: &IpAddress) -> bool {
        false
    }
}

impl PartialOrd<IpAddress> for IpNetwork {
    fn partial_cmp(&self, other: &IpAddress) -> Option<Ordering> {
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

impl From<IpAddress> for IpNetwork {
    /// A bare address is a full width network.
    fn from(addr: IpAddress) -> Self {
        IpNetwork::from_parts(addr.value(), addr.version().width(), addr.version())
    }
}

impl From<&IpNetwork> for IpNetwork {
    fn from(net: &IpNetwork) -> Self {
        *net
    }
}

impl From<&IpAddress> for IpNetwork {
    fn from(addr: &IpAddress) -> Self {
        IpNetwork::from(*addr)
    }
}

impl<'a> IntoIterator for &'a IpNetwork {
    type Item = IpAddress;
    type IntoIter = IpIter;

    fn into_iter(self) -> IpIter {
        self.iter()
    }
}

impl FromStr for IpNetwork {
    type Err = AddrError;

    /// Detects the version from the address part.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = split_cidr(s)?;
        let addr: IpAddress = addr.parse()?;
        let version = addr.version();
        let prefixlen = match prefix {
            Some(p) => parse_prefix(p, version)?,
            None => version.width(),
        };
        Ok(IpNetwork::from_parts(addr.value(), prefixlen, version))
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.ip(), self.prefixlen)
    }
}

impl Serialize for IpNetwork {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpNetwork {
    fn deserialize<D>(deserializer: D) -> Result<IpNetwork, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpNetwork::from_str(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

/// Lazy sequence of equal sized subnets, see [`IpNetwork::subnet`].
#[derive(Debug, Clone)]
pub struct Subnets {
    version: Version,
    base: u128,
    prefixlen: u8,
    index: u128,
    count: u128,
}

impl Iterator for Subnets {
    type Item = IpNetwork;

    fn next(&mut self) -> Option<IpNetwork> {
        if self.index >= self.count {
            return None;
        }
        let shift = u32::from(self.version.width() - self.prefixlen);
        // index < 2^(new - old prefix), so the shifted offset stays inside the parent
        let offset = self.index.checked_shl(shift).unwrap_or(0);
        self.index += 1;
        Some(IpNetwork::from_parts(self.base + offset, self.prefixlen, self.version))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.count - self.index) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNetwork {
        s.parse().unwrap()
    }

    fn addr(s: &str) -> IpAddress {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_forms() {
        let n = net("192.0.2.0/24");
        assert_eq!(n.prefixlen(), 24);
        assert_eq!(net("192.0.2.0/255.255.255.0"), n);
        assert_eq!(net("192.0.2.0/0.0.0.255"), n);
        assert_eq!(net("192.0.2.1").prefixlen(), 32);
        assert_eq!(net("fe80::/10").prefixlen(), 10);
        assert_eq!(net("fe80::/ffc0::").prefixlen(), 10);
        assert_eq!(net("::/0").prefixlen(), 0);
        assert!(matches!(
            "192.0.2.0/33".parse::<IpNetwork>(),
            Err(AddrError::Format(_))
        ));
        assert!(matches!(
            "192.0.2.0/-1".parse::<IpNetwork>(),
            Err(AddrError::Format(_))
        ));
        assert!(matches!(
            "192.0.2.0/255.0.255.0".parse::<IpNetwork>(),
            Err(AddrError::Format(_))
        ));
        assert!("192.0.2.0/24/1".parse::<IpNetwork>().is_err());
        assert!("192.0.2.0/::ffff".parse::<IpNetwork>().is_err());
        assert!(IpNetwork::parse_with("192.0.2.0/24", Version::V6).is_err());
        assert_eq!(
            IpNetwork::parse_with("1/128", Version::V6).unwrap().to_string(),
            "::1/128"
        );
        assert!(IpNetwork::new(0, 33, Version::V4).is_err());
    }

    #[test]
    fn test_parse_abbrev() {
        assert_eq!(IpNetwork::parse_abbrev("10").unwrap(), net("10.0.0.0/8"));
        assert_eq!(
            IpNetwork::parse_abbrev("192.168").unwrap().to_string(),
            "192.168.0.0/24"
        );
        assert_eq!(
            IpNetwork::parse_abbrev("10/16").unwrap().to_string(),
            "10.0.0.0/16"
        );
    }

    #[test]
    fn test_derived_quantities() {
        let n = net("192.0.2.77/24");
        assert_eq!(n.ip(), addr("192.0.2.77"));
        assert_eq!(n.network(), addr("192.0.2.0"));
        assert_eq!(n.broadcast(), addr("192.0.2.255"));
        assert_eq!(n.netmask(), addr("255.255.255.0"));
        assert_eq!(n.hostmask(), addr("0.0.0.255"));
        assert_eq!(n.size(), 256);
        assert_eq!(n.cidr().to_string(), "192.0.2.0/24");
        assert_eq!(n.to_string(), "192.0.2.77/24");
        assert_eq!(n.network() | n.hostmask(), n.broadcast());
        assert_eq!(n.last() - n.first() + 1, n.size());
        let all = net("::/0");
        assert_eq!(all.first(), 0);
        assert_eq!(all.last(), u128::MAX);
        assert_eq!(net("0.0.0.0/0").size(), 1 << 32);
    }

    #[test]
    fn test_identity_and_order() {
        assert_eq!(net("10.0.0.1/24"), net("10.0.0.0/24"));
        assert_ne!(net("10.0.0.0/24"), net("10.0.0.0/25"));
        let mut nets = vec![net("10.0.0.0/24"), net("10.0.0.0/8"), net("9.0.0.0/8"), net("::/0")];
        nets.sort();
        assert_eq!(
            nets,
            vec![net("9.0.0.0/8"), net("10.0.0.0/8"), net("10.0.0.0/24"), net("::/0")]
        );
        assert!(net("10.0.0.0/24").sort_key() < net("10.0.0.1/24").sort_key());
        assert!(net("10.0.0.0/32") < addr("10.0.0.0"));
        let set: std::collections::HashSet<IpNetwork> =
            [net("10.0.0.1/24"), net("10.0.0.0/24")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration() {
        let n = net("10.0.0.0/30");
        let all: Vec<String> = n.iter().map(|a| a.to_string()).collect();
        assert_eq!(all, vec!["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        let hosts: Vec<String> = n.iter_hosts().map(|a| a.to_string()).collect();
        assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(net("10.0.0.0/31").iter_hosts().count(), 0);
        assert_eq!((&n).into_iter().count(), 4);
    }

    #[test]
    fn test_iter_hosts_v6() {
        let hosts: Vec<String> = net("::/126").iter_hosts().map(|a| a.to_string()).collect();
        assert_eq!(hosts, vec!["::1", "::2", "::3"]);
        assert_eq!(net("::/128").iter_hosts().count(), 0);
        assert_eq!(net("fe80::/126").iter_hosts().count(), 4);
    }

    #[test]
    fn test_index_and_slice() {
        let n = net("192.0.2.0/24");
        assert_eq!(n.get(0).unwrap(), addr("192.0.2.0"));
        assert_eq!(n.get(-1).unwrap(), addr("192.0.2.255"));
        assert_eq!(n.get(255).unwrap(), addr("192.0.2.255"));
        assert!(matches!(n.get(256), Err(AddrError::Boundary(_))));
        let picked: Vec<String> = n
            .slice(Some(0), Some(10), Some(4))
            .unwrap()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(picked, vec!["192.0.2.0", "192.0.2.4", "192.0.2.8"]);
        let tail: Vec<String> = n
            .slice(Some(-2), None, None)
            .unwrap()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(tail, vec!["192.0.2.254", "192.0.2.255"]);
        assert!(matches!(
            net("fe80::/64").slice(None, None, None),
            Err(AddrError::Unsupported(_))
        ));
        assert_eq!(net("fe80::/64").get(-1).unwrap().to_string(), "fe80::ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_next_previous() {
        let n = net("192.0.2.77/24");
        assert_eq!(n.next(1).unwrap(), net("192.0.3.0/24"));
        assert_eq!(n.next(1).unwrap().to_string(), "192.0.3.0/24");
        assert_eq!(n.previous(2).unwrap(), net("192.0.0.0/24"));
        assert!(matches!(
            net("255.255.255.0/24").next(1),
            Err(AddrError::Boundary(_))
        ));
        assert!(matches!(
            net("0.0.0.0/24").previous(1),
            Err(AddrError::Boundary(_))
        ));
        assert!(net("::/0").next(1).is_err());
        assert_eq!(net("::/0").next(0).unwrap(), net("::/0"));
    }

    #[test]
    fn test_in_place() {
        let mut n = net("10.0.0.5/24");
        n.increment(2).unwrap();
        assert_eq!(n.to_string(), "10.0.2.0/24");
        n.decrement(1).unwrap();
        assert_eq!(n.to_string(), "10.0.1.0/24");
        n.set_prefixlen(16).unwrap();
        assert_eq!(n.cidr().to_string(), "10.0.0.0/16");
        n.set_prefix("255.255.255.128").unwrap();
        assert_eq!(n.prefixlen(), 25);
        assert!(n.set_prefixlen(33).is_err());
        assert!(n.set_prefix("255.0.255.0").is_err());
    }

    #[test]
    fn test_supernet() {
        let n = net("192.0.2.114/29");
        let supers: Vec<String> = n.supernet(24).unwrap().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            supers,
            vec![
                "192.0.2.0/24",
                "192.0.2.0/25",
                "192.0.2.64/26",
                "192.0.2.96/27",
                "192.0.2.112/28"
            ]
        );
        assert_eq!(n.supernet(0).unwrap().len(), 29);
        assert!(n.supernet(29).unwrap().is_empty());
        assert!(matches!(n.supernet(33), Err(AddrError::Value(_))));
    }

    #[test]
    fn test_subnet() {
        let n = net("172.24.0.0/16");
        let subs: Vec<String> = n
            .subnet(18, None)
            .unwrap()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            subs,
            vec!["172.24.0.0/18", "172.24.64.0/18", "172.24.128.0/18", "172.24.192.0/18"]
        );
        let two: Vec<IpNetwork> = n.subnet(24, Some(2)).unwrap().collect();
        assert_eq!(two, vec![net("172.24.0.0/24"), net("172.24.1.0/24")]);
        assert_eq!(n.subnet(16, None).unwrap().count(), 1);
        assert!(matches!(n.subnet(8, None), Err(AddrError::Value(_))));
        assert!(matches!(n.subnet(18, Some(5)), Err(AddrError::Boundary(_))));
        assert!(matches!(n.subnet(18, Some(0)), Err(AddrError::Boundary(_))));
        assert!(matches!(n.subnet(33, None), Err(AddrError::Value(_))));
        let first = net("::/0").subnet(128, Some(3)).unwrap();
        let lazy = first.clone();
        assert_eq!(first.map(|s| s.to_string()).collect::<Vec<_>>(), vec!["::/128", "::1/128", "::2/128"]);
        assert_eq!(lazy.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_version_conversion() {
        let n = net("192.0.2.0/24");
        assert_eq!(n.to_v6().to_string(), "::ffff:192.0.2.0/120");
        assert_eq!(n.to_v6_compat().prefixlen(), 120);
        assert_eq!(n.to_v6().to_v4().unwrap(), n);
        assert_eq!(n.to_v6_compat().to_v4().unwrap(), n);
        assert!(matches!(
            net("::ffff:0:0/64").to_v4(),
            Err(AddrError::Conversion(_))
        ));
        assert!(net("2001:db8::/120").to_v4().is_err());
    }

    #[test]
    fn test_serde() {
        let n = net("192.0.2.0/24");
        let json = serde_json::to_string(&vec![n]).unwrap();
        assert_eq!(json, "[\"192.0.2.0/24\"]");
        let back: Vec<IpNetwork> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![n]);
        assert!(serde_json::from_str::<IpNetwork>("\"10.0.0.0/40\"").is_err());
    }
}
