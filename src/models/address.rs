//! Single IPv4 or IPv6 address without a prefix.

use super::span::{IpSpan, SortKey};
use super::{IpNetwork, Version};
use crate::error::AddrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ops::{Add, BitAnd, BitOr, BitXor, Shl, Shr, Sub};
use std::str::FromStr;

/// Start of the IPv4-mapped IPv6 window, `::ffff:0.0.0.0`.
pub const IPV4_MAPPED_BASE: u128 = 0xffff_0000_0000;
/// End of the IPv4-mapped IPv6 window, `::ffff:255.255.255.255`.
pub const IPV4_MAPPED_LAST: u128 = 0xffff_ffff_ffff;

/// An immutable `(version, value)` pair.
///
/// The only mutation entry points are [`IpAddress::increment`] and
/// [`IpAddress::decrement`]; everything else returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IpAddress {
    version: Version,
    value: u128,
}

impl IpAddress {
    /// Build from an integer with an explicit version.
    pub fn new(value: u128, version: Version) -> Result<IpAddress, AddrError> {
        Ok(IpAddress {
            version,
            value: version.check(value)?,
        })
    }

    /// Caller guarantees `value <= version.max_int()`.
    pub(crate) fn from_parts(value: u128, version: Version) -> IpAddress {
        debug_assert!(value <= version.max_int());
        IpAddress { version, value }
    }

    /// Build from an integer, choosing IPv4 when the value fits in 32 bits.
    pub fn from_int(value: u128) -> IpAddress {
        let version = if value <= Version::V4.max_int() {
            Version::V4
        } else {
            Version::V6
        };
        IpAddress { version, value }
    }

    /// Parse text (or a decimal integer) as an address of the given version.
    pub fn parse_with(text: &str, version: Version) -> Result<IpAddress, AddrError> {
        reject_prefix(text)?;
        match version.str_to_int(text) {
            Ok(value) => Ok(IpAddress { version, value }),
            Err(_) => match text.trim().parse::<u128>() {
                Ok(value) => IpAddress::new(value, version),
                Err(_) => Err(AddrError::Format(format!(
                    "base address {text:?} is not {version}"
                ))),
            },
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn value(&self) -> u128 {
        self.value
    }

    /// New address `num` above this one.
    pub fn checked_add(&self, num: u128) -> Result<IpAddress, AddrError> {
        self.value
            .checked_add(num)
            .filter(|v| *v <= self.version.max_int())
            .map(|v| IpAddress::from_parts(v, self.version))
            .ok_or_else(|| self.out_of_bounds())
    }

    /// New address `num` below this one.
    pub fn checked_sub(&self, num: u128) -> Result<IpAddress, AddrError> {
        self.value
            .checked_sub(num)
            .map(|v| IpAddress::from_parts(v, self.version))
            .ok_or_else(|| self.out_of_bounds())
    }

    /// New address with value `num - self`.
    pub fn rsub(&self, num: u128) -> Result<IpAddress, AddrError> {
        num.checked_sub(self.value)
            .filter(|v| *v <= self.version.max_int())
            .map(|v| IpAddress::from_parts(v, self.version))
            .ok_or_else(|| self.out_of_bounds())
    }

    /// In-place `+=`. On failure the address is left unchanged.
    pub fn increment(&mut self, num: u128) -> Result<(), AddrError> {
        self.value = self.checked_add(num)?.value;
        Ok(())
    }

    /// In-place `-=`. On failure the address is left unchanged.
    pub fn decrement(&mut self, num: u128) -> Result<(), AddrError> {
        self.value = self.checked_sub(num)?.value;
        Ok(())
    }

    fn out_of_bounds(&self) -> AddrError {
        AddrError::Boundary(format!(
            "result outside valid {} address boundary",
            self.version
        ))
    }

    /// Numerically equivalent IPv4 address.
    ///
    /// IPv6 values convert when they sit in the low 32 bits (IPv4-compatible) or in the
    /// `::ffff:0:0/96` IPv4-mapped window.
    pub fn to_v4(&self) -> Result<IpAddress, AddrError> {
        let value = match self.version {
            Version::V4 => self.value,
            Version::V6 => match self.value {
                v if v <= Version::V4.max_int() => v,
                v if (IPV4_MAPPED_BASE..=IPV4_MAPPED_LAST).contains(&v) => v - IPV4_MAPPED_BASE,
                _ => {
                    return Err(AddrError::Conversion(format!(
                        "IPv6 address {self} unsuitable for conversion to IPv4"
                    )))
                }
            },
        };
        Ok(IpAddress::from_parts(value, Version::V4))
    }

    /// IPv4-mapped IPv6 equivalent (`::ffff:x.x.x.x`).
    pub fn to_v6(&self) -> IpAddress {
        match self.version {
            Version::V4 => IpAddress::from_parts(IPV4_MAPPED_BASE + self.value, Version::V6),
            Version::V6 => *self,
        }
    }

    /// IPv4-compatible IPv6 equivalent (`::x.x.x.x`).
    pub fn to_v6_compat(&self) -> IpAddress {
        IpAddress::from_parts(self.value, Version::V6)
    }

    pub fn is_ipv4_mapped(&self) -> bool {
        self.version == Version::V6 && (self.value >> 32) == 0xffff
    }

    pub fn is_ipv4_compat(&self) -> bool {
        self.version == Version::V6 && (self.value >> 32) == 0
    }

    /// True if the value is a contiguous run of high bits (a valid netmask).
    pub fn is_netmask(&self) -> bool {
        (self.value ^ self.version.max_int())
            .checked_add(1)
            .map_or(true, |v| v.is_power_of_two())
    }

    /// True if the value is a contiguous run of low bits (a valid hostmask).
    pub fn is_hostmask(&self) -> bool {
        self.value.checked_add(1).map_or(true, |v| v.is_power_of_two())
    }

    /// Prefix length equivalent to this netmask, or the full width if it is not one.
    pub fn netmask_bits(&self) -> u8 {
        if !self.is_netmask() {
            return self.version.width();
        }
        let width = u32::from(self.version.width());
        let zeros = self.value.trailing_zeros().min(width);
        (width - zeros) as u8
    }

    /// Binary digit string, words joined by `sep` (version default when `None`).
    pub fn bits(&self, sep: Option<&str>) -> String {
        self.version.int_to_bits(self.value, sep)
    }

    /// `0b` prefixed binary form.
    pub fn bin(&self) -> String {
        self.version.int_to_bin(self.value)
    }

    pub fn hex(&self) -> String {
        format!("{:#x}", self.value)
    }

    /// Octets for IPv4, hextets for IPv6.
    pub fn words(&self) -> Vec<u16> {
        self.version.int_to_words(self.value)
    }

    pub fn packed(&self) -> Vec<u8> {
        self.version.int_to_packed(self.value)
    }

    pub fn reverse_dns(&self) -> String {
        self.version.int_to_arpa(self.value)
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey {
            version: self.version,
            first: self.value,
            net_size_bits: i16::from(self.version.width()),
            host_bits: 0,
        }
    }

    pub fn to_std(&self) -> IpAddr {
        match self.version {
            Version::V4 => IpAddr::V4(Ipv4Addr::from(self.value as u32)),
            Version::V6 => IpAddr::V6(Ipv6Addr::from(self.value)),
        }
    }

    fn mask(&self, value: u128) -> IpAddress {
        IpAddress::from_parts(value & self.version.max_int(), self.version)
    }
}

fn reject_prefix(text: &str) -> Result<(), AddrError> {
    if text.contains('/') {
        return Err(AddrError::Format(format!(
            "{text:?}: addresses do not take netmasks or prefixes, use a network"
        )));
    }
    Ok(())
}

impl IpSpan for IpAddress {
    fn version(&self) -> Version {
        self.version
    }

    fn first(&self) -> u128 {
        self.value
    }

    fn last(&self) -> u128 {
        self.value
    }
}

impl FromStr for IpAddress {
    type Err = AddrError;

    /// Detects the version: IPv4 first, then IPv6.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        reject_prefix(s)?;
        let (version, value) = Version::detect(s)?;
        Ok(IpAddress { version, value })
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.version.int_to_str(self.value))
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> Self {
        IpAddress::from_parts(u32::from(addr) as u128, Version::V4)
    }
}

impl From<Ipv6Addr> for IpAddress {
    fn from(addr: Ipv6Addr) -> Self {
        IpAddress::from_parts(u128::from(addr), Version::V6)
    }
}

impl From<IpAddr> for IpAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(a) => a.into(),
            IpAddr::V6(a) => a.into(),
        }
    }
}

impl From<IpAddress> for u128 {
    fn from(addr: IpAddress) -> Self {
        addr.value
    }
}

impl Add<u128> for IpAddress {
    type Output = Result<IpAddress, AddrError>;

    fn add(self, num: u128) -> Self::Output {
        self.checked_add(num)
    }
}

impl Sub<u128> for IpAddress {
    type Output = Result<IpAddress, AddrError>;

    fn sub(self, num: u128) -> Self::Output {
        self.checked_sub(num)
    }
}

// Bitwise results keep the version; bits above the version width are dropped.
macro_rules! impl_bit_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<u128> for IpAddress {
            type Output = IpAddress;

            fn $method(self, rhs: u128) -> IpAddress {
                self.mask(self.value $op rhs)
            }
        }

        impl $trait<IpAddress> for IpAddress {
            type Output = IpAddress;

            fn $method(self, rhs: IpAddress) -> IpAddress {
                self.mask(self.value $op rhs.value)
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, &);
impl_bit_op!(BitOr, bitor, |);
impl_bit_op!(BitXor, bitxor, ^);

impl Shl<u32> for IpAddress {
    type Output = IpAddress;

    fn shl(self, bits: u32) -> IpAddress {
        self.mask(self.value.checked_shl(bits).unwrap_or(0))
    }
}

impl Shr<u32> for IpAddress {
    type Output = IpAddress;

    fn shr(self, bits: u32) -> IpAddress {
        self.mask(self.value.checked_shr(bits).unwrap_or(0))
    }
}

// An address never equals a network: their identity keys have different shapes.
impl PartialEq<IpNetwork> for IpAddress {
    fn eq(&self, _other: &IpNetwork) -> bool {
        false
    }
}

impl PartialOrd<IpNetwork> for IpAddress {
    fn partial_cmp(&self, other: &IpNetwork) -> Option<Ordering> {
        Some(self.sort_key().cmp(&other.sort_key()))
    }
}

impl Serialize for IpAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpAddress {
    fn deserialize<D>(deserializer: D) -> Result<IpAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpAddress::from_str(&s).map_err(de::Error::custom)
    }
}
