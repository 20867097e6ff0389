//! Arbitrary (not necessarily CIDR aligned) address ranges.

use super::span::{net_size_bits, IpSpan};
use super::{IpAddress, IpNetwork, Version};
use crate::error::AddrError;
use crate::processing::{iprange_to_cidrs, IpIter};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Inclusive `start..=end` block of one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpRange {
    start: IpAddress,
    end: IpAddress,
}

impl IpRange {
    /// Fails with a version mismatch for mixed versions and a format error when
    /// `start` is above `end`.
    pub fn new(start: IpAddress, end: IpAddress) -> Result<IpRange, AddrError> {
        if start.version() != end.version() {
            return Err(AddrError::mismatch(start, end));
        }
        if start.value() > end.value() {
            return Err(AddrError::Format(format!(
                "lower bound {start} greater than upper bound {end}"
            )));
        }
        Ok(IpRange { start, end })
    }

    pub fn start(&self) -> IpAddress {
        self.start
    }

    pub fn end(&self) -> IpAddress {
        self.end
    }

    /// Exact list of CIDR blocks covering this range.
    pub fn cidrs(&self) -> Result<Vec<IpNetwork>, AddrError> {
        iprange_to_cidrs(&self.start, &self.end)
    }

    pub fn iter(&self) -> IpIter {
        IpIter::new(self.version(), self.first(), self.last(), 1)
    }

    /// Address at `index`; negative indices count back from the end.
    pub fn get(&self, index: i128) -> Result<IpAddress, AddrError> {
        index_of(self, index)
    }

    /// Lazy `[start:stop:step]` slice. IPv6 ranges cannot be sliced.
    pub fn slice(
        &self,
        start: Option<i128>,
        stop: Option<i128>,
        step: Option<i128>,
    ) -> Result<IpIter, AddrError> {
        slice_of(self, start, stop, step)
    }

    fn order_key(&self) -> (Version, u128, i16, u128) {
        (self.version(), self.first(), net_size_bits(self), self.last())
    }
}

/// Address at a (possibly negative) offset inside `span`.
pub(crate) fn index_of<S: IpSpan>(span: &S, index: i128) -> Result<IpAddress, AddrError> {
    let distance = span.last() - span.first();
    let value = if index < 0 {
        let back = index.unsigned_abs() - 1;
        (back <= distance).then(|| span.last() - back)
    } else {
        let forward = index as u128;
        (forward <= distance).then(|| span.first() + forward)
    };
    value
        .map(|v| IpAddress::from_parts(v, span.version()))
        .ok_or_else(|| {
            AddrError::Boundary(format!("index {index} out of range for address range size"))
        })
}

/// Normalise optional slice bounds against a sequence of `len` items. Negative values
/// count from the end and out of range values are clamped.
pub(crate) fn slice_indices(
    start: Option<i128>,
    stop: Option<i128>,
    step: Option<i128>,
    len: i128,
) -> Result<(i128, i128, i128), AddrError> {
    let step = step.unwrap_or(1);
    if step == 0 {
        return Err(AddrError::Value("slice step cannot be zero".to_string()));
    }
    let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
    let clamp = |v: i128| {
        if v < 0 {
            (v + len).max(lower)
        } else {
            v.min(upper)
        }
    };
    let start = start
        .map(clamp)
        .unwrap_or(if step < 0 { upper } else { lower });
    let stop = stop.map(clamp).unwrap_or(if step < 0 { lower } else { upper });
    Ok((start, stop, step))
}

pub(crate) fn slice_of<S: IpSpan>(
    span: &S,
    start: Option<i128>,
    stop: Option<i128>,
    step: Option<i128>,
) -> Result<IpIter, AddrError> {
    let version = span.version();
    if version == Version::V6 {
        return Err(AddrError::Unsupported(
            "IPv6 slices are not supported".to_string(),
        ));
    }
    let len = span.size() as i128;
    let (start, stop, step) = slice_indices(start, stop, step, len)?;
    let count = match step.cmp(&0) {
        Ordering::Greater if start < stop => (stop - start - 1) / step + 1,
        Ordering::Less if start > stop => (start - stop - 1) / -step + 1,
        _ => 0,
    };
    if count == 0 {
        return Ok(IpIter::empty(version));
    }
    let last = start + (count - 1) * step;
    Ok(IpIter::new(
        version,
        span.first() + start as u128,
        span.first() + last as u128,
        step,
    ))
}

impl IpSpan for IpRange {
    fn version(&self) -> Version {
        self.start.version()
    }

    fn first(&self) -> u128 {
        self.start.value()
    }

    fn last(&self) -> u128 {
        self.end.value()
    }
}

impl PartialOrd for IpRange {
    fn partial_cmp(&self, other: &IpRange) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IpRange {
    fn cmp(&self, other: &IpRange) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl<'a> IntoIterator for &'a IpRange {
    type Item = IpAddress;
    type IntoIter = IpIter;

    fn into_iter(self) -> IpIter {
        self.iter()
    }
}

impl FromStr for IpRange {
    type Err = AddrError;

    /// `start-end`, each side parsed with version detection.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| AddrError::Format(format!("{s:?} is not a start-end range")))?;
        IpRange::new(start.parse()?, end.parse()?)
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for IpRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpRange {
    fn deserialize<D>(deserializer: D) -> Result<IpRange, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpRange::from_str(&s).map_err(de::Error::custom)
    }
}
