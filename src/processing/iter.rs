//! Lazy address sequences.

use crate::error::AddrError;
use crate::models::{IpAddress, Version};

/// Finite, restartable (by cloning or re-creating) sequence of addresses from a start to an
/// inclusive end, advancing by a signed step.
#[derive(Debug, Clone)]
pub struct IpIter {
    version: Version,
    next: Option<u128>,
    end: u128,
    step: i128,
}

impl IpIter {
    pub(crate) fn new(version: Version, start: u128, end: u128, step: i128) -> IpIter {
        let reachable = (step > 0 && start <= end) || (step < 0 && start >= end);
        IpIter {
            version,
            next: reachable.then_some(start),
            end,
            step,
        }
    }

    pub(crate) fn empty(version: Version) -> IpIter {
        IpIter {
            version,
            next: None,
            end: 0,
            step: 1,
        }
    }

    fn remaining(&self) -> Option<u128> {
        let current = self.next?;
        let distance = if self.step > 0 {
            self.end - current
        } else {
            current - self.end
        };
        Some(distance / self.step.unsigned_abs() + 1)
    }
}

impl Iterator for IpIter {
    type Item = IpAddress;

    fn next(&mut self) -> Option<IpAddress> {
        let current = self.next?;
        let stride = self.step.unsigned_abs();
        self.next = if self.step > 0 {
            current.checked_add(stride).filter(|v| *v <= self.end)
        } else {
            current.checked_sub(stride).filter(|v| *v >= self.end)
        };
        Some(IpAddress::from_parts(current, self.version))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().map(usize::try_from) {
            None => (0, Some(0)),
            Some(Ok(n)) => (n, Some(n)),
            Some(Err(_)) => (usize::MAX, None),
        }
    }
}

/// Addresses from `start` to `end` inclusive, `step` apart. A negative step walks down.
///
/// Fails if the versions differ or `step` is zero. A step pointing away from `end`
/// yields nothing.
pub fn iter_iprange(start: &IpAddress, end: &IpAddress, step: i128) -> Result<IpIter, AddrError> {
    if start.version() != end.version() {
        return Err(AddrError::mismatch(start.version(), end.version()));
    }
    if step == 0 {
        return Err(AddrError::Value("step argument cannot be zero".to_string()));
    }
    log::trace!("iter_iprange({start}, {end}, {step})");
    Ok(IpIter::new(start.version(), start.value(), end.value(), step))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> IpAddress {
        s.parse().unwrap()
    }

    fn strings(it: IpIter) -> Vec<String> {
        it.map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_forward() {
        let it = iter_iprange(&addr("192.0.2.1"), &addr("192.0.2.4"), 1).unwrap();
        assert_eq!(it.size_hint(), (4, Some(4)));
        assert_eq!(
            strings(it),
            vec!["192.0.2.1", "192.0.2.2", "192.0.2.3", "192.0.2.4"]
        );
    }

    #[test]
    fn test_step() {
        let it = iter_iprange(&addr("192.0.2.0"), &addr("192.0.2.10"), 4).unwrap();
        assert_eq!(strings(it), vec!["192.0.2.0", "192.0.2.4", "192.0.2.8"]);
    }

    #[test]
    fn test_backward() {
        let it = iter_iprange(&addr("192.0.2.3"), &addr("192.0.2.0"), -2).unwrap();
        assert_eq!(strings(it), vec!["192.0.2.3", "192.0.2.1"]);
    }

    #[test]
    fn test_wrong_direction_is_empty() {
        let it = iter_iprange(&addr("192.0.2.3"), &addr("192.0.2.0"), 1).unwrap();
        assert_eq!(it.count(), 0);
    }

    #[test]
    fn test_top_of_space_terminates() {
        let top = addr("ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe");
        let end = addr("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(iter_iprange(&top, &end, 1).unwrap().count(), 2);
        assert_eq!(
            iter_iprange(&addr("0.0.0.1"), &addr("0.0.0.0"), -1)
                .unwrap()
                .count(),
            2
        );
    }

    #[test]
    fn test_restart() {
        let it = iter_iprange(&addr("10.0.0.0"), &addr("10.0.0.2"), 1).unwrap();
        let again = it.clone();
        assert_eq!(it.count(), 3);
        assert_eq!(again.count(), 3);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            iter_iprange(&addr("10.0.0.0"), &addr("::1"), 1),
            Err(AddrError::VersionMismatch(_))
        ));
        assert!(matches!(
            iter_iprange(&addr("10.0.0.0"), &addr("10.0.0.1"), 0),
            Err(AddrError::Value(_))
        ));
    }
}
