//! Per-version address primitives.
//!
//! [`Version`] is the closed strategy selected once when a value is built: it knows the
//! integer width of the version, its maximum value and how to turn integers into the
//! textual, bit-string, word, packed and reverse-DNS forms and back.

use crate::error::AddrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// IP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Version {
    V4,
    V6,
}

/// Mask with the low `n` bits set.
pub(crate) fn low_bits(n: u32) -> u128 {
    if n >= 128 {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}

impl Version {
    /// Build from the protocol number (4 or 6).
    pub fn from_number(number: u8) -> Result<Version, AddrError> {
        match number {
            4 => Ok(Version::V4),
            6 => Ok(Version::V6),
            n => Err(AddrError::Value(format!("unsupported IP version {n}"))),
        }
    }

    /// The protocol number, 4 or 6.
    pub fn number(&self) -> u8 {
        match self {
            Version::V4 => 4,
            Version::V6 => 6,
        }
    }

    /// Address width in bits.
    pub fn width(&self) -> u8 {
        match self {
            Version::V4 => 32,
            Version::V6 => 128,
        }
    }

    /// Largest integer value an address of this version can hold.
    pub fn max_int(&self) -> u128 {
        match self {
            Version::V4 => u32::MAX as u128,
            Version::V6 => u128::MAX,
        }
    }

    /// Bits per word: octets for IPv4, hextets for IPv6.
    pub fn word_size(&self) -> u8 {
        match self {
            Version::V4 => 8,
            Version::V6 => 16,
        }
    }

    pub fn word_count(&self) -> usize {
        (self.width() / self.word_size()) as usize
    }

    /// Default separator placed between words in bit-strings.
    pub fn word_sep(&self) -> &'static str {
        match self {
            Version::V4 => ".",
            Version::V6 => ":",
        }
    }

    /// Host mask for `prefixlen`, i.e. the low `width - prefixlen` bits set.
    pub fn hostmask(&self, prefixlen: u8) -> u128 {
        low_bits(u32::from(self.width().saturating_sub(prefixlen)))
    }

    /// Network mask for `prefixlen`.
    pub fn netmask(&self, prefixlen: u8) -> u128 {
        self.max_int() ^ self.hostmask(prefixlen)
    }

    /// Check that `value` fits this version.
    pub fn check(&self, value: u128) -> Result<u128, AddrError> {
        if value <= self.max_int() {
            Ok(value)
        } else {
            Err(AddrError::Format(format!(
                "bad address format: {value} is out of range for {self}"
            )))
        }
    }

    /// Parse the textual form of an address.
    pub fn str_to_int(&self, text: &str) -> Result<u128, AddrError> {
        let text = text.trim();
        match self {
            Version::V4 => text
                .parse::<Ipv4Addr>()
                .map(|a| u32::from(a) as u128)
                .map_err(|_| AddrError::Format(format!("{text:?} is not a valid IPv4 address"))),
            Version::V6 => text
                .parse::<Ipv6Addr>()
                .map(u128::from)
                .map_err(|_| AddrError::Format(format!("{text:?} is not a valid IPv6 address"))),
        }
    }

    /// Canonical textual form. `value` must already fit the version.
    pub fn int_to_str(&self, value: u128) -> String {
        match self {
            Version::V4 => Ipv4Addr::from(value as u32).to_string(),
            Version::V6 => Ipv6Addr::from(value).to_string(),
        }
    }

    /// Integer value split into words, most significant first.
    pub fn int_to_words(&self, value: u128) -> Vec<u16> {
        let size = u32::from(self.word_size());
        let word_mask = low_bits(size);
        (0..self.word_count())
            .rev()
            .map(|i| ((value >> (i as u32 * size)) & word_mask) as u16)
            .collect()
    }

    /// Inverse of [`Version::int_to_words`].
    pub fn words_to_int(&self, words: &[u16]) -> Result<u128, AddrError> {
        if words.len() != self.word_count() {
            return Err(AddrError::Format(format!(
                "expected {} words for {self}, got {}",
                self.word_count(),
                words.len()
            )));
        }
        let size = u32::from(self.word_size());
        let word_max = low_bits(size);
        words.iter().try_fold(0u128, |acc, &w| {
            if u128::from(w) > word_max {
                Err(AddrError::Format(format!("word {w} too large for {self}")))
            } else {
                Ok((acc << size) | u128::from(w))
            }
        })
    }

    /// Fixed width binary digit string, words joined by `sep` (default separator if `None`).
    pub fn int_to_bits(&self, value: u128, sep: Option<&str>) -> String {
        let size = self.word_size() as usize;
        self.int_to_words(value)
            .iter()
            .map(|w| format!("{w:0size$b}"))
            .collect::<Vec<String>>()
            .join(sep.unwrap_or(self.word_sep()))
    }

    /// Parse a full width bit-string, with or without the default word separator.
    pub fn bits_to_int(&self, bits: &str) -> Result<u128, AddrError> {
        let digits: String = bits.split(self.word_sep()).collect();
        if digits.len() != self.width() as usize || !digits.chars().all(|c| c == '0' || c == '1') {
            return Err(AddrError::Format(format!(
                "{bits:?} is not a valid {self} bit string"
            )));
        }
        u128::from_str_radix(&digits, 2)
            .map_err(|e| AddrError::Format(format!("{bits:?} is not a valid bit string: {e}")))
    }

    /// `0b` followed by the binary digits, without padding.
    pub fn int_to_bin(&self, value: u128) -> String {
        format!("{value:#b}")
    }

    /// Big-endian bytes, 4 for IPv4 and 16 for IPv6.
    pub fn int_to_packed(&self, value: u128) -> Vec<u8> {
        match self {
            Version::V4 => (value as u32).to_be_bytes().to_vec(),
            Version::V6 => value.to_be_bytes().to_vec(),
        }
    }

    /// Inverse of [`Version::int_to_packed`].
    pub fn packed_to_int(&self, packed: &[u8]) -> Result<u128, AddrError> {
        if packed.len() != (self.width() / 8) as usize {
            return Err(AddrError::Format(format!(
                "{self} packed form needs {} bytes, got {}",
                self.width() / 8,
                packed.len()
            )));
        }
        Ok(packed.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b)))
    }

    /// Reverse DNS name, e.g. `1.2.0.192.in-addr.arpa.`.
    pub fn int_to_arpa(&self, value: u128) -> String {
        match self {
            Version::V4 => {
                let octets: Vec<String> = self
                    .int_to_words(value)
                    .iter()
                    .rev()
                    .map(|o| o.to_string())
                    .collect();
                format!("{}.in-addr.arpa.", octets.join("."))
            }
            Version::V6 => {
                let nibbles: Vec<String> = (0..32)
                    .map(|i| format!("{:x}", (value >> (i * 4)) & 0xf))
                    .collect();
                format!("{}.ip6.arpa.", nibbles.join("."))
            }
        }
    }

    /// Detect the version of `text`: IPv4 text, then an integer in IPv4 range, then
    /// IPv6 text, then an integer in IPv6 range. Anything else fails.
    pub fn detect(text: &str) -> Result<(Version, u128), AddrError> {
        let text = text.trim();
        let as_int = text.parse::<u128>().ok();
        for version in [Version::V4, Version::V6] {
            if let Ok(value) = version.str_to_int(text) {
                return Ok((version, value));
            }
            if let Some(value) = as_int.filter(|v| *v <= version.max_int()) {
                return Ok((version, value));
            }
        }
        Err(AddrError::Format(format!(
            "failed to detect IP version: {text:?}"
        )))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Version::V4.width(), 32);
        assert_eq!(Version::V6.width(), 128);
        assert_eq!(Version::V4.max_int(), 0xFFFF_FFFF);
        assert_eq!(Version::V6.max_int(), u128::MAX);
        assert!(Version::V4 < Version::V6);
        assert_eq!(Version::from_number(6).unwrap(), Version::V6);
        assert!(Version::from_number(5).is_err());
    }

    #[test]
    fn test_masks() {
        assert_eq!(Version::V4.hostmask(24), 0xFF);
        assert_eq!(Version::V4.netmask(24), 0xFFFF_FF00);
        assert_eq!(Version::V4.netmask(0), 0);
        assert_eq!(Version::V4.hostmask(0), 0xFFFF_FFFF);
        assert_eq!(Version::V6.hostmask(0), u128::MAX);
        assert_eq!(Version::V6.netmask(128), u128::MAX);
        assert_eq!(Version::V6.netmask(8), 0xff << 120);
    }

    #[test]
    fn test_str_round_trip() {
        for text in ["0.0.0.0", "192.0.2.1", "255.255.255.255"] {
            let v = Version::V4.str_to_int(text).unwrap();
            assert_eq!(Version::V4.int_to_str(v), text);
        }
        for text in ["::", "::1", "fe80::1", "2001:db8::ff00:42:8329", "::ffff:192.0.2.1"] {
            let v = Version::V6.str_to_int(text).unwrap();
            assert_eq!(Version::V6.int_to_str(v), text);
        }
        assert_eq!(
            Version::V6.int_to_str(Version::V6.str_to_int("2001:0DB8:0:0::1").unwrap()),
            "2001:db8::1"
        );
        assert!(Version::V4.str_to_int("256.0.0.1").is_err());
        assert!(Version::V4.str_to_int("::1").is_err());
        assert!(Version::V6.str_to_int("1.2.3.4").is_err());
    }

    #[test]
    fn test_bits() {
        let v = Version::V4.str_to_int("192.0.2.1").unwrap();
        assert_eq!(
            Version::V4.int_to_bits(v, None),
            "11000000.00000000.00000010.00000001"
        );
        assert_eq!(
            Version::V4.int_to_bits(v, Some("")),
            "11000000000000000000001000000001"
        );
        assert_eq!(
            Version::V4
                .bits_to_int("11000000.00000000.00000010.00000001")
                .unwrap(),
            v
        );
        assert_eq!(
            Version::V4
                .bits_to_int("11000000000000000000001000000001")
                .unwrap(),
            v
        );
        assert!(Version::V4.bits_to_int("1100").is_err());
        assert!(Version::V4.bits_to_int("2100000000000000000000100000000x").is_err());
        let bits = Version::V6.int_to_bits(1, Some(""));
        assert_eq!(bits.len(), 128);
        assert_eq!(Version::V6.bits_to_int(&bits).unwrap(), 1);
    }

    #[test]
    fn test_words_and_packed() {
        let v = Version::V4.str_to_int("192.0.2.1").unwrap();
        assert_eq!(Version::V4.int_to_words(v), vec![192, 0, 2, 1]);
        assert_eq!(Version::V4.words_to_int(&[192, 0, 2, 1]).unwrap(), v);
        assert!(Version::V4.words_to_int(&[256, 0, 2, 1]).is_err());
        assert!(Version::V4.words_to_int(&[1, 2]).is_err());
        assert_eq!(Version::V4.int_to_packed(v), vec![192, 0, 2, 1]);
        assert_eq!(Version::V4.packed_to_int(&[192, 0, 2, 1]).unwrap(), v);

        let v6 = Version::V6.str_to_int("fe80::1").unwrap();
        assert_eq!(
            Version::V6.int_to_words(v6),
            vec![0xfe80, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(
            Version::V6
                .words_to_int(&[0xfe80, 0, 0, 0, 0, 0, 0, 1])
                .unwrap(),
            v6
        );
        assert_eq!(Version::V6.int_to_packed(v6).len(), 16);
        assert_eq!(
            Version::V6
                .packed_to_int(&Version::V6.int_to_packed(v6))
                .unwrap(),
            v6
        );
    }

    #[test]
    fn test_arpa_and_bin() {
        let v = Version::V4.str_to_int("192.0.2.1").unwrap();
        assert_eq!(Version::V4.int_to_arpa(v), "1.2.0.192.in-addr.arpa.");
        assert_eq!(Version::V6.int_to_arpa(1), format!("1{}.ip6.arpa.", ".0".repeat(31)));
        assert_eq!(Version::V4.int_to_bin(5), "0b101");
        assert_eq!(Version::V4.int_to_bin(0), "0b0");
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            Version::detect("192.0.2.1").unwrap(),
            (Version::V4, 0xC000_0201)
        );
        assert_eq!(Version::detect("::1").unwrap(), (Version::V6, 1));
        assert_eq!(Version::detect("10").unwrap(), (Version::V4, 10));
        assert_eq!(
            Version::detect("4294967296").unwrap(),
            (Version::V6, 1 << 32)
        );
        assert!(Version::detect("not-an-ip").is_err());
        assert!(Version::detect("").is_err());
    }
}
