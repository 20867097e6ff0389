//! Legacy classful IPv4 abbreviations (`10`, `192.168`, `10/16`).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ABBREV_RE: Regex =
        Regex::new(r"^(\d{1,3})((?:\.\d{1,3}){0,3})(?:/(\d{1,3}))?$").expect("Invalid Regex?");
}

/// Default prefix for a leading octet under the old class A/B/C and multicast rules.
fn classful_prefix(octet: u8) -> u8 {
    match octet {
        0..=127 => 8,
        128..=191 => 16,
        192..=223 => 24,
        224..=239 => 4,
        _ => 32,
    }
}

/// Expand an abbreviated IPv4 CIDR to its verbose `a.b.c.d/len` form.
///
/// Missing octets are zero filled and a missing prefix takes the classful default of the
/// first octet. IPv6 input and anything not recognised come back unchanged.
pub fn cidr_abbrev_to_verbose(abbrev: &str) -> String {
    let text = abbrev.trim();
    if text.is_empty() || text.contains(':') {
        return abbrev.to_string();
    }
    let Some(caps) = ABBREV_RE.captures(text) else {
        log::trace!("cidr_abbrev_to_verbose({abbrev:?}) not an abbreviation");
        return abbrev.to_string();
    };
    let Ok(first) = caps[1].parse::<u8>() else {
        return abbrev.to_string();
    };
    let prefix = match caps.get(3).map(|p| p.as_str().parse::<u8>()) {
        None => classful_prefix(first),
        Some(Ok(len)) if len <= 32 => len,
        Some(_) => return abbrev.to_string(),
    };
    let mut octets: Vec<&str> = text
        .split('/')
        .next()
        .unwrap_or_default()
        .split('.')
        .collect();
    octets.resize(4, "0");
    format!("{}/{prefix}", octets.join("."))
}
