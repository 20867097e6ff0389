//! Value types for the IP address model.
//!
//! - [`Version`] - IPv4/IPv6 width, limits and text conversions
//! - [`IpAddress`] - a single address
//! - [`IpNetwork`] - an address with a CIDR prefix
//! - [`IpRange`] - an arbitrary inclusive `start-end` block
//! - [`IpSpan`] - containment and classification shared by all three

mod abbrev;
mod address;
mod network;
mod range;
mod span;
mod version;

pub use abbrev::cidr_abbrev_to_verbose;
pub use address::{IpAddress, IPV4_MAPPED_BASE, IPV4_MAPPED_LAST};
pub use network::{IpNetwork, Subnets};
pub use range::IpRange;
pub use span::{IpSpan, SortKey};
pub use version::Version;

