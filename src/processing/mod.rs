//! Set algebra over addresses and networks.
//!
//! All functions here are stateless:
//! - [`iter`] - lazy address sequences
//! - [`merge`] - summarising networks into a minimal cover
//! - [`exclude`] - cutting one block out of another
//! - [`span`] - spanning blocks and range decomposition
//! - [`matching`] - looking up the networks that hold an address
//! - [`gap_finder`] - unused blocks between networks

mod exclude;
mod gap_finder;
mod iter;
mod matching;
mod merge;
mod span;

pub use exclude::cidr_exclude;
pub use gap_finder::{find_gaps, summary_rows, SummaryRow};
pub use iter::{iter_iprange, IpIter};
pub use matching::{all_matching_cidrs, largest_matching_cidr, smallest_matching_cidr};
pub use merge::{cidr_merge, iter_unique_ips};
pub use span::{iprange_to_cidrs, spanning_cidr};
