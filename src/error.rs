//! Error type shared by the address model and the set-algebra functions.

use thiserror::Error;

/// Every failure the crate can report.
///
/// Set-algebra functions either return a complete result or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrError {
    /// Unparseable address, mask, prefix or bit-string.
    #[error("address format error: {0}")]
    Format(String),
    /// Argument outside its allowed domain (zero step, too few items, bad prefix bound).
    #[error("invalid value: {0}")]
    Value(String),
    /// Address not representable in the requested version.
    #[error("address conversion error: {0}")]
    Conversion(String),
    /// Result or index falls outside the address space or the subnet count.
    #[error("address boundary error: {0}")]
    Boundary(String),
    /// IPv4 and IPv6 values combined in one operation.
    #[error("IP version mismatch: {0}")]
    VersionMismatch(String),
    /// Operation not available for this version.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl AddrError {
    pub(crate) fn mismatch(lhs: impl std::fmt::Display, rhs: impl std::fmt::Display) -> AddrError {
        AddrError::VersionMismatch(format!("cannot combine {lhs} with {rhs}"))
    }
}
