use std::fmt::{self, Display, Formatter};

/// Errors surfaced across the public boundary of this crate.
///
/// Illegal-action recovery (a raise downgraded to a call, a call
/// downgraded to a fold) is handled silently inside [`crate::tree::manager`]
/// and never reaches this type; only genuinely invalid input or missing
/// resources do.
#[derive(Debug)]
pub enum ResolverError {
    /// A hole or board card set failed validation: wrong count, a
    /// duplicate, or overlap with already-known cards.
    InvalidCards(String),
    /// A supplied range's length did not match the oracle's `H`.
    RangeDimension { expected: usize, actual: usize },
    /// A value-network checkpoint could not be loaded.
    MissingCheckpoint(String),
    /// A stage/depth cutoff was nonsensical (e.g. past showdown).
    InvalidCutoff(String),
}

impl Display for ResolverError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidCards(msg) => write!(f, "invalid cards: {msg}"),
            Self::RangeDimension { expected, actual } => write!(
                f,
                "range has {actual} entries, expected {expected}"
            ),
            Self::MissingCheckpoint(path) => write!(f, "missing value-network checkpoint: {path}"),
            Self::InvalidCutoff(msg) => write!(f, "invalid resolve cutoff: {msg}"),
        }
    }
}

impl std::error::Error for ResolverError {}
