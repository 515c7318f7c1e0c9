//! Error types for the `chain-table` crate

/// Errors raised while constructing or writing to a [`HashEngine`].
///
/// A missing key is never an error: lookups return `None` and removals of
/// absent keys are no-ops.
///
/// [`HashEngine`]: crate::HashEngine
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TableError {
    /// The table was asked for zero buckets.
    #[error("invalid capacity {0}: a table needs at least one bucket")]
    InvalidCapacity(usize),

    /// Inserts require a non-empty key.
    #[error("invalid key: keys must be non-empty")]
    InvalidKey,

    /// The configured auto-resize threshold is not a positive, finite ratio.
    #[error("invalid max load factor {0}: must be positive and finite")]
    InvalidLoadFactor(f64),
}
