//! Construction-time settings for [`HashEngine`](crate::HashEngine).

use crate::error::TableError;

/// Bucket count used by [`TableConfig::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Settings consumed by [`HashEngine::with_config`](crate::HashEngine::with_config).
///
/// By default the table never grows on its own; callers resize explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct TableConfig {
    /// Number of buckets. Must be non-zero.
    pub capacity: usize,
    /// When set, an insert that adds a new key and pushes
    /// `len / capacity` above this ratio doubles the table in place.
    pub max_load_factor: Option<f64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_load_factor: None,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables automatic doubling past `lf` entries per bucket.
    pub fn with_max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = Some(lf);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), TableError> {
        if self.capacity == 0 {
            return Err(TableError::InvalidCapacity(self.capacity));
        }
        match self.max_load_factor {
            Some(lf) if !(lf.is_finite() && lf > 0.0) => Err(TableError::InvalidLoadFactor(lf)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_manual_resize() {
        let c = TableConfig::default();
        assert_eq!(c.capacity, DEFAULT_CAPACITY);
        assert!(c.max_load_factor.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let c = TableConfig::new().with_capacity(0);
        assert_eq!(c.validate(), Err(TableError::InvalidCapacity(0)));
    }

    #[test]
    fn bad_load_factors_rejected() {
        for lf in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let c = TableConfig::new().with_max_load_factor(lf);
            assert!(
                matches!(c.validate(), Err(TableError::InvalidLoadFactor(_))),
                "load factor {lf} should be rejected"
            );
        }
        assert!(TableConfig::new().with_max_load_factor(0.75).validate().is_ok());
    }
}
