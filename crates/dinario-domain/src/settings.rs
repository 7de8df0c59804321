//! The singleton configuration entity consumed by the metrics aggregator.

use serde::{Deserialize, Serialize};

use crate::{common::*, record::ValidationError};

/// Tax rate assumed when no configuration has been saved.
pub const DEFAULT_TAX_RATE: f64 = 0.0;

/// Stored settings. At most one instance exists per store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Configuration {
    pub id: RecordId,
    pub tax_rate: f64,
}

impl Configuration {
    pub fn new(id: RecordId, tax_rate: f64) -> Self {
        Self { id, tax_rate }
    }
}

impl Identifiable for Configuration {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Checks that a tax rate is a finite fraction in `[0, 1]`.
pub fn validate_tax_rate(tax_rate: f64) -> Result<f64, ValidationError> {
    if !tax_rate.is_finite() || !(0.0..=1.0).contains(&tax_rate) {
        return Err(ValidationError::TaxRateOutOfRange(tax_rate));
    }
    Ok(tax_rate)
}

/// Returns the configured tax rate, or the default when nothing is stored.
pub fn effective_tax_rate(configuration: Option<&Configuration>) -> f64 {
    configuration
        .map(|config| config.tax_rate)
        .unwrap_or(DEFAULT_TAX_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_rate_bounds_are_inclusive() {
        assert_eq!(validate_tax_rate(0.0), Ok(0.0));
        assert_eq!(validate_tax_rate(1.0), Ok(1.0));
        assert!(validate_tax_rate(1.01).is_err());
        assert!(validate_tax_rate(-0.1).is_err());
        assert!(validate_tax_rate(f64::NAN).is_err());
    }

    #[test]
    fn missing_configuration_falls_back_to_zero() {
        assert_eq!(effective_tax_rate(None), 0.0);
        let config = Configuration::new(RecordId(1), 0.15);
        assert_eq!(effective_tax_rate(Some(&config)), 0.15);
    }
}
