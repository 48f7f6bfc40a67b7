//! Raw price quotes from external sources

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single raw price reading from a named external source.
///
/// Quotes are transient: they are produced by a quote provider, folded into a
/// snapshot by the aggregation engine, and only persist as part of that
/// snapshot's `sources` audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Name of the source this quote came from (e.g. "commodityonline")
    pub source: String,

    /// Quoted price per coconut, in rupees
    pub price: Decimal,

    /// When the source reported this price
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    /// Create a new quote observed now
    pub fn new(source: impl Into<String>, price: Decimal) -> Self {
        Self {
            source: source.into(),
            price,
            observed_at: Utc::now(),
        }
    }

    /// Whether this quote's price falls inside the accepted range.
    ///
    /// Out-of-range quotes are excluded from statistics but still recorded in
    /// a snapshot's `sources` list so provenance survives.
    pub fn is_valid(&self) -> bool {
        self.price >= Decimal::TEN && self.price <= Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_validity_bounds() {
        assert!(Quote::new("a", dec!(10)).is_valid());
        assert!(Quote::new("a", dec!(100)).is_valid());
        assert!(Quote::new("a", dec!(27.5)).is_valid());
        assert!(!Quote::new("a", dec!(9.99)).is_valid());
        assert!(!Quote::new("a", dec!(100.01)).is_valid());
        assert!(!Quote::new("a", dec!(0)).is_valid());
    }
}
