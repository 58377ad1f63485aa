//! Validated scalar types
//!
//! Probabilities enter the core from configuration and from driver input, so
//! they are checked once at construction and carried as a newtype afterwards.

use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A probability or density in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Probability(pub(crate) f64);

impl Probability {
    /// Never happens
    pub const ZERO: Probability = Probability(0.0);
    /// Always happens
    pub const ONE: Probability = Probability(1.0);

    /// Create a probability, rejecting NaN and values outside `[0, 1]`
    ///
    /// # Arguments
    /// * `name` - Parameter name reported in the error
    /// * `value` - Raw value
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `value` is NaN or outside `[0, 1]`
    pub fn new(name: &'static str, value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Probability(value))
        } else {
            Err(FireSimError::invalid_argument(
                name,
                value,
                "must be within [0, 1]",
            ))
        }
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Draw once from `rng`; true with this probability
    ///
    /// `ZERO` never consumes randomness and never succeeds, so callers can
    /// rely on it for fully deterministic runs.
    #[inline]
    pub fn sample<R: rand::Rng + ?Sized>(self, rng: &mut R) -> bool {
        if self.0 <= 0.0 {
            false
        } else if self.0 >= 1.0 {
            true
        } else {
            rng.random::<f64>() < self.0
        }
    }
}

impl Deref for Probability {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = FireSimError;

    fn try_from(value: f64) -> Result<Self> {
        Probability::new("probability", value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounds_accepted() {
        assert_eq!(Probability::new("p", 0.0).unwrap(), Probability::ZERO);
        assert_eq!(Probability::new("p", 1.0).unwrap(), Probability::ONE);
        assert_eq!(*Probability::new("p", 0.25).unwrap(), 0.25);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Probability::new("p", -0.01).is_err());
        assert!(Probability::new("p", 1.01).is_err());
        assert!(Probability::new("p", f64::NAN).is_err());
    }

    #[test]
    fn test_sample_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(!Probability::ZERO.sample(&mut rng));
            assert!(Probability::ONE.sample(&mut rng));
        }
    }
}
