use std::fmt;

use crate::error::CoreError;

/// One CPU-utilization measurement, always a finite percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Sample(f64);

impl Sample {
    pub const MIN_PERCENT: f64 = 0.0;
    pub const MAX_PERCENT: f64 = 100.0;

    /// Build a sample from a raw reading, clamping it into `[0, 100]`.
    ///
    /// OS counters can overshoot slightly between refreshes, so readings
    /// outside the range are clamped rather than rejected. Non-finite
    /// readings are an error.
    pub fn from_percent(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::InvalidSample(value));
        }
        Ok(Self(value.clamp(Self::MIN_PERCENT, Self::MAX_PERCENT)))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_values_are_kept() {
        assert_eq!(Sample::from_percent(42.5).unwrap().percent(), 42.5);
        assert_eq!(Sample::from_percent(0.0).unwrap().percent(), 0.0);
        assert_eq!(Sample::from_percent(100.0).unwrap().percent(), 100.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(Sample::from_percent(-0.5).unwrap().percent(), 0.0);
        assert_eq!(Sample::from_percent(100.4).unwrap().percent(), 100.0);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(Sample::from_percent(f64::NAN).is_err());
        assert!(Sample::from_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn display_uses_shortest_decimal() {
        assert_eq!(Sample::from_percent(42.5).unwrap().to_string(), "42.5");
        assert_eq!(Sample::from_percent(42.0).unwrap().to_string(), "42");
    }
}
