//! Money amounts.
//!
//! Amounts are binary floating point. Equal splits of e.g. 100 between 3 people
//! drift in the last digits; the drift is tolerated and only rounded away for
//! display.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::model::ValueObject;

/// A strictly positive, finite expense amount.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("amount must be a finite number"));
        }
        if value <= 0.0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Amount {}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

/// Two decimal places, the way amounts are shown to people.
impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
