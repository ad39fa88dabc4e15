use chrono::Duration;
use uuid::Uuid;

use crate::decimal::Rate;
use crate::errors::{LoanError, Result};

/// unique identifier for a loan, assigned sequentially from zero
pub type LoanId = u64;

/// opaque identity of a borrower, a lender, or the registry vault
pub type PartyId = Uuid;

/// terms fixed at request time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerms {
    /// fixed fee rate applied once to the principal
    pub interest_rate: Rate,
    /// time the borrower has to repay, measured from the request
    pub duration: Duration,
}

impl LoanTerms {
    pub fn new(interest_rate: Rate, duration: Duration) -> Self {
        Self {
            interest_rate,
            duration,
        }
    }

    /// check the terms are admissible for a new loan
    pub fn validate(&self) -> Result<()> {
        if self.duration <= Duration::zero() {
            return Err(LoanError::InvalidDuration {
                seconds: self.duration.num_seconds(),
            });
        }
        if self.interest_rate.is_negative() {
            return Err(LoanError::InvalidRate {
                rate: self.interest_rate,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(Rate::from_percentage(5), Duration::days(7));
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_zero_rate_is_allowed() {
        let terms = LoanTerms::new(Rate::ZERO, Duration::days(7));
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let terms = LoanTerms::new(Rate::from_percentage(5), Duration::zero());
        assert!(matches!(
            terms.validate(),
            Err(LoanError::InvalidDuration { seconds: 0 })
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let terms = LoanTerms::new(
            Rate::from_decimal(rust_decimal_macros::dec!(-0.05)),
            Duration::days(7),
        );
        assert!(matches!(terms.validate(), Err(LoanError::InvalidRate { .. })));
    }
}
