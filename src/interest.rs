//! fixed-fee interest
//!
//! Interest here is a single fee agreed at request time, not an accrual
//! over the life of the loan. The fee is a percentage of the principal,
//! truncated toward zero, so the repayment threshold is always exactly
//! reproducible.

use crate::decimal::{Money, Rate};

/// fee owed on top of the principal: `principal * rate`, floored at
/// Money precision
pub fn fixed_fee(principal: Money, rate: Rate) -> Money {
    Money::from_decimal_floor(principal.as_decimal() * rate.as_decimal())
}

/// full amount that settles a loan: principal plus the fixed fee
pub fn total_due(principal: Money, rate: Rate) -> Money {
    principal + fixed_fee(principal, rate)
}
