use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest;
use crate::types::{LoanId, PartyId};

/// loan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// collateral escrowed, waiting for a lender
    Requested,
    /// principal disbursed, repayment window open
    Funded,
    /// principal plus fee returned, collateral released to the borrower
    Repaid,
    /// due date passed unpaid, collateral forfeited to the lender
    Defaulted,
}

impl LoanStatus {
    /// no further transitions are permitted from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Repaid | LoanStatus::Defaulted)
    }
}

/// a single collateralized loan record
///
/// Amounts, rate, and due date are fixed at request time and never change;
/// only `status`, `lender`, and `resolved_at` move over the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub borrower: PartyId,
    /// set exactly once, when the loan is funded
    pub lender: Option<PartyId>,
    pub collateral_amount: Money,
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub requested_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: LoanStatus,
    pub funded_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// true once a lender has funded the loan, and for the rest of its life
    pub fn is_funded(&self) -> bool {
        !matches!(self.status, LoanStatus::Requested)
    }

    /// true once the loan reached either terminal outcome
    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    /// minimum value that settles the loan: principal plus the fixed fee
    pub fn total_due(&self) -> Money {
        interest::total_due(self.loan_amount, self.interest_rate)
    }

    /// whether the repayment window has closed at the given instant
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date
    }
}
