use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::loan::LoanStatus;
use crate::types::{LoanId, PartyId};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid collateral amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid loan duration: {seconds}s")]
    InvalidDuration {
        seconds: i64,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("loan {id} already funded: current status is {status:?}")]
    AlreadyFunded {
        id: LoanId,
        status: LoanStatus,
    },

    #[error("loan {id} not funded: current status is {status:?}")]
    NotFunded {
        id: LoanId,
        status: LoanStatus,
    },

    #[error("loan {id} already resolved: current status is {status:?}")]
    AlreadyResolved {
        id: LoanId,
        status: LoanStatus,
    },

    #[error("incorrect funding value: expected {expected}, provided {provided}")]
    IncorrectValue {
        expected: Money,
        provided: Money,
    },

    #[error("insufficient repayment value: required {required}, provided {provided}")]
    InsufficientValue {
        required: Money,
        provided: Money,
    },

    #[error("loan not yet due: due {due_date}, current time {now}")]
    NotYetDue {
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("party {party} is not the lender of loan {id}")]
    Unauthorized {
        id: LoanId,
        party: PartyId,
    },

    #[error("value transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient balance: {party} holds {available}, requested {requested}")]
    InsufficientBalance {
        party: PartyId,
        available: Money,
        requested: Money,
    },

    #[error("transfer rejected by recipient {party}")]
    Rejected {
        party: PartyId,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
