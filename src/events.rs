use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{LoanId, PartyId};

/// notifications emitted by the registry, one per successful operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoanRequested {
        loan_id: LoanId,
        borrower: PartyId,
        collateral_amount: Money,
        loan_amount: Money,
        interest_rate: Rate,
        due_date: DateTime<Utc>,
    },
    LoanFunded {
        loan_id: LoanId,
        lender: PartyId,
    },
    LoanRepaid {
        loan_id: LoanId,
        borrower: PartyId,
        amount: Money,
    },
    CollateralClaimed {
        loan_id: LoanId,
        lender: PartyId,
    },
}

impl Event {
    /// id of the loan this event belongs to
    pub fn loan_id(&self) -> LoanId {
        match self {
            Event::LoanRequested { loan_id, .. }
            | Event::LoanFunded { loan_id, .. }
            | Event::LoanRepaid { loan_id, .. }
            | Event::CollateralClaimed { loan_id, .. } => *loan_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
