use std::collections::BTreeMap;

use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::ledger::{Transfer, ValueTransfer};
use crate::loan::{Loan, LoanStatus};
use crate::types::{LoanId, LoanTerms, PartyId};

/// registry owning every loan record and executing all state transitions
///
/// Collaborators are passed into each operation: the ledger moves value,
/// the time provider reads the clock. The registry itself holds the
/// ordered, append-only loan map and the escrow vault identity.
///
/// Ordering invariant for every outbound transfer: the loan record is
/// mutated to its post-transition state before the ledger is called, so a
/// call re-entering through the ledger observes a loan already past the
/// transition and is stopped by the ordinary status guards. If the ledger
/// then fails, the pre-transition record is restored before the error
/// propagates; a failed call has no observable effect.
pub struct LoanRegistry {
    loans: BTreeMap<LoanId, Loan>,
    next_id: LoanId,
    vault: PartyId,
    events: EventStore,
}

impl Default for LoanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanRegistry {
    /// create a registry with a fresh vault identity
    pub fn new() -> Self {
        Self::with_vault(Uuid::new_v4())
    }

    /// create a registry escrowing into the given vault account
    pub fn with_vault(vault: PartyId) -> Self {
        Self {
            loans: BTreeMap::new(),
            next_id: 0,
            vault,
            events: EventStore::new(),
        }
    }

    /// identity of the escrow vault holding all collateral
    pub fn vault(&self) -> PartyId {
        self.vault
    }

    /// look up a loan by id
    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans.get(&id).ok_or(LoanError::LoanNotFound { id })
    }

    /// all loans in id order
    pub fn loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.values()
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    /// events emitted so far, without draining them
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// drain the emitted events in call order
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// escrow collateral and open a loan request
    ///
    /// The collateral is the value the borrower attaches to the call: it
    /// is debited into the vault before any record exists, so a failed
    /// debit creates nothing. Principal equals collateral (1:1 cover).
    pub fn request_loan<L: ValueTransfer>(
        &mut self,
        ledger: &mut L,
        time: &SafeTimeProvider,
        borrower: PartyId,
        terms: LoanTerms,
        collateral: Money,
    ) -> Result<LoanId> {
        if collateral <= Money::ZERO {
            return Err(LoanError::InvalidAmount { amount: collateral });
        }
        terms.validate()?;

        ledger.transfer(borrower, self.vault, collateral)?;

        let now = time.now();
        let id = self.next_id;
        self.next_id += 1;

        let loan = Loan {
            id,
            borrower,
            lender: None,
            collateral_amount: collateral,
            loan_amount: collateral,
            interest_rate: terms.interest_rate,
            requested_at: now,
            due_date: now + terms.duration,
            status: LoanStatus::Requested,
            funded_at: None,
            resolved_at: None,
        };

        self.events.emit(Event::LoanRequested {
            loan_id: id,
            borrower,
            collateral_amount: loan.collateral_amount,
            loan_amount: loan.loan_amount,
            interest_rate: loan.interest_rate,
            due_date: loan.due_date,
        });

        self.loans.insert(id, loan);
        Ok(id)
    }

    /// fund a requested loan, disbursing the principal to the borrower
    pub fn fund_loan<L: ValueTransfer>(
        &mut self,
        ledger: &mut L,
        time: &SafeTimeProvider,
        id: LoanId,
        lender: PartyId,
        value: Money,
    ) -> Result<()> {
        let borrower;
        {
            let loan = self
                .loans
                .get_mut(&id)
                .ok_or(LoanError::LoanNotFound { id })?;

            if loan.status != LoanStatus::Requested {
                return Err(LoanError::AlreadyFunded {
                    id,
                    status: loan.status,
                });
            }
            if value != loan.loan_amount {
                return Err(LoanError::IncorrectValue {
                    expected: loan.loan_amount,
                    provided: value,
                });
            }

            // state flips before value moves
            loan.lender = Some(lender);
            loan.status = LoanStatus::Funded;
            loan.funded_at = Some(time.now());
            borrower = loan.borrower;
        }

        if let Err(err) = ledger.transfer(lender, borrower, value) {
            if let Some(loan) = self.loans.get_mut(&id) {
                loan.lender = None;
                loan.status = LoanStatus::Requested;
                loan.funded_at = None;
            }
            return Err(err.into());
        }

        self.events.emit(Event::LoanFunded { loan_id: id, lender });
        Ok(())
    }

    /// settle a funded loan: repayment to the lender, collateral back to
    /// the borrower
    ///
    /// Any party may pay. The full supplied value goes to the lender, so
    /// an overpayment is the payer's loss. Repayment stays open past the
    /// due date until the collateral is actually claimed.
    pub fn repay_loan<L: ValueTransfer>(
        &mut self,
        ledger: &mut L,
        time: &SafeTimeProvider,
        id: LoanId,
        payer: PartyId,
        value: Money,
    ) -> Result<()> {
        let borrower;
        let lender;
        let collateral;
        {
            let loan = self
                .loans
                .get_mut(&id)
                .ok_or(LoanError::LoanNotFound { id })?;

            match loan.status {
                LoanStatus::Requested => {
                    return Err(LoanError::NotFunded {
                        id,
                        status: loan.status,
                    });
                }
                LoanStatus::Repaid | LoanStatus::Defaulted => {
                    return Err(LoanError::AlreadyResolved {
                        id,
                        status: loan.status,
                    });
                }
                LoanStatus::Funded => {}
            }

            let required = loan.total_due();
            if value < required {
                return Err(LoanError::InsufficientValue {
                    required,
                    provided: value,
                });
            }

            let Some(recorded_lender) = loan.lender else {
                return Err(LoanError::NotFunded {
                    id,
                    status: loan.status,
                });
            };

            // state flips before value moves
            loan.status = LoanStatus::Repaid;
            loan.resolved_at = Some(time.now());
            borrower = loan.borrower;
            lender = recorded_lender;
            collateral = loan.collateral_amount;
        }

        let settlement = [
            Transfer { from: payer, to: lender, amount: value },
            Transfer { from: self.vault, to: borrower, amount: collateral },
        ];
        if let Err(err) = ledger.execute(&settlement) {
            if let Some(loan) = self.loans.get_mut(&id) {
                loan.status = LoanStatus::Funded;
                loan.resolved_at = None;
            }
            return Err(err.into());
        }

        self.events.emit(Event::LoanRepaid {
            loan_id: id,
            borrower,
            amount: value,
        });
        Ok(())
    }

    /// forfeit the collateral of an overdue loan to its lender
    pub fn claim_collateral<L: ValueTransfer>(
        &mut self,
        ledger: &mut L,
        time: &SafeTimeProvider,
        id: LoanId,
        caller: PartyId,
    ) -> Result<()> {
        let now = time.now();
        let lender;
        let collateral;
        {
            let loan = self
                .loans
                .get_mut(&id)
                .ok_or(LoanError::LoanNotFound { id })?;

            match loan.status {
                LoanStatus::Requested => {
                    return Err(LoanError::NotFunded {
                        id,
                        status: loan.status,
                    });
                }
                LoanStatus::Repaid | LoanStatus::Defaulted => {
                    return Err(LoanError::AlreadyResolved {
                        id,
                        status: loan.status,
                    });
                }
                LoanStatus::Funded => {}
            }

            // strictly after the due date; the due instant itself is still
            // inside the repayment window
            if !loan.is_overdue(now) {
                return Err(LoanError::NotYetDue {
                    due_date: loan.due_date,
                    now,
                });
            }

            let Some(recorded_lender) = loan.lender else {
                return Err(LoanError::NotFunded {
                    id,
                    status: loan.status,
                });
            };
            if caller != recorded_lender {
                return Err(LoanError::Unauthorized { id, party: caller });
            }

            // state flips before value moves
            loan.status = LoanStatus::Defaulted;
            loan.resolved_at = Some(now);
            lender = recorded_lender;
            collateral = loan.collateral_amount;
        }

        if let Err(err) = ledger.transfer(self.vault, lender, collateral) {
            if let Some(loan) = self.loans.get_mut(&id) {
                loan.status = LoanStatus::Funded;
                loan.resolved_at = None;
            }
            return Err(err.into());
        }

        self.events.emit(Event::CollateralClaimed { loan_id: id, lender });
        Ok(())
    }

    /// serialize durable registry state to json
    ///
    /// Pending events are not durable state and are not exported.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let state = RegistryState {
            next_id: self.next_id,
            vault: self.vault,
            loans: self.loans.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&state)
    }

    /// restore a registry from `to_json` output
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let state: RegistryState = serde_json::from_str(json)?;
        Ok(Self {
            loans: state.loans.into_iter().map(|l| (l.id, l)).collect(),
            next_id: state.next_id,
            vault: state.vault,
            events: EventStore::new(),
        })
    }
}

/// durable registry state for json export/import
#[derive(Debug, Serialize, Deserialize)]
struct RegistryState {
    next_id: LoanId,
    vault: PartyId,
    loans: Vec<Loan>,
}
