use std::collections::{HashMap, HashSet};

use crate::decimal::Money;
use crate::errors::TransferError;
use crate::types::PartyId;

/// a single value movement between two parties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: PartyId,
    pub to: PartyId,
    pub amount: Money,
}

/// the host's atomic value-movement primitive
///
/// `execute` applies a batch all-or-nothing: if any leg fails, no balance
/// changes at all. The crediting side may reject a transfer, which counts
/// as a failure of that leg.
pub trait ValueTransfer {
    fn execute(&mut self, batch: &[Transfer]) -> Result<(), TransferError>;

    /// single-transfer convenience
    fn transfer(
        &mut self,
        from: PartyId,
        to: PartyId,
        amount: Money,
    ) -> Result<(), TransferError> {
        self.execute(&[Transfer { from, to, amount }])
    }
}

/// in-memory reference ledger
///
/// Holds one balance per party. Parties marked rejecting refuse every
/// incoming credit, which is how tests and demos model an adversarial
/// recipient.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<PartyId, Money>,
    rejecting: HashSet<PartyId>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// seed a party's balance
    pub fn deposit(&mut self, party: PartyId, amount: Money) {
        *self.balances.entry(party).or_insert(Money::ZERO) += amount;
    }

    pub fn balance_of(&self, party: PartyId) -> Money {
        self.balances.get(&party).copied().unwrap_or(Money::ZERO)
    }

    /// make a party refuse all incoming transfers
    pub fn reject_incoming(&mut self, party: PartyId) {
        self.rejecting.insert(party);
    }

    /// make a party accept incoming transfers again
    pub fn accept_incoming(&mut self, party: PartyId) {
        self.rejecting.remove(&party);
    }

    /// sum of all balances, for conservation checks
    pub fn total_value(&self) -> Money {
        self.balances
            .values()
            .fold(Money::ZERO, |acc, b| acc + *b)
    }
}

impl ValueTransfer for InMemoryLedger {
    fn execute(&mut self, batch: &[Transfer]) -> Result<(), TransferError> {
        // stage every leg against a scratch copy; commit only if all clear
        let mut staged = self.balances.clone();
        for transfer in batch {
            if self.rejecting.contains(&transfer.to) {
                return Err(TransferError::Rejected { party: transfer.to });
            }
            let available = staged
                .get(&transfer.from)
                .copied()
                .unwrap_or(Money::ZERO);
            if available < transfer.amount {
                return Err(TransferError::InsufficientBalance {
                    party: transfer.from,
                    available,
                    requested: transfer.amount,
                });
            }
            *staged.entry(transfer.from).or_insert(Money::ZERO) -= transfer.amount;
            *staged.entry(transfer.to).or_insert(Money::ZERO) += transfer.amount;
        }
        self.balances = staged;
        Ok(())
    }
}
