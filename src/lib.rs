pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod loan;
pub mod registry;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result, TransferError};
pub use events::{Event, EventStore};
pub use ledger::{InMemoryLedger, Transfer, ValueTransfer};
pub use loan::{Loan, LoanStatus};
pub use registry::LoanRegistry;
pub use types::{LoanId, LoanTerms, PartyId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
