/// json state - export registry state and restore it later
use collateralized_loan_rs::{
    InMemoryLedger, LoanRegistry, LoanTerms, Money, Rate, SafeTimeProvider, TimeSource, Uuid,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json state example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));

    let mut ledger = InMemoryLedger::new();
    let borrower = Uuid::new_v4();
    let lender = Uuid::new_v4();
    ledger.deposit(borrower, Money::from_major(10));
    ledger.deposit(lender, Money::from_major(10));

    let mut registry = LoanRegistry::new();
    let terms = LoanTerms::new(Rate::from_bps(500), Duration::days(30));
    let id = registry.request_loan(&mut ledger, &time, borrower, terms, Money::from_major(2))?;
    registry.fund_loan(&mut ledger, &time, id, lender, Money::from_major(2))?;

    let json = registry.to_json()?;
    println!("exported state:\n{}\n", json);

    let restored = LoanRegistry::from_json(&json)?;
    let loan = restored.loan(id)?;
    println!("restored loan {}: {:?}, total due {}", loan.id, loan.status, loan.total_due());

    Ok(())
}
