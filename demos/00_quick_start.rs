/// quick start - request, fund, and repay a collateralized loan
use collateralized_loan_rs::{
    InMemoryLedger, LoanRegistry, LoanTerms, Money, Rate, SafeTimeProvider, TimeSource, Uuid,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== quick start example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));

    // two parties with seeded balances
    let mut ledger = InMemoryLedger::new();
    let borrower = Uuid::new_v4();
    let lender = Uuid::new_v4();
    ledger.deposit(borrower, Money::from_major(10));
    ledger.deposit(lender, Money::from_major(10));

    let mut registry = LoanRegistry::new();

    // borrower escrows 1.0 as collateral for a week-long loan at 5%
    let terms = LoanTerms::new(Rate::from_percentage(5), Duration::days(7));
    let id = registry.request_loan(&mut ledger, &time, borrower, terms, Money::from_major(1))?;
    println!("loan {} requested, due {}", id, registry.loan(id)?.due_date);

    // lender funds the exact principal; it lands with the borrower
    registry.fund_loan(&mut ledger, &time, id, lender, Money::from_major(1))?;
    println!("loan {} funded, borrower balance: {}", id, ledger.balance_of(borrower));

    // borrower repays principal plus fee; collateral comes back
    let due = registry.loan(id)?.total_due();
    registry.repay_loan(&mut ledger, &time, id, borrower, due)?;
    println!("loan {} repaid with {}", id, due);

    println!("\nfinal status: {:?}", registry.loan(id)?.status);
    println!("borrower: {}", ledger.balance_of(borrower));
    println!("lender:   {}", ledger.balance_of(lender));

    for event in registry.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
