/// default path - advance controlled time past the due date and claim
use collateralized_loan_rs::{
    InMemoryLedger, LoanError, LoanRegistry, LoanTerms, Money, Rate, SafeTimeProvider, TimeSource,
    Uuid,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== default and claim example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = InMemoryLedger::new();
    let borrower = Uuid::new_v4();
    let lender = Uuid::new_v4();
    ledger.deposit(borrower, Money::from_major(10));
    ledger.deposit(lender, Money::from_major(10));

    let mut registry = LoanRegistry::new();
    let terms = LoanTerms::new(Rate::from_percentage(5), Duration::days(7));
    let id = registry.request_loan(&mut ledger, &time, borrower, terms, Money::from_major(1))?;
    registry.fund_loan(&mut ledger, &time, id, lender, Money::from_major(1))?;
    println!("loan {} funded on {}", id, time.now().format("%Y-%m-%d"));

    // too early: the claim is rejected
    match registry.claim_collateral(&mut ledger, &time, id, lender) {
        Err(LoanError::NotYetDue { due_date, .. }) => {
            println!("claim rejected, loan not due until {}", due_date);
        }
        other => println!("unexpected: {:?}", other.err()),
    }

    // a day past the due date the borrower still has not repaid
    controller.advance(Duration::days(8));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));

    registry.claim_collateral(&mut ledger, &time, id, lender)?;
    println!("collateral claimed by lender");

    println!("\nfinal status: {:?}", registry.loan(id)?.status);
    println!("borrower: {} (kept the principal)", ledger.balance_of(borrower));
    println!("lender:   {} (recovered the collateral)", ledger.balance_of(lender));

    Ok(())
}
