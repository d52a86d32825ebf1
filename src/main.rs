use anyhow::Result;
use std::env;

use bank_ledger::{LedgerService, TransactionFilter};

/// Store file path, overridable for deployments that keep data elsewhere.
fn store_path() -> String {
    env::var("BANK_LEDGER_DB").unwrap_or_else(|_| "bank_data.json".to_string())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("summary");

    let service = LedgerService::open(store_path());

    match command {
        "init" => run_init(&service)?,
        "summary" => run_summary(&service)?,
        "accounts" => run_accounts(&service)?,
        other => {
            eprintln!("unknown command: {}", other);
            eprintln!("usage: bank-ledger [init|summary|accounts]");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn run_init(service: &LedgerService) -> Result<()> {
    if service.init_with_sample_data()? {
        println!("✓ Store initialized with sample data: {}", service.store().path().display());
    } else {
        println!("✓ Store already exists, left unchanged: {}", service.store().path().display());
    }
    Ok(())
}

fn run_summary(service: &LedgerService) -> Result<()> {
    let report = service.summary()?;
    let s = &report.summary;

    println!("Financial summary");
    println!("  Total balance:      {}", s.total_balance);
    println!("  Accounts:           {}", s.total_accounts);
    println!("  Active cards:       {}", s.active_cards);
    println!("  Transactions:       {}", s.total_transactions);

    if !report.spending_by_category.is_empty() {
        println!("\nSpending by category");
        for entry in &report.spending_by_category {
            println!("  {:<12} {}", entry.category, entry.amount);
        }
    }

    if !s.recent_transactions.is_empty() {
        println!("\nRecent transactions");
        for tx in &s.recent_transactions {
            println!(
                "  {} {} {:>6} {:>10}  {}",
                tx.transaction_id,
                tx.date,
                tx.direction.as_str(),
                tx.amount.to_string(),
                tx.description
            );
        }
    }

    Ok(())
}

fn run_accounts(service: &LedgerService) -> Result<()> {
    let overview = service.accounts()?;

    println!("Accounts ({})", overview.count);
    for account in &overview.accounts {
        println!(
            "  {} {:<10} {:<10} {:>12}  {}",
            account.account_id,
            account.account_type.as_str(),
            account.status.as_str(),
            account.balance.to_string(),
            account.account_name
        );
    }
    println!("  Total balance: {}", overview.total_balance);

    // A quick sanity line: how many entries the ledger holds.
    let listing = service.transactions(&TransactionFilter::default())?;
    println!("  Ledger entries: {}", listing.summary.total_transactions);

    Ok(())
}
