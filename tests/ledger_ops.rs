// End-to-end scenarios over the public API: service + store + engine + queries.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use tempfile::TempDir;

use bank_ledger::{
    Direction, JsonStore, LedgerError, LedgerService, Money, NewTransaction, TransactionFilter,
    TransactionStatus, TransferRequest,
};

fn service_in(dir: &TempDir) -> LedgerService {
    LedgerService::open(dir.path().join("bank_data.json"))
}

fn seeded_service(dir: &TempDir) -> LedgerService {
    let service = service_in(dir);
    assert!(service.init_with_sample_data().unwrap());
    service
}

fn date(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 6, day)
}

#[test]
fn seed_transfer_scenario() {
    // Seeded store: ACC001 12500.75, ACC002 45000.50. Transferring 500.00
    // yields 12000.75 / 45500.50 and two identically dated transactions.
    let dir = TempDir::new().unwrap();
    let service = seeded_service(&dir);

    let outcome = service
        .transfer(TransferRequest {
            from_account: "ACC001".to_string(),
            to_account: "ACC002".to_string(),
            amount: Money::from_cents(50000),
            description: "rent split".to_string(),
            date: date(1),
        })
        .unwrap();

    assert_eq!(outcome.new_balance, Money::from_cents(1200075));

    let [debit, credit] = &outcome.transactions;
    assert_eq!(debit.date, credit.date);
    assert_eq!(debit.amount, Money::from_cents(50000));
    assert_eq!(credit.amount, Money::from_cents(50000));
    assert_eq!(debit.status, TransactionStatus::Completed);

    let accounts = service.accounts().unwrap();
    let balance_of = |id: &str| {
        accounts
            .accounts
            .iter()
            .find(|a| a.account_id == id)
            .unwrap()
            .balance
    };
    assert_eq!(balance_of("ACC001"), Money::from_cents(1200075));
    assert_eq!(balance_of("ACC002"), Money::from_cents(4550050));

    // Total balance across accounts is unchanged by an internal transfer.
    assert_eq!(accounts.total_balance, Money::from_cents(6600150));
}

#[test]
fn insufficient_funds_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let service = seeded_service(&dir);

    let before = service.store().load().unwrap();

    let err = service
        .transfer(TransferRequest {
            from_account: "ACC003".to_string(),
            to_account: "ACC001".to_string(),
            amount: Money::from_cents(10_000_00),
            description: "too much".to_string(),
            date: date(1),
        })
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
    assert_eq!(service.store().load().unwrap(), before);
}

#[test]
fn balance_invariant_survives_a_busy_day() {
    let dir = TempDir::new().unwrap();
    let service = seeded_service(&dir);

    let seed_positions: Vec<(String, Money)> = {
        let doc = service.store().load().unwrap();
        doc.accounts
            .iter()
            .map(|a| {
                let applied: Money = doc
                    .transactions
                    .iter()
                    .filter(|t| t.account_id == a.account_id)
                    .map(|t| t.signed_amount())
                    .sum();
                (a.account_id.clone(), a.balance - applied)
            })
            .collect()
    };

    for day in 1..=9 {
        let (direction, account) = if day % 2 == 0 {
            (Direction::Credit, "ACC002")
        } else {
            (Direction::Debit, "ACC001")
        };
        service
            .record_transaction(NewTransaction {
                account_id: account.to_string(),
                direction,
                amount: Money::from_cents(day * 137),
                description: format!("entry {}", day),
                category: "Misc".to_string(),
                date: date(day as u32),
            })
            .unwrap();
    }
    service
        .transfer(TransferRequest {
            from_account: "ACC002".to_string(),
            to_account: "ACC003".to_string(),
            amount: Money::from_cents(250000),
            description: "rebalance".to_string(),
            date: date(10),
        })
        .unwrap();

    let doc = service.store().load().unwrap();
    for (account_id, seed) in seed_positions {
        let applied: Money = doc
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .map(|t| t.signed_amount())
            .sum();
        assert_eq!(
            doc.account(&account_id).unwrap().balance,
            seed + applied,
            "invariant broken for {}",
            account_id
        );
    }
}

#[test]
fn filtered_listing_totals_and_order() {
    let dir = TempDir::new().unwrap();
    let service = seeded_service(&dir);

    let listing = service
        .transactions(&TransactionFilter {
            account_id: Some("ACC001".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert!(listing.transactions.iter().all(|t| t.account_id == "ACC001"));
    for pair in listing.transactions.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }

    let debits: Money = listing
        .transactions
        .iter()
        .filter(|t| t.direction == Direction::Debit)
        .map(|t| t.amount)
        .sum();
    let credits: Money = listing
        .transactions
        .iter()
        .filter(|t| t.direction == Direction::Credit)
        .map(|t| t.amount)
        .sum();
    assert_eq!(listing.summary.total_debits, debits);
    assert_eq!(listing.summary.total_credits, credits);
    assert_eq!(listing.summary.net_flow, credits - debits);
}

#[test]
fn persisted_document_round_trips() {
    let dir = TempDir::new().unwrap();
    let service = seeded_service(&dir);

    service
        .record_transaction(NewTransaction {
            account_id: "ACC001".to_string(),
            direction: Direction::Debit,
            amount: Money::from_cents(1234),
            description: "Coffee".to_string(),
            category: "Food".to_string(),
            date: date(3),
        })
        .unwrap();

    let store = JsonStore::new(dir.path().join("bank_data.json"));
    let doc = store.load().unwrap();

    let copy_path = dir.path().join("copy.json");
    let copy = JsonStore::new(&copy_path);
    copy.save(&doc).unwrap();

    assert_eq!(copy.load().unwrap(), doc);
}

#[test]
fn concurrent_writers_never_collide() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(seeded_service(&dir));

    let handles: Vec<_> = (0..2)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .record_transaction(NewTransaction {
                        account_id: "ACC001".to_string(),
                        direction: Direction::Credit,
                        amount: Money::from_cents(1000 + i),
                        description: format!("concurrent deposit {}", i),
                        category: "Income".to_string(),
                        date: date(5),
                    })
                    .unwrap()
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Distinct identifiers even though both started from the same snapshot.
    assert_ne!(
        outcomes[0].transaction.transaction_id,
        outcomes[1].transaction.transaction_id
    );

    // Both balance changes landed: 12500.75 + 10.00 + 10.01.
    let doc = service.store().load().unwrap();
    assert_eq!(
        doc.account("ACC001").unwrap().balance,
        Money::from_cents(1250075 + 1000 + 1001)
    );
    assert_eq!(doc.transactions.len(), 7);
}
