// Ledger Document - the aggregate root.
//
// One document holds every account, transaction, and card, and is persisted
// as a single unit. Transaction identifiers come from an explicit sequence
// counter stored on the document itself, incremented with each append, so
// identifiers stay unique regardless of how the transaction list evolves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{
    Account, AccountStatus, AccountType, Card, CardStatus, Direction, Transaction,
    TransactionStatus,
};
use crate::money::Money;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub accounts: Vec<Account>,

    /// Insertion order is identifier order
    pub transactions: Vec<Transaction>,

    pub cards: Vec<Card>,

    /// Next transaction sequence number. Zero means "not yet assigned";
    /// documents written before this field existed load with zero and are
    /// reconciled against the transaction count.
    #[serde(default)]
    pub next_transaction_seq: u64,
}

impl LedgerDocument {
    /// Look up an account by id.
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.account_id == account_id)
    }

    pub(crate) fn account_position(&self, account_id: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.account_id == account_id)
    }

    /// Ensure the sequence counter is ahead of every stored transaction.
    ///
    /// Documents from before the counter existed (or hand-assembled ones)
    /// carry zero here; for an append-only history `len + 1` is exactly what
    /// the next identifier must be.
    pub fn reconcile_sequence(&mut self) {
        let floor = self.transactions.len() as u64 + 1;
        if self.next_transaction_seq < floor {
            self.next_transaction_seq = floor;
        }
    }

    /// Allocate the next transaction identifier ("TXN" + zero-padded
    /// sequence) and advance the counter.
    pub(crate) fn next_transaction_id(&mut self) -> String {
        self.reconcile_sequence();
        let id = format!("TXN{:03}", self.next_transaction_seq);
        self.next_transaction_seq += 1;
        id
    }

    /// The starter document written on first run: three accounts, five
    /// transactions, two cards.
    pub fn sample() -> Self {
        let accounts = vec![
            account("ACC001", "John Doe", AccountType::Checking, 1250075),
            account("ACC002", "John Doe", AccountType::Savings, 4500050),
            account("ACC003", "Jane Smith", AccountType::Checking, 850025),
        ];

        let transactions = vec![
            seed_tx("TXN001", "ACC001", Direction::Debit, 25000, "Grocery Store", 15, "Food"),
            seed_tx("TXN002", "ACC001", Direction::Credit, 150000, "Salary Deposit", 14, "Income"),
            seed_tx("TXN003", "ACC002", Direction::Credit, 50000, "Transfer from Checking", 13, "Transfer"),
            seed_tx("TXN004", "ACC001", Direction::Debit, 8999, "Online Shopping", 12, "Shopping"),
            seed_tx("TXN005", "ACC003", Direction::Debit, 120000, "Rent Payment", 10, "Housing"),
        ];

        let cards = vec![
            Card {
                card_id: "CARD001".to_string(),
                card_number: "**** **** **** 1234".to_string(),
                card_type: "Visa Debit".to_string(),
                account_id: "ACC001".to_string(),
                expiry: "12/2026".to_string(),
                status: CardStatus::Active,
                spent_this_month: Money::from_cents(125075),
            },
            Card {
                card_id: "CARD002".to_string(),
                card_number: "**** **** **** 5678".to_string(),
                card_type: "Mastercard Credit".to_string(),
                account_id: "ACC002".to_string(),
                expiry: "08/2025".to_string(),
                status: CardStatus::Active,
                spent_this_month: Money::from_cents(50000),
            },
        ];

        LedgerDocument {
            accounts,
            transactions,
            cards,
            next_transaction_seq: 6,
        }
    }
}

fn account(id: &str, name: &str, account_type: AccountType, cents: i64) -> Account {
    Account {
        account_id: id.to_string(),
        account_name: name.to_string(),
        account_type,
        balance: Money::from_cents(cents),
        currency: "USD".to_string(),
        status: AccountStatus::Active,
    }
}

fn seed_tx(
    id: &str,
    account_id: &str,
    direction: Direction,
    cents: i64,
    description: &str,
    day: u32,
    category: &str,
) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
        account_id: account_id.to_string(),
        direction,
        amount: Money::from_cents(cents),
        description: description.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, day).expect("valid seed date"),
        category: category.to_string(),
        status: TransactionStatus::Completed,
    }
}
