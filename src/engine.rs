// Ledger Engine - the mutation rules of the document.
//
// Both operations validate everything up front and only then touch the
// document, so an error can never leave a partially-applied mutation behind.

use chrono::{Local, NaiveDate};

use crate::document::LedgerDocument;
use crate::entities::{Direction, Transaction, TransactionStatus};
use crate::error::LedgerError;
use crate::money::Money;

/// Input for a single-entry transaction (deposit or withdrawal).
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: String,
    pub direction: Direction,
    pub amount: Money,
    pub description: String,
    pub category: String,
    /// Defaults to today when absent
    pub date: Option<NaiveDate>,
}

/// A created single-entry transaction plus the balance it produced.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub transaction: Transaction,
    pub balance: Money,
}

/// Input for a double-entry transfer between two accounts.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: Money,
    pub description: String,
    /// Defaults to today when absent
    pub date: Option<NaiveDate>,
}

/// The linked debit/credit pair a transfer creates, plus the new source
/// balance. `transactions[0]` is the debit on the source account,
/// `transactions[1]` the credit on the destination.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub new_balance: Money,
    pub transactions: [Transaction; 2],
}

/// Append a single-entry transaction and apply it to the account balance.
///
/// The transaction is created `Pending`. No minimum-balance check applies on
/// this path: a debit may overdraw the account.
pub fn record_transaction(
    doc: &mut LedgerDocument,
    req: NewTransaction,
) -> Result<RecordOutcome, LedgerError> {
    require_positive(req.amount)?;
    require_text("description", &req.description)?;
    require_text("category", &req.category)?;

    let idx = doc
        .account_position(&req.account_id)
        .ok_or_else(|| LedgerError::not_found(format!("account {} not found", req.account_id)))?;

    let transaction = Transaction {
        transaction_id: doc.next_transaction_id(),
        account_id: req.account_id,
        direction: req.direction,
        amount: req.amount,
        description: req.description,
        date: req.date.unwrap_or_else(today),
        category: req.category,
        status: TransactionStatus::Pending,
    };

    doc.accounts[idx].balance += transaction.signed_amount();
    doc.transactions.push(transaction.clone());

    Ok(RecordOutcome {
        balance: doc.accounts[idx].balance,
        transaction,
    })
}

/// Move funds between two accounts as a linked debit/credit pair.
///
/// Both balance changes and both appends happen together after every check
/// has passed; both transactions carry the same date and amount and are
/// created `Completed`.
pub fn transfer(
    doc: &mut LedgerDocument,
    req: TransferRequest,
) -> Result<TransferOutcome, LedgerError> {
    require_positive(req.amount)?;
    require_text("description", &req.description)?;
    if req.from_account == req.to_account {
        return Err(LedgerError::invalid_input(
            "source and destination accounts must differ",
        ));
    }

    let from_idx = doc
        .account_position(&req.from_account)
        .ok_or_else(|| LedgerError::not_found(format!("account {} not found", req.from_account)))?;
    let to_idx = doc
        .account_position(&req.to_account)
        .ok_or_else(|| LedgerError::not_found(format!("account {} not found", req.to_account)))?;

    let available = doc.accounts[from_idx].balance;
    if available < req.amount {
        return Err(LedgerError::InsufficientFunds {
            requested: req.amount,
            available,
        });
    }

    let date = req.date.unwrap_or_else(today);
    let from_name = doc.accounts[from_idx].account_name.clone();
    let to_name = doc.accounts[to_idx].account_name.clone();

    let debit = Transaction {
        transaction_id: doc.next_transaction_id(),
        account_id: req.from_account,
        direction: Direction::Debit,
        amount: req.amount,
        description: format!("Transfer to {}: {}", to_name, req.description),
        date,
        category: "Transfer".to_string(),
        status: TransactionStatus::Completed,
    };
    let credit = Transaction {
        transaction_id: doc.next_transaction_id(),
        account_id: req.to_account,
        direction: Direction::Credit,
        amount: req.amount,
        description: format!("Transfer from {}: {}", from_name, req.description),
        date,
        category: "Transfer".to_string(),
        status: TransactionStatus::Completed,
    };

    doc.accounts[from_idx].balance -= req.amount;
    doc.accounts[to_idx].balance += req.amount;
    doc.transactions.push(debit.clone());
    doc.transactions.push(credit.clone());

    Ok(TransferOutcome {
        new_balance: doc.accounts[from_idx].balance,
        transactions: [debit, credit],
    })
}

fn require_positive(amount: Money) -> Result<(), LedgerError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::invalid_input("amount must be positive"))
    }
}

fn require_text(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        Err(LedgerError::invalid_input(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
