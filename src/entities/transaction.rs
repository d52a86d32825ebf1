// Transaction - a single ledger entry.
//
// Transactions are created by the ledger engine and immutable afterwards.
// The wire field name for the direction is "type", matching the persisted
// document layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Whether a transaction adds to or subtracts from the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }
}

/// Lifecycle state of a transaction.
///
/// Single-entry transactions are created `Pending`; the two halves of a
/// transfer are created `Completed` directly. No further transitions are
/// modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, e.g. "TXN001", assigned from the document's
    /// persisted sequence counter
    pub transaction_id: String,

    /// The account this entry applies to
    pub account_id: String,

    #[serde(rename = "type")]
    pub direction: Direction,

    /// Strictly positive; the direction determines the sign applied to the
    /// account balance
    pub amount: Money,

    pub description: String,

    /// Calendar date in ISO form (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Free-form label such as "Food" or "Transfer"
    pub category: String,

    pub status: TransactionStatus,
}

impl Transaction {
    /// The amount with the direction's sign applied: positive for credits,
    /// negative for debits.
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}
