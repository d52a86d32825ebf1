// Account - the balance-carrying record of the ledger document.
//
// Accounts are only ever mutated by the ledger engine, and only their balance
// changes; they are never deleted.

use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Checking account (debit card, daily transactions)
    Checking,

    /// Savings account (interest-bearing)
    Savings,

    /// Credit card (credit line)
    Credit,

    /// Investment account (brokerage, stocks, bonds)
    Investment,

    /// Other / Unknown
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::Credit => "Credit",
            AccountType::Investment => "Investment",
            AccountType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Closed,
    Frozen,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Closed => "Closed",
            AccountStatus::Frozen => "Frozen",
        }
    }
}

/// A single account record.
///
/// Invariant: `balance` equals the account's seed balance plus the sum of all
/// credit amounts minus the sum of all debit amounts ever applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, e.g. "ACC001"
    pub account_id: String,

    /// Owner name
    pub account_name: String,

    pub account_type: AccountType,

    /// Current balance, maintained by the ledger engine
    pub balance: Money,

    /// ISO 4217 currency code (USD, EUR, MXN, ...)
    pub currency: String,

    pub status: AccountStatus,
}
