// Query/Aggregation Layer - read-only projections over a document snapshot.
//
// Nothing in here mutates the document; every function takes a snapshot by
// reference and builds a serializable view.

use chrono::NaiveDate;
use serde::Serialize;

use crate::document::LedgerDocument;
use crate::entities::{Account, Card, CardStatus, Direction, Transaction};
use crate::error::LedgerError;
use crate::money::Money;

/// How many transactions "recent" means on the account detail view.
const RECENT_PER_ACCOUNT: usize = 10;

/// How many transactions the financial summary shows.
const RECENT_IN_SUMMARY: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct AccountsOverview {
    pub accounts: Vec<Account>,
    pub total_balance: Money,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountDetail {
    pub account: Account,
    pub recent_transactions: Vec<Transaction>,
}

/// Optional transaction filters, applied as a conjunction.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    fn matches(&self, tx: &Transaction) -> bool {
        if let Some(account_id) = &self.account_id {
            if tx.account_id != *account_id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if tx.category != *category {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if tx.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if tx.date > end {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub total_transactions: usize,
    pub total_debits: Money,
    pub total_credits: Money,
    /// credits - debits over the filtered set
    pub net_flow: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListing {
    pub transactions: Vec<Transaction>,
    pub summary: TransactionSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardListing {
    pub cards: Vec<Card>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub total_balance: Money,
    pub total_accounts: usize,
    pub active_cards: usize,
    pub total_transactions: usize,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub summary: FinancialSummary,
    pub spending_by_category: Vec<CategoryTotal>,
}

/// All accounts plus the sum of their balances.
pub fn accounts_overview(doc: &LedgerDocument) -> AccountsOverview {
    let total_balance = doc.accounts.iter().map(|a| a.balance).sum();
    AccountsOverview {
        accounts: doc.accounts.clone(),
        total_balance,
        count: doc.accounts.len(),
    }
}

/// One account and its most recent transactions (last 10 by insertion order).
pub fn account_detail(doc: &LedgerDocument, account_id: &str) -> Result<AccountDetail, LedgerError> {
    let account = doc
        .account(account_id)
        .ok_or_else(|| LedgerError::not_found(format!("account {} not found", account_id)))?
        .clone();

    let matching: Vec<&Transaction> = doc
        .transactions
        .iter()
        .filter(|t| t.account_id == account_id)
        .collect();
    let recent_transactions = matching
        .iter()
        .skip(matching.len().saturating_sub(RECENT_PER_ACCOUNT))
        .map(|t| (*t).clone())
        .collect();

    Ok(AccountDetail {
        account,
        recent_transactions,
    })
}

/// Filter, sort (date descending, stable on ties), and total transactions.
pub fn list_transactions(doc: &LedgerDocument, filter: &TransactionFilter) -> TransactionListing {
    let mut transactions: Vec<Transaction> = doc
        .transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    let mut total_debits = Money::zero();
    let mut total_credits = Money::zero();
    for tx in &transactions {
        match tx.direction {
            Direction::Debit => total_debits += tx.amount,
            Direction::Credit => total_credits += tx.amount,
        }
    }

    let summary = TransactionSummary {
        total_transactions: transactions.len(),
        total_debits,
        total_credits,
        net_flow: total_credits - total_debits,
    };

    TransactionListing {
        transactions,
        summary,
    }
}

pub fn card_listing(doc: &LedgerDocument) -> CardListing {
    CardListing {
        cards: doc.cards.clone(),
        count: doc.cards.len(),
    }
}

/// Aggregate figures plus debit totals grouped by category.
///
/// Categories appear in first-appearance order over the transaction list,
/// not sorted.
pub fn financial_summary(doc: &LedgerDocument) -> SummaryReport {
    let total_balance = doc.accounts.iter().map(|a| a.balance).sum();
    let active_cards = doc
        .cards
        .iter()
        .filter(|c| c.status == CardStatus::Active)
        .count();

    let recent_transactions: Vec<Transaction> = doc
        .transactions
        .iter()
        .skip(doc.transactions.len().saturating_sub(RECENT_IN_SUMMARY))
        .cloned()
        .collect();

    let mut spending_by_category: Vec<CategoryTotal> = Vec::new();
    for tx in &doc.transactions {
        if tx.direction != Direction::Debit {
            continue;
        }
        match spending_by_category
            .iter_mut()
            .find(|c| c.category == tx.category)
        {
            Some(entry) => entry.amount += tx.amount,
            None => spending_by_category.push(CategoryTotal {
                category: tx.category.clone(),
                amount: tx.amount,
            }),
        }
    }

    SummaryReport {
        summary: FinancialSummary {
            total_balance,
            total_accounts: doc.accounts.len(),
            active_cards,
            total_transactions: doc.transactions.len(),
            recent_transactions,
        },
        spending_by_category,
    }
}
