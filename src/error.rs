// Error kinds for the ledger engine and persistence store.
//
// Every fallible operation in the library returns one of these variants so
// callers (the HTTP server, the CLI) can map errors to responses without
// inspecting message strings.

use crate::money::Money;

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    /// A required field is missing, empty, or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced account does not exist in the document.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transfer source balance is below the requested amount.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// Persistence read or write failure, including malformed stored data.
    #[error("store failure: {0}")]
    Store(String),
}

impl LedgerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        LedgerError::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }
}
