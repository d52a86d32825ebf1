// LedgerService - the transport-independent API surface.
//
// Owns the store and the process-wide writer lock. Every mutation runs its
// whole load-mutate-save sequence inside the critical section; two racing
// writers would otherwise lose updates and could collide on transaction
// identifiers. Queries read a freshly loaded snapshot without the lock and
// accept eventual consistency with in-flight writes.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::document::LedgerDocument;
use crate::engine::{self, NewTransaction, RecordOutcome, TransferOutcome, TransferRequest};
use crate::error::LedgerError;
use crate::query::{
    self, AccountDetail, AccountsOverview, CardListing, SummaryReport, TransactionFilter,
    TransactionListing,
};
use crate::store::JsonStore;

pub struct LedgerService {
    store: JsonStore,
    write_lock: Mutex<()>,
}

impl LedgerService {
    pub fn new(store: JsonStore) -> Self {
        LedgerService {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonStore::new(path))
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Populate the store with the sample document on first run.
    ///
    /// Returns whether seeding happened; an existing store is left alone.
    pub fn init_with_sample_data(&self) -> Result<bool, LedgerError> {
        let _guard = self.write_guard();
        self.store.initialize_if_absent(&LedgerDocument::sample())
    }

    // ------------------------------------------------------------------
    // Queries (lock-free, fresh snapshot per call)
    // ------------------------------------------------------------------

    pub fn accounts(&self) -> Result<AccountsOverview, LedgerError> {
        Ok(query::accounts_overview(&self.store.load()?))
    }

    pub fn account(&self, account_id: &str) -> Result<AccountDetail, LedgerError> {
        query::account_detail(&self.store.load()?, account_id)
    }

    pub fn transactions(&self, filter: &TransactionFilter) -> Result<TransactionListing, LedgerError> {
        Ok(query::list_transactions(&self.store.load()?, filter))
    }

    pub fn cards(&self) -> Result<CardListing, LedgerError> {
        Ok(query::card_listing(&self.store.load()?))
    }

    pub fn summary(&self) -> Result<SummaryReport, LedgerError> {
        Ok(query::financial_summary(&self.store.load()?))
    }

    // ------------------------------------------------------------------
    // Mutations (single-writer critical section)
    // ------------------------------------------------------------------

    pub fn record_transaction(&self, req: NewTransaction) -> Result<RecordOutcome, LedgerError> {
        let _guard = self.write_guard();
        let mut doc = self.store.load()?;
        let outcome = engine::record_transaction(&mut doc, req)?;
        self.store.save(&doc)?;
        Ok(outcome)
    }

    pub fn transfer(&self, req: TransferRequest) -> Result<TransferOutcome, LedgerError> {
        let _guard = self.write_guard();
        let mut doc = self.store.load()?;
        let outcome = engine::transfer(&mut doc, req)?;
        self.store.save(&doc)?;
        Ok(outcome)
    }

    fn write_guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked; the store file
        // itself is still consistent (saves are atomic), so continue.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
