// Persistence Store - flat JSON document storage.
//
// The whole ledger document is the unit of read and write. Saves go through
// a sibling temp file and an atomic rename so a crash mid-write never leaves
// a corrupt store behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::document::LedgerDocument;
use crate::error::LedgerError;

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the full document.
    ///
    /// A missing file yields an empty document. Malformed stored data is a
    /// `Store` error surfaced to the caller, never silently repaired.
    pub fn load(&self) -> Result<LedgerDocument, LedgerError> {
        if !self.path.exists() {
            return Ok(LedgerDocument::default());
        }

        let file = File::open(&self.path).map_err(|e| {
            LedgerError::Store(format!("failed to open {}: {}", self.path.display(), e))
        })?;

        let mut doc: LedgerDocument =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                LedgerError::Store(format!("failed to parse {}: {}", self.path.display(), e))
            })?;

        // Documents written before the sequence counter existed carry zero.
        doc.reconcile_sequence();
        Ok(doc)
    }

    /// Atomically replace the persisted document.
    pub fn save(&self, doc: &LedgerDocument) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LedgerError::Store(format!(
                        "failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Temp file must live in the same directory for the rename to be atomic.
        let temp_path = self.path.with_extension("json.tmp");

        let file = File::create(&temp_path).map_err(|e| {
            LedgerError::Store(format!("failed to create {}: {}", temp_path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, doc)
            .map_err(|e| LedgerError::Store(format!("failed to serialize document: {}", e)))?;

        writer
            .flush()
            .map_err(|e| LedgerError::Store(format!("failed to flush document: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| LedgerError::Store(format!("failed to sync document: {}", e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LedgerError::Store(format!("failed to replace {}: {}", self.path.display(), e))
        })
    }

    /// Write the seed document only when no store exists yet.
    ///
    /// Returns whether the seed was written, so repeated startups never
    /// clobber real data.
    pub fn initialize_if_absent(&self, seed: &LedgerDocument) -> Result<bool, LedgerError> {
        if self.exists() {
            return Ok(false);
        }
        self.save(seed)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("bank_data.json"))
    }

    #[test]
    fn test_load_missing_returns_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let doc = store.load().unwrap();
        assert!(doc.accounts.is_empty());
        assert!(doc.transactions.is_empty());
        assert!(doc.cards.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let doc = LedgerDocument::sample();
        store.save(&doc).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, doc);
        assert_eq!(
            loaded.account("ACC002").unwrap().balance,
            Money::from_cents(4500050)
        );
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&LedgerDocument::sample()).unwrap();

        assert!(store.exists());
        assert!(!dir.path().join("bank_data.json.tmp").exists());
    }

    #[test]
    fn test_initialize_if_absent_runs_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.initialize_if_absent(&LedgerDocument::sample()).unwrap());

        // Second call must not clobber existing data.
        let mut modified = store.load().unwrap();
        modified.accounts[0].balance = Money::from_cents(1);
        store.save(&modified).unwrap();

        assert!(!store.initialize_if_absent(&LedgerDocument::sample()).unwrap());
        assert_eq!(
            store.load().unwrap().accounts[0].balance,
            Money::from_cents(1)
        );
    }

    #[test]
    fn test_malformed_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "not json at all").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, LedgerError::Store(_)));
    }

    #[test]
    fn test_load_reconciles_missing_counter() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        // A document in the pre-counter layout: no next_transaction_seq field.
        let legacy = serde_json::json!({
            "accounts": [],
            "transactions": [
                {
                    "transaction_id": "TXN001",
                    "account_id": "ACC001",
                    "type": "debit",
                    "amount": 250.00,
                    "description": "Grocery Store",
                    "date": "2024-01-15",
                    "category": "Food",
                    "status": "Completed"
                }
            ],
            "cards": []
        });
        fs::write(store.path(), legacy.to_string()).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.next_transaction_seq, 2);
    }
}
