//! Backup snapshot types.
//!
//! `GET /api/backup` serializes the three core collections into one JSON
//! document; `POST /api/restore` replaces all data from such a document.
//! Row IDs and batch numbers are carried verbatim so a restore reproduces
//! the original dataset exactly.

use serde::{Deserialize, Serialize};

use super::{batch::Batch, customer::Customer, sale::Sale};

/// A full snapshot of the core ledger collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub batches: Vec<Batch>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
}

/// Row counts written by a restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreSummary {
    pub batches: usize,
    pub customers: usize,
    pub sales: usize,
}
