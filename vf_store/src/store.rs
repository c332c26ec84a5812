use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vf_document::{Document, DocumentError};

/// What the store hands back: the document plus the store's own idea of when
/// it first appeared and was last written.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub document: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seam to whatever holds saved documents. In this repo that is an in-memory
/// collection; a real deployment would put an API client behind the same
/// trait.
pub trait DocumentStore {
    /// Write the whole document. An existing id is replaced in place and
    /// keeps its original `created_at`; a new id is appended. There are no
    /// partial writes.
    fn save(&mut self, document: &Document) -> Result<StoredDocument, DocumentError>;

    fn list(&self) -> Vec<StoredDocument>;

    fn get(&self, id: &str) -> Option<StoredDocument>;
}

/// Ordered in-memory store keyed by document id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<StoredDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, document: &Document) -> Result<StoredDocument, DocumentError> {
        document.verify()?;
        let now = Utc::now();
        if let Some(existing) = self.items.iter_mut().find(|s| s.document.id == document.id) {
            existing.document = document.clone();
            existing.updated_at = now;
            log::debug!("replaced document '{}' in store", document.id);
            return Ok(existing.clone());
        }
        let stored = StoredDocument {
            document: document.clone(),
            created_at: now,
            updated_at: now,
        };
        self.items.push(stored.clone());
        log::debug!("appended document '{}' to store", document.id);
        Ok(stored)
    }

    fn list(&self) -> Vec<StoredDocument> {
        self.items.clone()
    }

    fn get(&self, id: &str) -> Option<StoredDocument> {
        self.items.iter().find(|s| s.document.id == id).cloned()
    }
}
