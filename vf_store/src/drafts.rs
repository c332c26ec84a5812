use std::collections::HashMap;

use vf_document::Document;

/// Best-effort draft persistence, modelled on browser local storage: writes
/// can silently fail when the store is full, and callers must tolerate that
/// as a no-op. Failures are logged and swallowed, never surfaced.
pub trait DraftCache {
    fn save_draft(&mut self, key: &str, document: &Document);
    fn load_draft(&self, key: &str) -> Option<Document>;
    fn discard_draft(&mut self, key: &str);
}

/// In-memory draft cache with a byte budget standing in for the storage
/// quota. Drafts are kept as serialized JSON, matching what a real
/// local-storage backend would hold.
#[derive(Debug)]
pub struct MemoryDraftCache {
    entries: HashMap<String, String>,
    capacity_bytes: usize,
}

impl MemoryDraftCache {
    pub fn new(capacity_bytes: usize) -> Self {
        MemoryDraftCache {
            entries: HashMap::new(),
            capacity_bytes,
        }
    }

    fn used_bytes(&self) -> usize {
        self.entries.values().map(String::len).sum()
    }
}

impl DraftCache for MemoryDraftCache {
    fn save_draft(&mut self, key: &str, document: &Document) {
        let json = match serde_json::to_string(document) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("draft '{}' not saved: {}", key, err);
                return;
            }
        };
        let existing = self.entries.get(key).map(String::len).unwrap_or(0);
        if self.used_bytes() - existing + json.len() > self.capacity_bytes {
            log::warn!("draft '{}' not saved: draft storage full", key);
            return;
        }
        self.entries.insert(key.to_string(), json);
    }

    fn load_draft(&self, key: &str) -> Option<Document> {
        let json = self.entries.get(key)?;
        match serde_json::from_str(json) {
            Ok(document) => Some(document),
            Err(err) => {
                log::warn!("draft '{}' unreadable: {}", key, err);
                None
            }
        }
    }

    fn discard_draft(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
