//! In-memory holding area for built documents awaiting download.
//!
//! Documents live only as long as the process. The oldest ones are dropped
//! once the store is full.

use dashmap::DashMap;
use kairo_core::OutputDocument;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Default number of documents kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 1024;

pub struct DocumentStore {
    documents: DashMap<Uuid, OutputDocument>,
    /// Insertion order, oldest first.
    order: Mutex<VecDeque<Uuid>>,
    capacity: usize,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            documents: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Store a document and return the id it can be fetched with.
    pub fn insert(&self, document: OutputDocument) -> Uuid {
        let id = Uuid::new_v4();
        self.documents.insert(id, document);

        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        order.push_back(id);
        while order.len() > self.capacity {
            if let Some(evicted) = order.pop_front() {
                self.documents.remove(&evicted);
                tracing::debug!(document_id = %evicted, "evicted stored document");
            }
        }

        id
    }

    pub fn get(&self, id: &Uuid) -> Option<OutputDocument> {
        self.documents.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
