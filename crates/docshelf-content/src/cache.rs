//! Read-through document cache.
//!
//! [`DocumentCache`] sits in front of a [`DocumentLoader`]. A hit returns the
//! stored [`Document`] without touching the source; a miss loads the file,
//! offers it to the [`CacheStore`], and returns it.
//!
//! The store decides what "offer" means. [`MemoryStore`] keeps the first
//! value stored for a key, so two concurrent misses may both load, and the
//! later one is discarded by the store while still being returned to its
//! caller. Nothing is ever invalidated by the cache itself.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use docshelf_core::Result;
use log::debug;

use crate::document::{Document, DocumentLoader};

/// Key-value store backing a [`DocumentCache`].
pub trait CacheStore: Send + Sync {
    /// Fetch the document stored under `key`.
    fn get(&self, key: &str) -> Option<Arc<Document>>;

    /// Store `doc` under `key` unless the key is already present.
    ///
    /// Returns `true` if the value was stored.
    fn add(&self, key: &str, doc: Arc<Document>) -> bool;
}

/// In-process [`CacheStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Arc<Document>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Arc<Document>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn add(&self, key: &str, doc: Arc<Document>) -> bool {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(doc);
                true
            }
        }
    }
}

/// Read-through cache of parsed documents, keyed by filename.
#[derive(Clone)]
pub struct DocumentCache {
    loader: DocumentLoader,
    store: Arc<dyn CacheStore>,
}

impl DocumentCache {
    /// Create a cache backed by a fresh [`MemoryStore`].
    pub fn new(loader: DocumentLoader) -> Self {
        Self::with_store(loader, Arc::new(MemoryStore::new()))
    }

    /// Create a cache backed by `store`.
    pub fn with_store(loader: DocumentLoader, store: Arc<dyn CacheStore>) -> Self {
        Self { loader, store }
    }

    /// The loader used on misses.
    pub fn loader(&self) -> &DocumentLoader {
        &self.loader
    }

    /// Get `file`, loading it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates loader errors; failed loads are not cached.
    pub async fn get_document(&self, file: &str) -> Result<Arc<Document>> {
        if let Some(doc) = self.store.get(file) {
            return Ok(doc);
        }

        debug!("document cache miss: {file}");
        let doc = Arc::new(self.loader.load(file).await?);
        self.store.add(file, Arc::clone(&doc));
        Ok(doc)
    }
}
