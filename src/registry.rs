#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{BookConfig, ConfigError, MatchingListener, NoOpListener, OrderBook};

/// Identifies one instrument's book within a `BookRegistry`. Opaque beyond
/// equality and hashing, mirroring `OrderId`'s treatment of caller-supplied
/// identifiers.
pub type InstrumentId = u32;

/// Owns one `OrderBook` per instrument, created lazily on first use. Trimmed
/// down from the lifecycle-tracking `SymbolRegistry` this is grounded on: no
/// activation states, no thread placement, no eviction — those are outside
/// this core's scope (SPEC_FULL.md §6, "ambient, out of scope for the
/// matching core itself").
pub struct BookRegistry {
    books: RwLock<HashMap<InstrumentId, Arc<OrderBook>>>,
    default_cfg: BookConfig,
}

impl BookRegistry {
    pub fn new(default_cfg: BookConfig) -> Self {
        Self { books: RwLock::new(HashMap::new()), default_cfg }
    }

    /// Returns the book for `id`, creating it with the registry's default
    /// config and a `NoOpListener` if this is the first reference. The
    /// config can't fail validation here since `BookRegistry::new` would
    /// already have been constructed with a bad config, which callers are
    /// expected to catch at startup via `BookConfig::validate`.
    pub fn get_or_create(&self, id: InstrumentId) -> Arc<OrderBook> {
        if let Some(book) = self.books.read().unwrap().get(&id) {
            return book.clone();
        }
        let mut books = self.books.write().unwrap();
        books
            .entry(id)
            .or_insert_with(|| {
                Arc::new(
                    OrderBook::new(self.default_cfg, NoOpListener)
                        .expect("registry's default config was validated at construction"),
                )
            })
            .clone()
    }

    /// Same as `get_or_create`, but wires a specific listener in on first
    /// creation. Has no effect on an already-created book.
    pub fn get_or_create_with_listener(
        &self,
        id: InstrumentId,
        listener: impl MatchingListener + 'static,
    ) -> Result<Arc<OrderBook>, ConfigError> {
        if let Some(book) = self.books.read().unwrap().get(&id) {
            return Ok(book.clone());
        }
        let mut books = self.books.write().unwrap();
        if let Some(book) = books.get(&id) {
            return Ok(book.clone());
        }
        let book = Arc::new(OrderBook::new(self.default_cfg, listener)?);
        books.insert(id, book.clone());
        Ok(book)
    }

    pub fn get(&self, id: InstrumentId) -> Option<Arc<OrderBook>> {
        self.books.read().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.books.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().unwrap().is_empty()
    }
}
