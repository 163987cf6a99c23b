#![allow(dead_code)]

/// Construction-time tuning for an `OrderBook`. None of these bound
/// correctness — only the arena's and order-index's initial capacity
/// hints — so validation failures are a configuration bug, not a matching
/// error, and therefore use their own error type rather than `BookError`
/// (spec.md §7 scopes `BookError` to book *operations*).
#[derive(Clone, Copy, Debug)]
pub struct BookConfig {
    /// Initial number of order slots to pre-size the arena's first page
    /// toward. Growth beyond this is allowed; it's a hint, not a cap.
    pub arena_capacity_hint: u32,
    /// Initial capacity hint for the `id -> handle` index.
    pub id_index_capacity_hint: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self { arena_capacity_hint: 1024, id_index_capacity_hint: 1024 }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("arena_capacity_hint must be > 0")]
    ArenaCapacityZero,
}

impl BookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_capacity_hint == 0 {
            return Err(ConfigError::ArenaCapacityZero);
        }
        Ok(())
    }
}
