use crate::FxParseError;

/// Errors returned by `OrderBook` operations (spec.md §7). All are
/// returned as first-class results with no side effects on book state and
/// no events emitted; there is no recoverable "internal error" category —
/// anything that would violate a §3 invariant is a programmer error the
/// implementation asserts against instead (see `arena.rs`, `fx.rs`).
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookError {
    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),

    #[error("duplicate order id")]
    DuplicateId,

    #[error("order not found")]
    NotFound,

    #[error("malformed fixed-point string: {0}")]
    ParseError(#[from] FxParseError),
}
