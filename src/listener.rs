#![allow(dead_code)]

use crate::{OrderId, Side};

/// Narrow sink for book lifecycle events, consumed synchronously in causal
/// order (spec.md §4.10). Implementations must be non-blocking and must
/// not call back into the originating book.
pub trait MatchingListener: Send + Sync {
    /// A limit order rested on the book (never fired for market orders).
    fn on_accepted(&self, order_id: &OrderId);

    /// An order left the book without being (fully) matched: an explicit
    /// cancel, or a market order's unfilled residual (IOC).
    fn on_cancelled(&self, order_id: &OrderId);

    /// A match occurred. `price_fp`/`qty_fp` are the raw 10⁸-scaled `Fx`
    /// values, per the wire-level event schema in spec.md §6.
    fn on_trade(
        &self,
        maker_id: &OrderId,
        taker_id: &OrderId,
        maker_side: Side,
        price_fp: i64,
        qty_fp: i64,
    );
}

/// Default listener: drops every event. Used when a caller has no
/// downstream consumer wired up yet.
#[derive(Default, Clone, Copy)]
pub struct NoOpListener;

impl MatchingListener for NoOpListener {
    #[inline]
    fn on_accepted(&self, _order_id: &OrderId) {}
    #[inline]
    fn on_cancelled(&self, _order_id: &OrderId) {}
    #[inline]
    fn on_trade(&self, _: &OrderId, _: &OrderId, _: Side, _: i64, _: i64) {}
}
