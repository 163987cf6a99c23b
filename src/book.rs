#![allow(dead_code)]

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    BookConfig, BookError, BookSnapshot, Fx, LevelQueue, MatchingListener, NoOpListener,
    OrderArena, OrderHandle, OrderId, Side, SideLadder,
};

/// A resting order's side/price/remaining at the moment it was cancelled,
/// returned to the caller so they can account for what left the book
/// (spec.md §6, `cancel(id) -> CancelledOrderRecord`).
#[derive(Debug, Clone, Copy)]
pub struct CancelledOrderRecord {
    pub side: Side,
    pub price: Fx,
    pub remaining: Fx,
}

/// Everything the book mutex protects. Kept as one struct with independent
/// fields (rather than behind per-field locks) so mutating a match can
/// borrow the arena, one ladder, and the id index simultaneously without
/// lock ordering concerns — there is exactly one lock (spec.md §5).
struct BookState {
    arena: OrderArena,
    buy: SideLadder,
    sell: SideLadder,
    id_index: HashMap<OrderId, OrderHandle>,
}

impl BookState {
    fn new(cfg: BookConfig) -> Self {
        Self {
            arena: OrderArena::with_capacity(cfg.arena_capacity_hint),
            buy: SideLadder::new(Side::Buy),
            sell: SideLadder::new(Side::Sell),
            id_index: HashMap::with_capacity(cfg.id_index_capacity_hint),
        }
    }

    #[inline]
    fn ladder(&self, side: Side) -> &SideLadder {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }
}

/// Single-instrument, price-time-priority limit order book (spec.md §2,
/// §4.5–§4.9). All public operations serialize under one internal mutex
/// (spec.md §5): each call runs to completion, including any listener
/// callbacks, before the next begins.
pub struct OrderBook {
    state: Mutex<BookState>,
    listener: Box<dyn MatchingListener>,
}

impl OrderBook {
    pub fn new(cfg: BookConfig, listener: impl MatchingListener + 'static) -> Result<Self, crate::ConfigError> {
        cfg.validate()?;
        Ok(Self { state: Mutex::new(BookState::new(cfg)), listener: Box::new(listener) })
    }

    /// Convenience constructor with a `NoOpListener` (spec.md §4.10: "a
    /// null listener must be accepted; the book supplies a no-op
    /// implementation by default").
    pub fn new_default(cfg: BookConfig) -> Result<Self, crate::ConfigError> {
        Self::new(cfg, NoOpListener)
    }

    /// Submit a limit order. Crosses the opposite side while marketable,
    /// then rests any residual on its own side (spec.md §4.5).
    pub fn submit_limit(
        &self,
        id: impl Into<OrderId>,
        side: Side,
        price_str: &str,
        qty_str: &str,
    ) -> Result<(), BookError> {
        let id = id.into();
        validate_id(&id)?;
        let price = Fx::parse(price_str)?;
        let qty = Fx::parse(qty_str)?;
        if !price.is_positive() {
            return Err(BookError::InvalidOrder("price must be positive"));
        }
        if !qty.is_positive() {
            return Err(BookError::InvalidOrder("quantity must be positive"));
        }

        let mut state = self.state.lock();
        if state.id_index.contains_key(&id) {
            return Err(BookError::DuplicateId);
        }
        trace!(order_id = %id, ?side, %price, %qty, "submit_limit");

        let opp_side = side.opposite();
        let mut rem = qty;
        while rem.is_positive() {
            let best_price = match state.ladder(opp_side).best() {
                Some((p, _)) => p,
                None => break,
            };
            let crosses = match side {
                Side::Buy => best_price <= price,
                Side::Sell => best_price >= price,
            };
            if !crosses {
                break;
            }
            rem = self.consume_level(&mut state, opp_side, best_price, rem, &id, side);
        }

        if rem.is_positive() {
            self.admit_resting(&mut state, &id, side, price, rem);
            drop(state);
            debug!(order_id = %id, "accepted");
            self.listener.on_accepted(&id);
        }

        Ok(())
    }

    /// Submit a market order: immediate-or-cancel against the opposite
    /// side at any price, residual cancelled rather than rested (spec.md
    /// §4.6). No `accepted` event is ever emitted for a market order.
    pub fn submit_market(
        &self,
        id: impl Into<OrderId>,
        side: Side,
        qty_str: &str,
    ) -> Result<(), BookError> {
        let id = id.into();
        validate_id(&id)?;
        let qty = Fx::parse(qty_str)?;
        if !qty.is_positive() {
            return Err(BookError::InvalidOrder("quantity must be positive"));
        }

        let mut state = self.state.lock();
        if state.id_index.contains_key(&id) {
            return Err(BookError::DuplicateId);
        }
        trace!(order_id = %id, ?side, %qty, "submit_market");

        let opp_side = side.opposite();
        let mut rem = qty;
        while rem.is_positive() {
            let best_price = match state.ladder(opp_side).best() {
                Some((p, _)) => p,
                None => break,
            };
            rem = self.consume_level(&mut state, opp_side, best_price, rem, &id, side);
        }

        drop(state);
        if rem.is_positive() {
            debug!(order_id = %id, remaining = %rem, "market ioc residual cancelled");
            self.listener.on_cancelled(&id);
        }
        Ok(())
    }

    /// Cancel a resting order (spec.md §4.8). O(1) expected, plus O(log n)
    /// to prune a price/bucket level that became empty.
    pub fn cancel(&self, id: &str) -> Result<CancelledOrderRecord, BookError> {
        let mut state = self.state.lock();
        let handle = state.id_index.remove(id).ok_or(BookError::NotFound)?;

        let (side, price, remaining) = {
            let o = state.arena.get(handle);
            (o.side, o.price, o.remaining)
        };

        let ladder = match side {
            Side::Buy => &mut state.buy,
            Side::Sell => &mut state.sell,
        };
        {
            let level = ladder.find_mut(price).expect("resting order's level must exist");
            level.unlink(&mut state.arena, handle);
        }
        let now_empty = ladder.find(price).map(LevelQueue::is_empty).unwrap_or(true);
        if now_empty {
            ladder.remove(price);
        }
        state.arena.free(handle);

        drop(state);
        debug!(order_id = %id, "cancelled");
        self.listener.on_cancelled(&id.to_string());
        Ok(CancelledOrderRecord { side, price, remaining })
    }

    /// Bounded, read-only snapshot of both sides (spec.md §4.9), observed
    /// under the same lock as any mutation.
    pub fn snapshot(&self, limit: usize) -> BookSnapshot {
        let state = self.state.lock();

        let mut buys: Vec<(String, String)> = state
            .buy
            .iter_descending()
            .map(|(p, l)| (p.to_decimal_string(), l.volume.to_decimal_string()))
            .collect();
        let mut sells: Vec<(String, String)> = state
            .sell
            .iter_ascending()
            .map(|(p, l)| (p.to_decimal_string(), l.volume.to_decimal_string()))
            .collect();
        if limit != 0 {
            buys.truncate(limit);
            sells.truncate(limit);
        }
        BookSnapshot { buys, sells }
    }

    /// Walks `level_price` on `opp_side` from its head, trading the
    /// incoming `taker` against makers in arrival order until either the
    /// taker's residual or the level is exhausted (spec.md §4.7).
    fn consume_level(
        &self,
        state: &mut BookState,
        opp_side: Side,
        level_price: Fx,
        mut rem: Fx,
        taker_id: &OrderId,
        taker_side: Side,
    ) -> Fx {
        let ladder = match opp_side {
            Side::Buy => &mut state.buy,
            Side::Sell => &mut state.sell,
        };

        loop {
            if rem.is_zero() {
                break;
            }
            let head = match ladder.find(level_price) {
                Some(level) if !level.is_empty() => level.head,
                _ => break,
            };

            let maker_id = state.arena.get(head).id.clone();
            let maker_side = state.arena.get(head).side;
            let maker_price = state.arena.get(head).price;
            let maker_remaining = state.arena.get(head).remaining;
            let traded = rem.min(maker_remaining);

            self.listener.on_trade(&maker_id, taker_id, maker_side, maker_price.raw(), traded.raw());
            trace!(%maker_id, taker_id = %taker_id, %maker_price, %traded, "trade");

            rem.sub_mut(traded);
            state.arena.get_mut(head).remaining.sub_mut(traded);
            let maker_fully_filled = state.arena.get(head).remaining.is_zero();

            let ladder = match opp_side {
                Side::Buy => &mut state.buy,
                Side::Sell => &mut state.sell,
            };
            let level = ladder.find_mut(level_price).expect("level present while walking it");
            level.partial_fill(traded);
            if maker_fully_filled {
                level.unlink(&mut state.arena, head);
            } else {
                // Taker's residual must be zero here (spec.md §4.7): the
                // maker stayed resting with qty left, so the loop ends.
                break;
            }

            state.id_index.remove(&maker_id);
            state.arena.free(head);

            let ladder = match opp_side {
                Side::Buy => &mut state.buy,
                Side::Sell => &mut state.sell,
            };
            let level_empty = ladder.find(level_price).map(LevelQueue::is_empty).unwrap_or(true);
            if level_empty {
                ladder.remove(level_price);
                break;
            }
        }
        rem
    }

    fn admit_resting(&self, state: &mut BookState, id: &OrderId, side: Side, price: Fx, remaining: Fx) {
        let handle = state.arena.alloc();
        {
            let o = state.arena.get_mut(handle);
            o.id = id.clone();
            o.side = side;
            o.price = price;
            o.remaining = remaining;
        }

        let ladder = match side {
            Side::Buy => &mut state.buy,
            Side::Sell => &mut state.sell,
        };
        match ladder.find_mut(price) {
            Some(level) => level.push_tail(&mut state.arena, handle),
            None => {
                let mut level = LevelQueue::new();
                level.push_tail(&mut state.arena, handle);
                ladder.insert(price, level);
            }
        }
        state.id_index.insert(id.clone(), handle);
    }
}

fn validate_id(id: &str) -> Result<(), BookError> {
    if id.is_empty() {
        Err(BookError::InvalidOrder("order id must not be empty"))
    } else {
        Ok(())
    }
}
