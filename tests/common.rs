//! Shared listener fixture for integration tests. Duplicated from
//! `listener::test_support` rather than exported from the crate, since a
//! `#[cfg(test)]` item in a lib crate isn't visible to its `tests/` binaries.

use matchcore::{MatchingListener, OrderId, Side};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    Accepted(String),
    Cancelled(String),
    Trade { maker: String, taker: String, maker_side: Side, price_fp: i64, qty_fp: i64 },
}

#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.events.lock())
    }
}

impl MatchingListener for RecordingListener {
    fn on_accepted(&self, order_id: &OrderId) {
        self.events.lock().push(RecordedEvent::Accepted(order_id.clone()));
    }
    fn on_cancelled(&self, order_id: &OrderId) {
        self.events.lock().push(RecordedEvent::Cancelled(order_id.clone()));
    }
    fn on_trade(&self, maker_id: &OrderId, taker_id: &OrderId, maker_side: Side, price_fp: i64, qty_fp: i64) {
        self.events.lock().push(RecordedEvent::Trade {
            maker: maker_id.clone(),
            taker: taker_id.clone(),
            maker_side,
            price_fp,
            qty_fp,
        });
    }
}
