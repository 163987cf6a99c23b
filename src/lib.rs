//! Price-time priority limit order book matching core: fixed-point
//! arithmetic, an arena-backed intrusive order store, a two-level indexed
//! price ladder, and single-instrument limit/market matching behind one
//! mutex per book.

mod arena;
mod book;
mod config;
mod error;
mod fx;
mod ladder;
mod listener;
mod queue;
mod registry;
mod snapshot;
mod types;

pub use arena::{OrderArena, OrderSlot};
pub use book::{CancelledOrderRecord, OrderBook};
pub use config::{BookConfig, ConfigError};
pub use error::BookError;
pub use fx::{Fx, FxParseError, SCALE};
pub use ladder::SideLadder;
pub use listener::{MatchingListener, NoOpListener};
pub use queue::LevelQueue;
pub use registry::{BookRegistry, InstrumentId};
pub use snapshot::BookSnapshot;
pub use types::{OrderHandle, OrderId, Side, H_NONE};
