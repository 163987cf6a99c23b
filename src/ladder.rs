#![allow(dead_code)]

use std::collections::BTreeMap;

use crate::{Fx, LevelQueue, Side};

/// Coarse partition of price space for the outer tree. Per spec.md §4.3 /
/// Design Notes, the outer key is an index convenience only — every
/// matching decision compares exact `Fx` prices, never the bucket.
pub const BUCKET_WIDTH: i64 = 10_000 * crate::fx::SCALE;

#[inline]
fn bucket_of(price: Fx) -> i64 {
    price.raw().div_euclid(BUCKET_WIDTH)
}

/// Per-side ordered index from price to `LevelQueue`. Implemented as a
/// two-level tree — an outer `BTreeMap` keyed by price bucket, each value
/// an inner `BTreeMap` keyed by exact price — matching spec.md §4.3's
/// bucket/inner-tree shape, with the outer key an integer bucket rather
/// than the float the distilled-from Go original uses (the Design Notes
/// call the integer key "preferable" and note it "loses no semantics").
/// `BTreeMap` gives the required O(log n) best/insert/remove bounds; the
/// spec explicitly allows substituting any balanced structure for the
/// reference implementation's splay tree as long as those bounds hold.
#[derive(Default)]
pub struct SideLadder {
    side: Option<Side>,
    outer: BTreeMap<i64, BTreeMap<Fx, LevelQueue>>,
}

impl SideLadder {
    pub fn new(side: Side) -> Self {
        Self { side: Some(side), outer: BTreeMap::new() }
    }

    #[inline]
    fn is_bids(&self) -> bool {
        matches!(self.side, Some(Side::Buy))
    }

    /// The level at the side's most aggressive resting price: max for bids,
    /// min for asks.
    pub fn best(&self) -> Option<(Fx, &LevelQueue)> {
        if self.is_bids() {
            let (_, inner) = self.outer.last_key_value()?;
            inner.last_key_value().map(|(p, l)| (*p, l))
        } else {
            let (_, inner) = self.outer.first_key_value()?;
            inner.first_key_value().map(|(p, l)| (*p, l))
        }
    }

    pub fn best_mut(&mut self) -> Option<(Fx, &mut LevelQueue)> {
        if self.is_bids() {
            let bucket = *self.outer.keys().next_back()?;
            let inner = self.outer.get_mut(&bucket)?;
            let price = *inner.keys().next_back()?;
            inner.get_mut(&price).map(|l| (price, l))
        } else {
            let bucket = *self.outer.keys().next()?;
            let inner = self.outer.get_mut(&bucket)?;
            let price = *inner.keys().next()?;
            inner.get_mut(&price).map(|l| (price, l))
        }
    }

    pub fn find(&self, price: Fx) -> Option<&LevelQueue> {
        self.outer.get(&bucket_of(price)).and_then(|inner| inner.get(&price))
    }

    pub fn find_mut(&mut self, price: Fx) -> Option<&mut LevelQueue> {
        self.outer.get_mut(&bucket_of(price)).and_then(|inner| inner.get_mut(&price))
    }

    /// Inserts a new (previously-absent) level at `price`.
    pub fn insert(&mut self, price: Fx, level: LevelQueue) {
        let inner = self.outer.entry(bucket_of(price)).or_default();
        let prior = inner.insert(price, level);
        debug_assert!(prior.is_none(), "level already exists at this price");
    }

    /// Removes the level at `price`, pruning the bucket node if it becomes
    /// empty (spec.md §3 invariant: "a bucket node contains no empty inner
    /// tree").
    pub fn remove(&mut self, price: Fx) -> Option<LevelQueue> {
        let bucket = bucket_of(price);
        let inner = self.outer.get_mut(&bucket)?;
        let removed = inner.remove(&price);
        if inner.is_empty() {
            self.outer.remove(&bucket);
        }
        removed
    }

    /// Ascending-price iteration, for observability queries.
    pub fn iter_ascending(&self) -> impl Iterator<Item = (Fx, &LevelQueue)> {
        self.outer.iter().flat_map(|(_, inner)| inner.iter().map(|(p, l)| (*p, l)))
    }

    /// Descending-price iteration, for observability queries.
    pub fn iter_descending(&self) -> impl Iterator<Item = (Fx, &LevelQueue)> {
        self.outer.iter().rev().flat_map(|(_, inner)| inner.iter().rev().map(|(p, l)| (*p, l)))
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }
}
