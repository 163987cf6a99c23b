#![allow(dead_code)]

/// Bounded, read-only view of a book's resting levels (spec.md §4.9/§6).
/// `buys` is sorted descending by price, `sells` ascending — both
/// best-price-first. Prices and volumes are exact decimal strings derived
/// from `Fx`, never floats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSnapshot {
    pub buys: Vec<(String, String)>,
    pub sells: Vec<(String, String)>,
}
