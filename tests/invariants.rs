//! Randomized invariant sweep over submit/cancel sequences (spec.md §8,
//! invariants 1–6). A lightweight model tracks what the listener and
//! snapshot API report and cross-checks them against the book after every
//! operation.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{RecordedEvent, RecordingListener};
use matchcore::{BookConfig, BookError, Fx, MatchingListener, OrderBook, OrderId, Side};
use proptest::prelude::*;

struct Shared(Arc<RecordingListener>);
impl MatchingListener for Shared {
    fn on_accepted(&self, id: &OrderId) {
        self.0.on_accepted(id)
    }
    fn on_cancelled(&self, id: &OrderId) {
        self.0.on_cancelled(id)
    }
    fn on_trade(&self, maker: &OrderId, taker: &OrderId, side: Side, price_fp: i64, qty_fp: i64) {
        self.0.on_trade(maker, taker, side, price_fp, qty_fp)
    }
}

#[derive(Debug, Clone)]
enum Op {
    Submit { side: Side, price: u32, qty: u32 },
    Cancel { target: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<bool>(), 1u32..=20, 1u32..=50).prop_map(|(buy, price, qty)| {
            Op::Submit { side: if buy { Side::Buy } else { Side::Sell }, price, qty }
        }),
        1 => (0usize..500).prop_map(|target| Op::Cancel { target }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_random_submit_cancel_sequences(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let rec = Arc::new(RecordingListener::new());
        let book = OrderBook::new(BookConfig::default(), Shared(rec.clone())).unwrap();

        let mut next_id = 0usize;
        let mut submitted_ids: Vec<String> = Vec::new();
        let mut live: HashMap<String, bool> = HashMap::new(); // id -> still resting or not yet resolved
        let mut total_submitted = Fx::ZERO;
        let mut cumulative_traded = Fx::ZERO;
        let mut cumulative_cancelled_remaining = Fx::ZERO;

        for op in ops {
            match op {
                Op::Submit { side, price, qty } => {
                    let id = format!("o{next_id}");
                    next_id += 1;
                    let price_s = format!("{price}.0");
                    let qty_s = format!("{qty}.0");
                    let qty_fx = Fx::parse(&qty_s).unwrap();

                    book.submit_limit(id.clone(), side, &price_s, &qty_s).unwrap();
                    submitted_ids.push(id.clone());
                    total_submitted.add_mut(qty_fx);

                    // drain this submit's own events before deciding whether
                    // the new order ended up resting: a taker that fully
                    // fills on arrival never gets an `accepted` and is never
                    // live, even though it's in `submitted_ids`.
                    let mut rested = false;
                    for ev in rec.take() {
                        match ev {
                            RecordedEvent::Accepted(acc_id) if acc_id == id => rested = true,
                            RecordedEvent::Trade { maker, qty_fp, .. } => {
                                // counted once for the maker's side and once
                                // for the taker's side (spec.md §8 invariant
                                // 5: "cumulative traded volume on each side").
                                let traded = Fx::from_raw(qty_fp);
                                cumulative_traded.add_mut(traded);
                                cumulative_traded.add_mut(traded);
                                live.insert(maker, false);
                            }
                            _ => {}
                        }
                    }
                    live.insert(id, rested);
                }
                Op::Cancel { target } => {
                    if submitted_ids.is_empty() {
                        continue;
                    }
                    let id = submitted_ids[target % submitted_ids.len()].clone();
                    let was_live = *live.get(&id).unwrap_or(&false);
                    match book.cancel(&id) {
                        Ok(record) => {
                            prop_assert!(was_live, "cancel succeeded on an id that shouldn't still be resting");
                            cumulative_cancelled_remaining.add_mut(record.remaining);
                            live.insert(id, false);
                        }
                        Err(BookError::NotFound) => {
                            prop_assert!(!was_live, "cancel reported NotFound for a still-resting id");
                        }
                        Err(other) => prop_assert!(false, "unexpected cancel error: {other:?}"),
                    }
                }
            }

            // invariant 1: uncrossed book
            let snap = book.snapshot(1);
            if let (Some((b, _)), Some((s, _))) = (snap.buys.first(), snap.sells.first()) {
                prop_assert!(Fx::parse(b).unwrap() < Fx::parse(s).unwrap());
            }
        }

        // invariant 3 (bijection) + invariant 2 (per-level volume), observed
        // indirectly: resting volume reported by the snapshot must equal the
        // sum of remaining quantities the model believes are still live.
        let full_snap = book.snapshot(0);
        let resting_total: Fx = full_snap
            .buys
            .iter()
            .chain(full_snap.sells.iter())
            .map(|(_, v)| Fx::parse(v).unwrap())
            .fold(Fx::ZERO, |acc, v| acc.add(v));

        // invariant 5: conservation. `cumulative_traded` already counts each
        // trade twice (maker side + taker side), matching how
        // `total_submitted` counts both the maker's and the taker's full
        // original quantity.
        let accounted = resting_total.add(cumulative_traded).add(cumulative_cancelled_remaining);
        prop_assert_eq!(accounted, total_submitted);

        // invariant 6: idempotence of cancel — a second cancel of anything
        // already resolved must fail, and must not perturb the book.
        let before = book.snapshot(0);
        for id in &submitted_ids {
            if !*live.get(id).unwrap_or(&false) {
                prop_assert!(matches!(book.cancel(id), Err(BookError::NotFound)));
            }
        }
        prop_assert_eq!(book.snapshot(0), before);
    }
}
