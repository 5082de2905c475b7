//! Stress tests for the item/outlet registry.
//!
//! These tests verify:
//! 1. Prices are never observed half-written under concurrent updates
//! 2. Concurrent attach/detach/start/stop churn never panics or deadlocks
//! 3. Items and outlets dropped mid-run resolve to absent
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Instant;

use storefront::types::price::is_for_sale;
use storefront::{Item, Outlet, NOT_FOR_SALE};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Worker threads per test
const THREADS: usize = 8;

/// Operations per worker thread
const OPS_PER_THREAD: usize = 20_000;

/// Prices a writer may set; readers must only ever see one of these
const PRICE_POOL: [f64; 5] = [1.25, 10.0, 99.99, 1234.5678, 1e9];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn rng_for(thread: usize, seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ (thread as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn is_valid_observation(price: f64) -> bool {
    price == NOT_FOR_SALE || PRICE_POOL.contains(&price)
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Concurrent `change_price` and `sell` on one listed item.
///
/// Every observed value must be a price that some writer actually set.
#[test]
fn stress_price_is_never_torn() {
    let outlet = Outlet::new();
    let item = Item::new(PRICE_POOL[0]);
    item.attach(&Arc::downgrade(&outlet));
    item.start_sales();

    let start = Instant::now();
    thread::scope(|s| {
        for t in 0..THREADS / 2 {
            let item = &item;
            s.spawn(move || {
                let mut rng = rng_for(t, 7);
                for _ in 0..OPS_PER_THREAD {
                    item.change_price(PRICE_POOL[rng.gen_range(0..PRICE_POOL.len())]);
                }
            });
        }
        for _ in 0..THREADS / 2 {
            let (outlet, weak) = (&outlet, Arc::downgrade(&item));
            s.spawn(move || {
                for _ in 0..OPS_PER_THREAD {
                    let price = outlet.sell(&weak);
                    assert!(is_for_sale(price));
                    assert!(is_valid_observation(price), "torn price {price}");
                }
            });
        }
    });
    println!("price stress finished in {:.2?}", start.elapsed());
}

/// Random protocol calls from many threads on shared items and outlets.
#[test]
fn stress_registration_churn() {
    let outlets: Vec<_> = (0..4).map(|i| Outlet::named(format!("outlet-{i}"))).collect();
    let items: Vec<_> = (0..6)
        .map(|i| Item::named(format!("item-{i}"), PRICE_POOL[i % PRICE_POOL.len()]))
        .collect();

    thread::scope(|s| {
        for t in 0..THREADS {
            let (outlets, items) = (&outlets, &items);
            s.spawn(move || {
                let mut rng = rng_for(t, 42);
                for _ in 0..OPS_PER_THREAD {
                    let item = &items[rng.gen_range(0..items.len())];
                    let outlet = &outlets[rng.gen_range(0..outlets.len())];
                    match rng.gen_range(0..6) {
                        0 => item.attach(&Arc::downgrade(outlet)),
                        1 => item.detach(&Arc::downgrade(outlet)),
                        2 => item.start_sales(),
                        3 => item.stop_sales(),
                        4 => item.change_price(PRICE_POOL[rng.gen_range(0..PRICE_POOL.len())]),
                        _ => {
                            let price = outlet.sell(&Arc::downgrade(item));
                            assert!(is_valid_observation(price), "unexpected price {price}");
                        }
                    }
                }
            });
        }
    });

    // Quiescent again: stopping everything unlists every item everywhere.
    for item in &items {
        item.stop_sales();
    }
    for outlet in &outlets {
        for item in &items {
            assert_eq!(outlet.sell(&Arc::downgrade(item)), NOT_FOR_SALE);
        }
    }
}

/// Outlets and items are dropped by their owner while other threads keep
/// selling and attaching through weak references.
#[test]
fn stress_peers_dropped_mid_run() {
    let outlets: Vec<_> = (0..4).map(|_| Outlet::new()).collect();
    let items: Vec<_> = (0..4).map(|i| Item::new(PRICE_POOL[i])).collect();
    for item in &items {
        for outlet in &outlets {
            item.attach(&Arc::downgrade(outlet));
        }
        item.start_sales();
    }

    let w_outlets: Vec<Weak<Outlet>> = outlets.iter().map(Arc::downgrade).collect();
    let w_items: Vec<Weak<Item>> = items.iter().map(Arc::downgrade).collect();
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        for t in 0..THREADS {
            let (w_outlets, w_items, stop) = (&w_outlets, &w_items, &stop);
            s.spawn(move || {
                let mut rng = rng_for(t, 1337);
                while !stop.load(Ordering::Relaxed) {
                    let w_outlet = &w_outlets[rng.gen_range(0..w_outlets.len())];
                    let w_item = &w_items[rng.gen_range(0..w_items.len())];

                    if let Some(outlet) = w_outlet.upgrade() {
                        let price = outlet.sell(w_item);
                        assert!(is_valid_observation(price), "unexpected price {price}");
                    }
                    if let Some(item) = w_item.upgrade() {
                        if rng.gen_bool(0.5) {
                            item.attach(w_outlet);
                        } else {
                            item.detach(w_outlet);
                        }
                    }
                }
            });
        }

        // Owner thread: release everything one by one.
        let mut outlets = outlets;
        let mut items = items;
        while let Some(outlet) = outlets.pop() {
            thread::yield_now();
            drop(outlet);
            if let Some(item) = items.pop() {
                drop(item);
            }
        }
        stop.store(true, Ordering::Relaxed);
    });

    assert!(w_outlets.iter().all(|w| w.upgrade().is_none()));
    assert!(w_items.iter().all(|w| w.upgrade().is_none()));
}
