//! Item: a sellable unit with a price and a sale state.
//!
//! ## State
//!
//! - `price`: guarded by a per-item mutex, so readers never see a torn value
//! - `started`: atomic sale-state flag, initially stopped
//! - `outlets`: weak references to the outlets the item was attached to
//!
//! ## Registration Protocol
//!
//! | Call          | Item side                         | Outlet side            |
//! |---------------|-----------------------------------|------------------------|
//! | `attach`      | append outlet (duplicates kept)   | `add_item`             |
//! | `detach`      | drop matching and expired entries | `remove_item`          |
//! | `start_sales` | flag = started                    | `add_item` on each     |
//! | `stop_sales`  | flag = stopped                    | `remove_item` on each  |
//!
//! Every outlet reference is resolved before use; an outlet that no longer
//! exists is skipped silently.
//!
//! ## Outlet List Locking
//!
//! The outlet list has its own mutex, but it is released before any outlet
//! is called. Concurrent `attach`/`detach`/`start_sales`/`stop_sales` on the
//! same item can therefore still interleave their outlet calls, and an
//! outlet reflects whichever call reached it last.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::PriceError;
use crate::registry::Outlet;
use crate::types::price::validate_price;
use crate::types::{SaleState, NOT_FOR_SALE};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// A sellable unit owned by an external driver.
///
/// Always handled through `Arc<Item>`; outlets only ever hold `Weak<Item>`.
pub struct Item {
    /// Display name, used in logs
    name: String,

    price: Mutex<f64>,

    /// Sale state flag (`true` = started)
    started: AtomicBool,

    /// Outlets this item was attached to. May contain duplicates and
    /// references to outlets that no longer exist.
    outlets: Mutex<Vec<Weak<Outlet>>>,
}

impl Item {
    /// Create an unnamed item with an initial price
    ///
    /// # Example
    ///
    /// ```
    /// use storefront::{Item, SaleState, NOT_FOR_SALE};
    ///
    /// let item = Item::new(10.0);
    /// assert_eq!(item.sale_state(), SaleState::Stopped);
    /// assert_eq!(item.get_price(), NOT_FOR_SALE);
    /// ```
    pub fn new(price: f64) -> Arc<Self> {
        let id = NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed);
        Self::named(format!("item-{id}"), price)
    }

    /// Create an item with a display name
    pub fn named(name: impl Into<String>, price: f64) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            price: Mutex::new(price),
            started: AtomicBool::new(false),
            outlets: Mutex::new(Vec::new()),
        })
    }

    /// Create an item after validating the price
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] for negative or non-finite prices.
    pub fn try_new(price: f64) -> Result<Arc<Self>, PriceError> {
        Ok(Self::new(validate_price(price)?))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sale_state(&self) -> SaleState {
        SaleState::from_flag(self.started.load(Ordering::SeqCst))
    }

    /// Length of the outlet list, duplicates and expired entries included
    pub fn outlet_count(&self) -> usize {
        self.outlets.lock().len()
    }

    // ========================================================================
    // Attachment
    // ========================================================================

    /// List this item in `outlet`, regardless of sale state.
    ///
    /// Attaching twice to the same outlet records it twice. Does nothing if
    /// the outlet no longer exists.
    pub fn attach(self: &Arc<Self>, outlet: &Weak<Outlet>) {
        let Some(outlet) = outlet.upgrade() else {
            tracing::debug!(item = %self.name, "attach: outlet expired");
            return;
        };

        self.outlets.lock().push(Arc::downgrade(&outlet));
        tracing::debug!(item = %self.name, outlet = %outlet.name(), "attach");
        outlet.add_item(self);
    }

    /// Unlist this item from `outlet`.
    ///
    /// Removes every list entry for that outlet and, while at it, every
    /// entry whose outlet no longer exists. Does nothing if `outlet` itself
    /// no longer exists.
    pub fn detach(self: &Arc<Self>, outlet: &Weak<Outlet>) {
        let Some(outlet) = outlet.upgrade() else {
            tracing::debug!(item = %self.name, "detach: outlet expired");
            return;
        };

        self.outlets.lock().retain(|entry| match entry.upgrade() {
            Some(live) => !Arc::ptr_eq(&live, &outlet),
            None => false,
        });
        tracing::debug!(item = %self.name, outlet = %outlet.name(), "detach");
        outlet.remove_item(self);
    }

    // ========================================================================
    // Sale State
    // ========================================================================

    /// Start selling and re-list the item in every live outlet.
    pub fn start_sales(self: &Arc<Self>) {
        self.started.store(true, Ordering::SeqCst);
        let outlets = self.live_outlets();
        tracing::debug!(item = %self.name, outlets = outlets.len(), "start sales");
        for outlet in outlets {
            outlet.add_item(self);
        }
    }

    /// Stop selling and unlist the item from every live outlet.
    pub fn stop_sales(self: &Arc<Self>) {
        self.started.store(false, Ordering::SeqCst);
        let outlets = self.live_outlets();
        tracing::debug!(item = %self.name, outlets = outlets.len(), "stop sales");
        for outlet in outlets {
            outlet.remove_item(self);
        }
    }

    /// Snapshot of the outlets that still exist, in attachment order.
    ///
    /// Taken under the list lock and released before any outlet is called.
    fn live_outlets(&self) -> Vec<Arc<Outlet>> {
        self.outlets
            .lock()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    // ========================================================================
    // Price
    // ========================================================================

    /// Set a new price. Takes effect for the next read.
    pub fn change_price(&self, price: f64) {
        *self.price.lock() = price;
        tracing::debug!(item = %self.name, price, "price changed");
    }

    /// Set a new price after validating it
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] and leaves the price unchanged for negative or
    /// non-finite input.
    pub fn try_change_price(&self, price: f64) -> Result<(), PriceError> {
        self.change_price(validate_price(price)?);
        Ok(())
    }

    /// Current price, or [`NOT_FOR_SALE`] while sales are stopped.
    pub fn get_price(&self) -> f64 {
        if !self.started.load(Ordering::SeqCst) {
            return NOT_FOR_SALE;
        }
        *self.price.lock()
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("price", &*self.price.lock())
            .field("state", &self.sale_state())
            .field("outlets", &self.outlet_count())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
