//! Outlet: a place that lists items for sale.
//!
//! ## Membership
//!
//! An outlet keeps a `BTreeSet<ItemRef>` of the items it knows about,
//! guarded by a per-outlet mutex. Entries are weak, so an outlet never
//! keeps an item alive and never needs to hear about its destruction.
//!
//! ## Selling
//!
//! [`Outlet::sell`] checks membership under the lock, resolves the item
//! after the lock is released, and only then asks the item for its price.
//! The outlet lock and the item's price lock are never held together.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront::{Item, Outlet, NOT_FOR_SALE};
//!
//! let outlet = Outlet::new();
//! let item = Item::new(10.0);
//!
//! assert_eq!(outlet.sell(&Arc::downgrade(&item)), NOT_FOR_SALE);
//!
//! item.attach(&Arc::downgrade(&outlet));
//! item.start_sales();
//! assert_eq!(outlet.sell(&Arc::downgrade(&item)), 10.0);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::registry::{Item, ItemRef};
use crate::types::NOT_FOR_SALE;

static NEXT_OUTLET_ID: AtomicU64 = AtomicU64::new(1);

/// A registry of items currently listed for sale.
pub struct Outlet {
    /// Display name, used in logs
    name: String,

    /// Items this outlet knows about (weak, ordered by live identity)
    items: Mutex<BTreeSet<ItemRef>>,
}

impl Outlet {
    /// Create an unnamed outlet owned by the caller
    pub fn new() -> Arc<Self> {
        let id = NEXT_OUTLET_ID.fetch_add(1, Ordering::Relaxed);
        Self::named(format!("outlet-{id}"))
    }

    /// Create an outlet with a display name
    pub fn named(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            items: Mutex::new(BTreeSet::new()),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// List `item` in this outlet. Adding an item twice has no further effect.
    pub fn add_item(&self, item: &Arc<Item>) {
        let inserted = self.items.lock().insert(ItemRef::from_item(item));
        tracing::debug!(outlet = %self.name, item = %item.name(), inserted, "add item");
    }

    /// Unlist `item`. No-op if it was not listed.
    pub fn remove_item(&self, item: &Arc<Item>) {
        let removed = self.items.lock().remove(&ItemRef::from_item(item));
        tracing::debug!(outlet = %self.name, item = %item.name(), removed, "remove item");
    }

    /// Whether the set currently holds an entry matching `item`.
    ///
    /// An expired reference matches any expired entry.
    pub fn is_listed(&self, item: &Weak<Item>) -> bool {
        self.items.lock().contains(&ItemRef::new(item.clone()))
    }

    /// Number of entries in the set, including ones whose item is gone
    pub fn listed_count(&self) -> usize {
        self.items.lock().len()
    }

    /// Drop entries whose item no longer exists.
    ///
    /// The set is rebuilt from the surviving entries, so it is sorted again
    /// afterwards even if items died while listed. Returns the number of
    /// entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut items = self.items.lock();
        let before = items.len();
        let survivors: Vec<ItemRef> = std::mem::take(&mut *items)
            .into_iter()
            .filter(|entry| !entry.is_expired())
            .collect();
        items.extend(survivors);
        let purged = before - items.len();
        if purged > 0 {
            tracing::debug!(outlet = %self.name, purged, "purged expired items");
        }
        purged
    }

    // ========================================================================
    // Selling
    // ========================================================================

    /// Try to sell `item` here.
    ///
    /// # Returns
    ///
    /// The item's price, or [`NOT_FOR_SALE`] if the item is not listed,
    /// no longer exists, or has its sales stopped.
    pub fn sell(&self, item: &Weak<Item>) -> f64 {
        let resolved = {
            let items = self.items.lock();
            if !items.contains(&ItemRef::new(item.clone())) {
                tracing::debug!(outlet = %self.name, "sell: item not listed");
                return NOT_FOR_SALE;
            }
            item.clone()
        };

        // Resolved outside the lock; the item may have died in between.
        match resolved.upgrade() {
            Some(item) => {
                let price = item.get_price();
                tracing::debug!(outlet = %self.name, item = %item.name(), price, "sell");
                price
            }
            None => {
                tracing::debug!(outlet = %self.name, "sell: item expired");
                NOT_FOR_SALE
            }
        }
    }
}

impl fmt::Debug for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outlet")
            .field("name", &self.name)
            .field("listed", &self.listed_count())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
