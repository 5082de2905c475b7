//! Ordering of weak item references.
//!
//! ## Rule
//!
//! Two weak references are compared by first resolving both:
//!
//! | left      | right     | result                    |
//! |-----------|-----------|---------------------------|
//! | any       | expired   | left is not less          |
//! | expired   | alive     | left is less              |
//! | alive     | alive     | address order of the item |
//!
//! Expired references therefore sort before every live one and compare
//! equal to each other.
//!
//! ## Hazard
//!
//! The order depends on *when* it is evaluated. An entry that was alive at
//! insertion time moves to the front once its item is dropped, so a
//! `BTreeSet<ItemRef>` can end up holding keys that are no longer sorted.
//! Lookups in such a set may miss live entries. `std` defines this as a
//! logic error (no memory unsafety), and [`Outlet::purge_expired`] rebuilds
//! the set to restore a sorted state.
//!
//! [`Outlet::purge_expired`]: crate::registry::Outlet::purge_expired

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::registry::Item;

/// Compare two weak item references by live identity.
///
/// See the module docs for the full rule and its time-dependence.
pub fn weak_identity_cmp(a: &Weak<Item>, b: &Weak<Item>) -> Ordering {
    match (a.upgrade(), b.upgrade()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => Arc::as_ptr(&x).cmp(&Arc::as_ptr(&y)),
    }
}

// ============================================================================
// ItemRef
// ============================================================================

/// Weak item reference ordered by [`weak_identity_cmp`].
///
/// This is the key type of an outlet's membership set. It never keeps the
/// item alive.
#[derive(Clone)]
pub struct ItemRef(Weak<Item>);

impl ItemRef {
    #[inline]
    pub fn new(item: Weak<Item>) -> Self {
        Self(item)
    }

    /// Take a weak reference to a live item
    #[inline]
    pub fn from_item(item: &Arc<Item>) -> Self {
        Self(Arc::downgrade(item))
    }

    /// Resolve to a strong reference, if the item still exists
    #[inline]
    pub fn upgrade(&self) -> Option<Arc<Item>> {
        self.0.upgrade()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.0.strong_count() == 0
    }

    #[inline]
    pub fn as_weak(&self) -> &Weak<Item> {
        &self.0
    }
}

impl PartialEq for ItemRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ItemRef {}

impl PartialOrd for ItemRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemRef {
    fn cmp(&self, other: &Self) -> Ordering {
        weak_identity_cmp(&self.0, &other.0)
    }
}

impl fmt::Debug for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(item) => write!(f, "ItemRef({})", item.name()),
            None => write!(f, "ItemRef(<expired>)"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
