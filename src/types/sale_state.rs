//! Sale state of an item.
//!
//! An item is either offering its price (`Started`) or hiding it
//! (`Stopped`). The state is stored in an `AtomicBool` inside the item;
//! this enum is the typed view handed to callers.

use std::fmt;

// ============================================================================
// SaleState enum
// ============================================================================

/// Whether an item currently exposes its price.
///
/// Items start out `Stopped` and only change state through
/// `Item::start_sales` / `Item::stop_sales`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaleState {
    /// Price is hidden; sells return the sentinel
    #[default]
    Stopped,
    /// Price is visible to outlets that list the item
    Started,
}

impl SaleState {
    /// Build from the raw atomic flag (`true` = started)
    #[inline]
    pub fn from_flag(started: bool) -> Self {
        if started {
            SaleState::Started
        } else {
            SaleState::Stopped
        }
    }

    /// Raw flag for atomic storage
    #[inline]
    pub fn as_flag(self) -> bool {
        matches!(self, SaleState::Started)
    }

    #[inline]
    pub fn is_started(self) -> bool {
        self.as_flag()
    }
}

impl fmt::Display for SaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleState::Stopped => write!(f, "stopped"),
            SaleState::Started => write!(f, "started"),
        }
    }
}
