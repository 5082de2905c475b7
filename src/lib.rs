//! # Storefront
//!
//! Thread-safe listing registry between items and outlets.
//!
//! ## Architecture
//!
//! - **Types**: sale state, prices and the `NOT_FOR_SALE` sentinel
//! - **Registry**: `Item` and `Outlet`, linked only by weak references
//! - **Observability**: `tracing` subscriber setup for binaries and tests
//!
//! ## Design Principles
//!
//! 1. **No ownership cycles**: the driver owns every entity through `Arc`;
//!    items and outlets see each other only through `Weak`
//! 2. **Absence is a value**: a vanished peer, an unlisted item or stopped
//!    sales all yield the negative sentinel, never an error or a panic
//! 3. **Short locks**: every lock covers O(1)/O(log n) bookkeeping and no
//!    lock is held while calling into the other entity
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
//! item.attach(&Arc::downgrade(&outlet));
//! item.start_sales();
//! assert_eq!(outlet.sell(&Arc::downgrade(&item)), 10.0);
//!
//! item.stop_sales();
//! assert_eq!(outlet.sell(&Arc::downgrade(&item)), NOT_FOR_SALE);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Value types: SaleState, prices
pub mod types;

/// Item/outlet registry and ordering of weak references
pub mod registry;

/// Error types for price validation
pub mod error;

/// Logging setup
pub mod observability;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::PriceError;
pub use registry::{Item, ItemRef, Outlet};
pub use types::{SaleState, NOT_FOR_SALE};
