//! Mutual weak-reference registry between items and outlets.
//!
//! ## Architecture
//!
//! Items and outlets are owned by the caller through `Arc`. Each side only
//! holds `Weak` references to the other, so there is never a strong cycle
//! and either side can be dropped at any time:
//!
//! ```text
//!   driver ──Arc──▶ Item ◀──Weak── Outlet ◀──Arc── driver
//!                    │                ▲
//!                    └──────Weak──────┘
//! ```
//!
//! ## Components
//!
//! - [`ItemRef`]: weak item reference ordered by live identity
//! - [`Outlet`]: ordered membership set plus `sell`
//! - [`Item`]: price, sale state and the attach/detach/start/stop protocol
//!
//! ## Locking
//!
//! | Lock                | Guards                    | Held while calling out? |
//! |---------------------|---------------------------|-------------------------|
//! | `Outlet::items`     | membership set            | never                   |
//! | `Item::price`       | price                     | never                   |
//! | `Item::outlets`     | attachment list           | never                   |
//!
//! Sale state is an atomic flag and takes no lock.

pub mod order;
pub mod outlet;
pub mod item;

pub use order::{weak_identity_cmp, ItemRef};
pub use outlet::Outlet;
pub use item::Item;
