//! Value types shared by items and outlets.
//!
//! ## Types
//!
//! - [`SaleState`]: Started or Stopped
//! - [`price`]: price validation, parsing, formatting and the
//!   [`NOT_FOR_SALE`](price::NOT_FOR_SALE) sentinel
//!
//! ## Sentinel Convention
//!
//! Prices are `f64`. A negative value never denotes a real price; it is how
//! every query reports "not currently purchasable".

mod sale_state;
pub mod price;

pub use sale_state::SaleState;
pub use price::NOT_FOR_SALE;
