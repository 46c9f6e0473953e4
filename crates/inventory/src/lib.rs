//! Inventory domain module: items, prices and the vendors that stock them.
//!
//! Pure in-memory domain logic (no IO, no storage).

pub mod item;
pub mod price;
pub mod vendor;

pub use item::Item;
pub use price::Price;
pub use vendor::{SharedVendor, Vendor};
