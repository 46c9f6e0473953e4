//! Market domain module: cross-vendor inventory views and the sell transaction.
//!
//! A [`Market`] references vendors (it does not own them), aggregates their
//! inventories on demand and depletes them in registration order when selling.

pub mod config;
pub mod market;
pub mod sale;

pub use config::{ConfigError, MarketConfig, OverstockPolicy};
pub use market::{InventoryEntry, Market};
pub use sale::{SaleAllocation, SaleOutcome};
