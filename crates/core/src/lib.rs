//! `farmers-core`: domain foundation building blocks for the market model.
//!
//! This crate contains **pure domain** primitives (no IO, no global state).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, MarketId, VendorId};
pub use value_object::ValueObject;
