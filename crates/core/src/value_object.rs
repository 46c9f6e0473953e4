//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A `Price` of 75 cents equals any other `Price` of 75
//! cents. Contrast with entities (see [`crate::Entity`]): two items that
//! share a name and a price are still different items.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
