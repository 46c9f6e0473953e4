use serde::{Deserialize, Serialize};

use farmers_core::{Entity, ItemId};

use crate::price::Price;

/// A sellable item.
///
/// Items are entities: equality and hashing go through [`ItemId`] only, so two
/// items created with the same name and price are still two distinct
/// inventory keys. Cloning keeps the id, i.e. a clone *is* the same item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    price: Price,
}

impl Item {
    /// Create an item with a fresh identity.
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self::with_id(ItemId::new(), name, price)
    }

    /// Rebuild an item with a known identity.
    pub fn with_id(id: ItemId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.same_entity(other)
    }
}

impl Eq for Item {}

impl core::hash::Hash for Item {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}
