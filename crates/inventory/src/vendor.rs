use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use indexmap::IndexMap;

use farmers_core::{DomainError, DomainResult, Entity, VendorId};

use crate::item::Item;

/// A vendor and the stock it holds.
///
/// Inventory keeps insertion order and never drops an entry: depleted items
/// stay at zero.
#[derive(Debug, Clone)]
pub struct Vendor {
    id: VendorId,
    name: String,
    inventory: IndexMap<Item, i64>,
}

impl Vendor {
    /// Create a vendor with an empty inventory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: VendorId::new(),
            name: name.into(),
            inventory: IndexMap::new(),
        }
    }

    pub fn id_typed(&self) -> VendorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the inventory, in stocking order.
    pub fn inventory(&self) -> &IndexMap<Item, i64> {
        &self.inventory
    }

    /// Items ever stocked, in stocking order (zero entries included).
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.inventory.keys()
    }

    /// Quantity on hand; `0` for an item this vendor never stocked.
    pub fn check_stock(&self, item: &Item) -> i64 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    /// Add `quantity` of `item`, returning the new on-hand amount.
    ///
    /// Stocking zero still records the item.
    pub fn stock(&mut self, item: &Item, quantity: i64) -> DomainResult<i64> {
        let quantity = DomainError::ensure_non_negative(quantity)?;

        let on_hand = self.check_stock(item);
        let new_on_hand = on_hand.checked_add(quantity).ok_or_else(|| {
            DomainError::invariant(format!(
                "stock overflow for {} at vendor {}",
                item.name(),
                self.name
            ))
        })?;

        self.inventory.insert(item.clone(), new_on_hand);
        tracing::debug!(
            vendor = %self.name,
            item = %item.name(),
            added = quantity,
            on_hand = new_on_hand,
            "stocked item"
        );
        Ok(new_on_hand)
    }

    /// Remove up to `quantity` of `item`, returning how much was taken.
    pub fn deplete(&mut self, item: &Item, quantity: i64) -> DomainResult<i64> {
        let quantity = DomainError::ensure_non_negative(quantity)?;

        let Some(on_hand) = self.inventory.get_mut(item) else {
            return Ok(0);
        };
        let taken = quantity.min(*on_hand);
        *on_hand -= taken;
        Ok(taken)
    }
}

impl Entity for Vendor {
    type Id = VendorId;

    fn id(&self) -> VendorId {
        self.id
    }
}

/// Shared, single-threaded handle to a [`Vendor`].
///
/// A market only references its vendors; the caller keeps its own handle and
/// may keep stocking after registration. Equality is handle identity: two
/// handles are equal iff they point at the same vendor.
#[derive(Debug, Clone)]
pub struct SharedVendor(Rc<RefCell<Vendor>>);

impl SharedVendor {
    pub fn new(vendor: Vendor) -> Self {
        Self(Rc::new(RefCell::new(vendor)))
    }

    pub fn borrow(&self) -> Ref<'_, Vendor> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vendor> {
        self.0.borrow_mut()
    }

    pub fn id(&self) -> VendorId {
        self.borrow().id
    }

    pub fn name(&self) -> String {
        self.borrow().name.clone()
    }

    pub fn check_stock(&self, item: &Item) -> i64 {
        self.borrow().check_stock(item)
    }

    pub fn stock(&self, item: &Item, quantity: i64) -> DomainResult<i64> {
        self.borrow_mut().stock(item, quantity)
    }

    pub fn deplete(&self, item: &Item, quantity: i64) -> DomainResult<i64> {
        self.borrow_mut().deplete(item, quantity)
    }
}

impl From<Vendor> for SharedVendor {
    fn from(value: Vendor) -> Self {
        Self::new(value)
    }
}

impl PartialEq for SharedVendor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SharedVendor {}
