use indexmap::{IndexMap, IndexSet};

use farmers_core::{DomainError, DomainResult, Entity, MarketId};
use farmers_inventory::{Item, SharedVendor};

use crate::config::MarketConfig;
use crate::sale::{SaleAllocation, SaleOutcome};

/// Market-wide stock of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Sum of every vendor's on-hand quantity.
    pub quantity: i64,
    /// Vendors with a strictly positive stock, in registration order.
    pub vendors: Vec<SharedVendor>,
}

/// A market: an ordered list of vendors plus the views computed over them.
///
/// Every view is recomputed from current vendor state on each call.
#[derive(Debug)]
pub struct Market {
    id: MarketId,
    name: String,
    vendors: Vec<SharedVendor>,
    config: MarketConfig,
}

impl Market {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, MarketConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: MarketConfig) -> Self {
        Self {
            id: MarketId::new(),
            name: name.into(),
            vendors: Vec::new(),
            config,
        }
    }

    pub fn id_typed(&self) -> MarketId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vendors(&self) -> &[SharedVendor] {
        &self.vendors
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Register a vendor. Order matters (it is the depletion order for
    /// [`Market::sell`]); registering the same vendor twice keeps both entries.
    pub fn add_vendor(&mut self, vendor: SharedVendor) {
        tracing::debug!(market = %self.name, vendor = %vendor.name(), "vendor registered");
        self.vendors.push(vendor);
    }

    pub fn vendor_names(&self) -> Vec<String> {
        self.vendors.iter().map(SharedVendor::name).collect()
    }

    /// Vendors holding a positive quantity of `item`. Zero entries don't count.
    pub fn vendors_that_sell(&self, item: &Item) -> Vec<SharedVendor> {
        self.vendors
            .iter()
            .filter(|vendor| vendor.check_stock(item) > 0)
            .cloned()
            .collect()
    }

    /// Every item any vendor has ever stocked, deduplicated by identity.
    ///
    /// Ordered by vendor registration, then by each vendor's stocking order.
    pub fn inventory_list(&self) -> IndexSet<Item> {
        let mut items = IndexSet::new();
        for vendor in &self.vendors {
            items.extend(vendor.borrow().items().cloned());
        }
        items
    }

    pub fn total_item(&self, item: &Item) -> i64 {
        self.vendors
            .iter()
            .fold(0i64, |total, vendor| total.saturating_add(vendor.check_stock(item)))
    }

    /// Market-wide quantity and sellers for every known item.
    ///
    /// Items stocked at zero everywhere still appear, with quantity 0 and no
    /// vendors.
    pub fn total_inventory(&self) -> IndexMap<Item, InventoryEntry> {
        self.inventory_list()
            .into_iter()
            .map(|item| {
                let entry = InventoryEntry {
                    quantity: self.total_item(&item),
                    vendors: self.vendors_that_sell(&item),
                };
                (item, entry)
            })
            .collect()
    }

    /// Items above the overstock threshold, in [`Market::total_inventory`] order.
    pub fn overstocked_items(&self) -> Vec<Item> {
        let policy = self.config.overstock;
        self.total_inventory()
            .into_iter()
            .filter(|(_, entry)| policy.is_overstocked(entry.quantity, entry.vendors.len()))
            .map(|(item, _)| item)
            .collect()
    }

    /// Names of all known items, ascending.
    pub fn sorted_item_list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inventory_list()
            .iter()
            .map(|item| item.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Sell `quantity` of `item`, returning whether the sale went through.
    ///
    /// See [`Market::try_sell`] for the depletion rules.
    pub fn sell(&mut self, item: &Item, quantity: i64) -> DomainResult<bool> {
        Ok(self.try_sell(item, quantity)?.is_completed())
    }

    /// Sell `quantity` of `item`, depleting vendors in registration order.
    ///
    /// - The item must be known **by name**; the available quantity is then
    ///   looked up **by identity**. A different item that merely shares a
    ///   known name therefore passes the first check but has nothing
    ///   available.
    /// - A vendor holding less than what remains is emptied and the rest is
    ///   carried to the next vendor; the first vendor that can cover the
    ///   remainder gives it and later vendors are left untouched.
    /// - Nothing is depleted unless the market-wide total covers `quantity`.
    pub fn try_sell(&mut self, item: &Item, quantity: i64) -> DomainResult<SaleOutcome> {
        let quantity = DomainError::ensure_non_negative(quantity)?;

        if !self.sorted_item_list().iter().any(|name| name == item.name()) {
            tracing::debug!(market = %self.name, item = %item.name(), "sale rejected: unknown item");
            return Ok(SaleOutcome::UnknownItem);
        }

        let entry = self.total_inventory().get(item).cloned().unwrap_or_default();
        if entry.quantity < quantity {
            tracing::debug!(
                market = %self.name,
                item = %item.name(),
                requested = quantity,
                available = entry.quantity,
                "sale rejected: insufficient stock"
            );
            return Ok(SaleOutcome::InsufficientStock {
                requested: quantity,
                available: entry.quantity,
            });
        }

        let mut remaining = quantity;
        let mut allocations = Vec::new();
        for vendor in &entry.vendors {
            let on_hand = vendor.check_stock(item);
            let (take, done) = if on_hand < remaining {
                (on_hand, false)
            } else {
                (remaining, true)
            };

            let taken = vendor.deplete(item, take)?;
            remaining -= taken;
            if taken > 0 {
                allocations.push(SaleAllocation {
                    vendor_id: vendor.id(),
                    vendor_name: vendor.name(),
                    quantity: taken,
                });
            }
            if done {
                break;
            }
        }

        if remaining > 0 {
            // Only reachable when one vendor is registered more than once and
            // its stock was counted twice in the total.
            tracing::warn!(
                market = %self.name,
                item = %item.name(),
                short_by = remaining,
                "sale completed short of the requested quantity"
            );
        }

        tracing::info!(
            market = %self.name,
            item = %item.name(),
            quantity = quantity - remaining,
            vendors = allocations.len(),
            "sale completed"
        );
        Ok(SaleOutcome::Completed { allocations })
    }
}

impl Entity for Market {
    type Id = MarketId;

    fn id(&self) -> MarketId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmers_inventory::{Price, Vendor};

    fn item(name: &str, price: &str) -> Item {
        Item::new(name, price.parse::<Price>().unwrap())
    }

    fn vendor(name: &str) -> SharedVendor {
        SharedVendor::new(Vendor::new(name))
    }

    struct Fixture {
        market: Market,
        vendor1: SharedVendor,
        vendor2: SharedVendor,
        vendor3: SharedVendor,
        item1: Item,
        item2: Item,
        item3: Item,
        item4: Item,
    }

    fn fixture() -> Fixture {
        let mut market = Market::new("South Pearl Street Farmers Market");
        let vendor1 = vendor("Rocky Mountain Fresh");
        let vendor2 = vendor("Ba-Nom-a-Nom");
        let vendor3 = vendor("Palisade Peach Shack");
        let item1 = item("Peach", "$0.75");
        let item2 = item("Tomato", "$0.50");
        let item3 = item("Peach-Raspberry Nice Cream", "$5.30");
        let item4 = item("Banana Nice Cream", "$4.25");

        market.add_vendor(vendor1.clone());
        vendor1.stock(&item1, 35).unwrap();
        vendor1.stock(&item2, 7).unwrap();
        market.add_vendor(vendor2.clone());
        vendor2.stock(&item4, 50).unwrap();
        vendor2.stock(&item3, 25).unwrap();
        market.add_vendor(vendor3.clone());
        vendor3.stock(&item1, 65).unwrap();
        vendor3.stock(&item3, 10).unwrap();

        Fixture {
            market,
            vendor1,
            vendor2,
            vendor3,
            item1,
            item2,
            item3,
            item4,
        }
    }

    #[test]
    fn new_market_has_name_and_no_vendors() {
        let market = Market::new("South Pearl Street Farmers Market");
        assert_eq!(market.name(), "South Pearl Street Farmers Market");
        assert!(market.vendors().is_empty());
        assert_eq!(market.config(), &MarketConfig::default());
    }

    #[test]
    fn add_vendor_keeps_registration_order() {
        let f = fixture();
        assert_eq!(
            f.market.vendors(),
            &[f.vendor1.clone(), f.vendor2.clone(), f.vendor3.clone()]
        );
        assert_eq!(
            f.market.vendor_names(),
            vec!["Rocky Mountain Fresh", "Ba-Nom-a-Nom", "Palisade Peach Shack"]
        );
    }

    #[test]
    fn add_vendor_does_not_deduplicate() {
        let mut market = Market::new("Market");
        let v = vendor("Rocky Mountain Fresh");
        market.add_vendor(v.clone());
        market.add_vendor(v.clone());
        assert_eq!(market.vendors().len(), 2);
        assert_eq!(market.vendor_names(), vec!["Rocky Mountain Fresh"; 2]);
    }

    #[test]
    fn vendors_that_sell_filters_by_positive_stock() {
        let f = fixture();
        assert_eq!(
            f.market.vendors_that_sell(&f.item1),
            vec![f.vendor1.clone(), f.vendor3.clone()]
        );
        assert_eq!(f.market.vendors_that_sell(&f.item4), vec![f.vendor2.clone()]);

        let zero = item("Onion", "$0.25");
        f.vendor2.stock(&zero, 0).unwrap();
        assert!(f.market.vendors_that_sell(&zero).is_empty());
    }

    #[test]
    fn inventory_list_is_ordered_and_deduplicated() {
        let f = fixture();
        let items: Vec<Item> = f.market.inventory_list().into_iter().collect();
        assert_eq!(
            items,
            vec![f.item1.clone(), f.item2.clone(), f.item4.clone(), f.item3.clone()]
        );
    }

    #[test]
    fn total_item_sums_across_vendors() {
        let f = fixture();
        assert_eq!(f.market.total_item(&f.item1), 100);
        assert_eq!(f.market.total_item(&f.item3), 35);
        assert_eq!(f.market.total_item(&item("Onion", "$0.25")), 0);
    }

    #[test]
    fn total_inventory_reports_quantity_and_sellers() {
        let f = fixture();
        let inventory = f.market.total_inventory();

        let expected = vec![
            (f.item1.clone(), 100, vec![f.vendor1.clone(), f.vendor3.clone()]),
            (f.item2.clone(), 7, vec![f.vendor1.clone()]),
            (f.item4.clone(), 50, vec![f.vendor2.clone()]),
            (f.item3.clone(), 35, vec![f.vendor2.clone(), f.vendor3.clone()]),
        ];
        let actual: Vec<(Item, i64, Vec<SharedVendor>)> = inventory
            .into_iter()
            .map(|(item, entry)| (item, entry.quantity, entry.vendors))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn total_inventory_reflects_later_stocking() {
        let f = fixture();
        assert_eq!(f.market.total_inventory()[&f.item2].quantity, 7);

        f.vendor3.stock(&f.item2, 3).unwrap();
        let inventory = f.market.total_inventory();
        assert_eq!(inventory[&f.item2].quantity, 10);
        assert_eq!(
            inventory[&f.item2].vendors,
            vec![f.vendor1.clone(), f.vendor3.clone()]
        );
    }

    #[test]
    fn zero_stock_items_are_known_but_unsold() {
        let f = fixture();
        let onion = item("Onion", "$0.25");
        f.vendor1.stock(&onion, 0).unwrap();

        let inventory = f.market.total_inventory();
        assert_eq!(inventory[&onion], InventoryEntry::default());
        assert!(f.market.sorted_item_list().contains(&"Onion".to_string()));
    }

    #[test]
    fn overstocked_items_need_quantity_and_multiple_vendors() {
        let f = fixture();
        assert_eq!(f.market.overstocked_items(), vec![f.item1.clone()]);
    }

    #[test]
    fn overstock_thresholds_come_from_config() {
        let mut config = MarketConfig::default();
        config.overstock.quantity_above = 30;
        let mut market = Market::with_config("Market", config);
        let f = fixture();
        for v in f.market.vendors() {
            market.add_vendor(v.clone());
        }
        assert_eq!(market.overstocked_items(), vec![f.item1.clone(), f.item3.clone()]);
    }

    #[test]
    fn sorted_item_list_is_alphabetical() {
        let f = fixture();
        assert_eq!(
            f.market.sorted_item_list(),
            vec![
                "Banana Nice Cream",
                "Peach",
                "Peach-Raspberry Nice Cream",
                "Tomato"
            ]
        );
    }

    #[test]
    fn sell_rejects_negative_quantity() {
        let mut f = fixture();
        assert_eq!(
            f.market.sell(&f.item1, -1).unwrap_err(),
            DomainError::InvalidQuantity(-1)
        );
        assert_eq!(f.vendor1.check_stock(&f.item1), 35);
    }

    #[test]
    fn sell_of_zero_succeeds_without_depleting() {
        let mut f = fixture();
        let outcome = f.market.try_sell(&f.item1, 0).unwrap();
        assert_eq!(outcome, SaleOutcome::Completed { allocations: vec![] });
        assert_eq!(f.market.total_item(&f.item1), 100);
    }

    #[test]
    fn try_sell_reports_allocations_in_vendor_order() {
        let mut f = fixture();
        let outcome = f.market.try_sell(&f.item1, 40).unwrap();

        assert_eq!(
            outcome,
            SaleOutcome::Completed {
                allocations: vec![
                    SaleAllocation {
                        vendor_id: f.vendor1.id(),
                        vendor_name: "Rocky Mountain Fresh".to_string(),
                        quantity: 35,
                    },
                    SaleAllocation {
                        vendor_id: f.vendor3.id(),
                        vendor_name: "Palisade Peach Shack".to_string(),
                        quantity: 5,
                    },
                ]
            }
        );
        assert_eq!(outcome.quantity_sold(), 40);
    }

    #[test]
    fn try_sell_reports_shortfall() {
        let mut f = fixture();
        let outcome = f.market.try_sell(&f.item3, 36).unwrap();
        assert_eq!(
            outcome,
            SaleOutcome::InsufficientStock {
                requested: 36,
                available: 35
            }
        );
        assert_eq!(outcome.quantity_sold(), 0);
        assert_eq!(f.market.total_item(&f.item3), 35);
    }

    #[test]
    fn exact_fit_at_first_vendor_leaves_later_vendors_alone() {
        let mut f = fixture();
        assert!(f.market.sell(&f.item3, 25).unwrap());
        assert_eq!(f.vendor2.check_stock(&f.item3), 0);
        assert_eq!(f.vendor3.check_stock(&f.item3), 10);
    }

    #[test]
    fn sale_outcome_serializes_with_status_tag() {
        let mut f = fixture();
        let outcome = f.market.try_sell(&f.item4, 60).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "insufficient_stock");
        assert_eq!(json["requested"], 60);
        assert_eq!(json["available"], 50);
    }
}
