use serde::{Deserialize, Serialize};

use farmers_core::VendorId;

/// Quantity taken from one vendor during a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleAllocation {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub quantity: i64,
}

/// Result of a sell attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaleOutcome {
    /// Stock was depleted; one allocation per vendor touched, in market order.
    Completed { allocations: Vec<SaleAllocation> },
    /// No known item carries the requested item's name.
    UnknownItem,
    /// The market holds less than requested. Nothing was depleted.
    InsufficientStock { requested: i64, available: i64 },
}

impl SaleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SaleOutcome::Completed { .. })
    }

    /// Total quantity actually taken from vendors.
    pub fn quantity_sold(&self) -> i64 {
        match self {
            SaleOutcome::Completed { allocations } => allocations.iter().map(|a| a.quantity).sum(),
            _ => 0,
        }
    }
}
