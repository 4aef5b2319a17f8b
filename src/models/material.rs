use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Entity, Id};

labelled_enum! {
    MaterialStatus {
        InWarehouse => "In Warehouse",
        OnTheWay => "On The Way",
        OnSite => "On Site",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub id: Id,
    pub name: String,
    pub category: String,
    /// Quantity as entered, unit included ("200 Bags").
    pub assigned_qty: String,
    pub unit_cost: u64,
    /// unit_cost times the parsed quantity; never edited on its own.
    pub total_cost: u64,
    pub status: MaterialStatus,
    pub project: String,
    pub supplier: String,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSeed {
    pub name: String,
    pub category: String,
    pub assigned_qty: String,
    pub quantity: u64,
    pub unit_cost: u64,
    pub project: String,
    pub supplier: String,
    pub last_updated: NaiveDate,
}

impl Entity for Material {
    type Seed = MaterialSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: MaterialSeed) -> Self {
        Self {
            id,
            name: seed.name,
            category: seed.category,
            assigned_qty: seed.assigned_qty,
            unit_cost: seed.unit_cost,
            total_cost: seed.unit_cost.saturating_mul(seed.quantity),
            status: MaterialStatus::InWarehouse,
            project: seed.project,
            supplier: seed.supplier,
            last_updated: seed.last_updated,
        }
    }
}
