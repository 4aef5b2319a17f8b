use serde::Serialize;

use crate::engine::{Entity, Id};

/// A worker hired onto one project at a daily rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labour {
    pub id: Id,
    pub name: String,
    pub role: String,
    pub contact: String,
    pub daily_rate: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabourSeed {
    pub name: String,
    pub role: String,
    pub contact: String,
    pub daily_rate: u64,
}

impl Entity for Labour {
    type Seed = LabourSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: LabourSeed) -> Self {
        Self {
            id,
            name: seed.name,
            role: seed.role,
            contact: seed.contact,
            daily_rate: seed.daily_rate,
        }
    }
}
