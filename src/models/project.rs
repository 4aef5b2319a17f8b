use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Entity, Id};

labelled_enum! {
    ProjectStatus {
        Planning => "Planning",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteManager {
    pub name: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub status: ProjectStatus,
    /// Percent complete, 0..=100.
    pub progress: u8,
    pub start_date: NaiveDate,
    pub expected_completion: NaiveDate,
    pub site_manager: SiteManager,
    pub budget: u64,
    pub spent: u64,
    pub location: String,
    pub description: Option<String>,
}

/// Validated input for a new project. Status, progress and spend start from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSeed {
    pub name: String,
    pub location: String,
    pub budget: u64,
    pub start_date: NaiveDate,
    pub expected_completion: NaiveDate,
    pub site_manager: SiteManager,
    pub description: Option<String>,
}

impl Project {
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }

    pub fn remaining_budget(&self) -> u64 {
        self.budget.saturating_sub(self.spent)
    }
}

impl Entity for Project {
    type Seed = ProjectSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: ProjectSeed) -> Self {
        Self {
            id,
            name: seed.name,
            status: ProjectStatus::Planning,
            progress: 0,
            start_date: seed.start_date,
            expected_completion: seed.expected_completion,
            site_manager: seed.site_manager,
            budget: seed.budget,
            spent: 0,
            location: seed.location,
            description: seed.description,
        }
    }
}
