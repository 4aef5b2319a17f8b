use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Entity, Id};

labelled_enum! {
    TaskStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSeed {
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl Entity for Task {
    type Seed = TaskSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: TaskSeed) -> Self {
        Self {
            id,
            name: seed.name,
            description: seed.description,
            assigned_to: seed.assigned_to,
            due_date: seed.due_date,
            status: seed.status,
        }
    }
}
