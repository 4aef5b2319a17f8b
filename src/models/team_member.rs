use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Entity, Id};

labelled_enum! {
    Designation {
        SiteManager => "Site Manager",
        Engineer => "Engineer",
        Labour => "Labour",
        Supervisor => "Supervisor",
        Foreman => "Foreman",
        Electrician => "Electrician",
        Plumber => "Plumber",
        Mason => "Mason",
    }
}

labelled_enum! {
    MemberStatus {
        Active => "Active",
        OnLeave => "On Leave",
        Inactive => "Inactive",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub id: Id,
    pub name: String,
    pub designation: Designation,
    pub phone: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub assigned_projects: Vec<String>,
    pub current_tasks: Vec<String>,
    pub status: MemberStatus,
    pub experience: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemberSeed {
    pub name: String,
    pub designation: Designation,
    pub phone: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub assigned_projects: Vec<String>,
    pub current_tasks: Vec<String>,
    pub experience: String,
    pub location: String,
}

impl TeamMember {
    pub fn initials(&self) -> String {
        crate::forms::initials(&self.name)
    }
}

impl Entity for TeamMember {
    type Seed = TeamMemberSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: TeamMemberSeed) -> Self {
        Self {
            id,
            name: seed.name,
            designation: seed.designation,
            phone: seed.phone,
            email: seed.email,
            join_date: seed.join_date,
            assigned_projects: seed.assigned_projects,
            current_tasks: seed.current_tasks,
            status: MemberStatus::Active,
            experience: seed.experience,
            location: seed.location,
        }
    }
}
