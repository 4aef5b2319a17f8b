use chrono::NaiveDate;

use super::{require, split_list, FieldSpec, FormDraft};
use crate::error::ValidationError;
use crate::models::{Designation, TeamMemberSeed};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMemberDraft {
    pub name: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
    pub experience: String,
    pub location: String,
    /// Comma separated project names.
    pub assigned_projects: String,
    /// Comma separated task descriptions.
    pub current_tasks: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name"),
    FieldSpec::required("designation", "Designation"),
    FieldSpec::required("phone", "Phone"),
    FieldSpec::required("email", "Email"),
    FieldSpec::required("experience", "Experience"),
    FieldSpec::required("location", "Location"),
    FieldSpec::optional("assigned_projects", "Assigned Projects (comma separated)"),
    FieldSpec::optional("current_tasks", "Current Tasks (comma separated)"),
];

impl TeamMemberDraft {
    pub fn validate(&self, today: NaiveDate) -> Result<TeamMemberSeed, ValidationError> {
        let mut errors = ValidationError::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "phone", &self.phone, "Phone is required");
        require(&mut errors, "experience", &self.experience, "Experience is required");
        require(&mut errors, "location", &self.location, "Location is required");

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !email.contains('@') {
            errors.push("email", "Enter a valid email address");
        }

        let designation = match self.designation.trim() {
            "" => {
                errors.push("designation", "Designation is required");
                None
            }
            value => {
                let parsed = value.parse::<Designation>().ok();
                if parsed.is_none() {
                    errors.push("designation", format!("Unknown designation `{}`", value));
                }
                parsed
            }
        };

        errors.finish()?;
        Ok(TeamMemberSeed {
            name: self.name.trim().to_string(),
            designation: designation.unwrap_or(Designation::Labour),
            phone: self.phone.trim().to_string(),
            email: email.to_string(),
            join_date: today,
            assigned_projects: split_list(&self.assigned_projects),
            current_tasks: split_list(&self.current_tasks),
            experience: self.experience.trim().to_string(),
            location: self.location.trim().to_string(),
        })
    }
}

impl FormDraft for TeamMemberDraft {
    const TITLE: &'static str = "Add Team Member";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.designation,
            2 => &self.phone,
            3 => &self.email,
            4 => &self.experience,
            5 => &self.location,
            6 => &self.assigned_projects,
            7 => &self.current_tasks,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.designation),
            2 => Some(&mut self.phone),
            3 => Some(&mut self.email),
            4 => Some(&mut self.experience),
            5 => Some(&mut self.location),
            6 => Some(&mut self.assigned_projects),
            7 => Some(&mut self.current_tasks),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 22).unwrap()
    }

    #[test]
    fn lists_are_split_and_designation_parsed() {
        let draft = TeamMemberDraft {
            name: "Bilal Sheikh".into(),
            designation: "Foreman".into(),
            phone: "+92 306 1234567".into(),
            email: "bilal@des.com".into(),
            experience: "5 years".into(),
            location: "Gulberg, Lahore".into(),
            assigned_projects: "Mall of Lahore, Wild Zoo Complex".into(),
            current_tasks: "Shuttering,".into(),
        };
        let seed = draft.validate(today()).unwrap();
        assert_eq!(seed.designation, Designation::Foreman);
        assert_eq!(seed.assigned_projects.len(), 2);
        assert_eq!(seed.current_tasks, vec!["Shuttering".to_string()]);
        assert_eq!(seed.join_date, today());
    }

    #[test]
    fn unknown_designation_and_bad_email_are_reported() {
        let draft = TeamMemberDraft {
            name: "X".into(),
            designation: "Astronaut".into(),
            phone: "1".into(),
            email: "not-an-email".into(),
            experience: "1 year".into(),
            location: "Lahore".into(),
            ..Default::default()
        };
        let error = draft.validate(today()).unwrap_err();
        assert!(error.has("designation"));
        assert!(error.has("email"));
        assert_eq!(error.errors().len(), 2);
    }
}
