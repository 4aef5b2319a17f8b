use super::{initials, non_blank, parse_amount, parse_date, require, FieldSpec, FormDraft};
use crate::error::ValidationError;
use crate::models::{ProjectSeed, SiteManager};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub location: String,
    pub budget: String,
    pub start_date: String,
    pub expected_completion: String,
    pub site_manager_name: String,
    pub description: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Project Name"),
    FieldSpec::required("location", "Location"),
    FieldSpec::required("budget", "Budget (Rs.)"),
    FieldSpec::required("start_date", "Start Date (YYYY-MM-DD)"),
    FieldSpec::required("expected_completion", "Expected Completion (YYYY-MM-DD)"),
    FieldSpec::required("site_manager_name", "Site Manager"),
    FieldSpec::optional("description", "Description"),
];

impl ProjectDraft {
    pub fn validate(&self) -> Result<ProjectSeed, ValidationError> {
        let mut errors = ValidationError::new();
        require(&mut errors, "name", &self.name, "Project name is required");
        require(&mut errors, "location", &self.location, "Location is required");
        require(
            &mut errors,
            "site_manager_name",
            &self.site_manager_name,
            "Site manager name is required",
        );

        let budget = if self.budget.trim().is_empty() {
            errors.push("budget", "Budget is required");
            None
        } else {
            let parsed = parse_amount(&self.budget);
            if parsed.is_none() {
                errors.push("budget", "Please enter a valid budget amount");
            }
            parsed
        };

        let start_date = date_field(&mut errors, "start_date", &self.start_date, "Start date is required");
        let expected_completion = date_field(
            &mut errors,
            "expected_completion",
            &self.expected_completion,
            "Expected completion date is required",
        );
        if let (Some(start), Some(end)) = (start_date, expected_completion) {
            if end < start {
                errors.push("expected_completion", "Expected completion cannot be before the start date");
            }
        }

        errors.finish()?;
        let manager = self.site_manager_name.trim();
        Ok(ProjectSeed {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            budget: budget.unwrap_or_default(),
            start_date: start_date.unwrap_or_default(),
            expected_completion: expected_completion.unwrap_or_default(),
            site_manager: SiteManager {
                name: manager.to_string(),
                initials: initials(manager),
            },
            description: non_blank(&self.description),
        })
    }
}

fn date_field(
    errors: &mut ValidationError,
    field: &'static str,
    value: &str,
    missing: &str,
) -> Option<chrono::NaiveDate> {
    if value.trim().is_empty() {
        errors.push(field, missing);
        return None;
    }
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.push(field, "Use the YYYY-MM-DD format");
    }
    parsed
}

impl FormDraft for ProjectDraft {
    const TITLE: &'static str = "Create New Project";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.location,
            2 => &self.budget,
            3 => &self.start_date,
            4 => &self.expected_completion,
            5 => &self.site_manager_name,
            6 => &self.description,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.location),
            2 => Some(&mut self.budget),
            3 => Some(&mut self.start_date),
            4 => Some(&mut self.expected_completion),
            5 => Some(&mut self.site_manager_name),
            6 => Some(&mut self.description),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plaza() -> ProjectDraft {
        ProjectDraft {
            name: "Gulberg Towers".into(),
            location: "Gulberg, Lahore".into(),
            budget: "12,500,000".into(),
            start_date: "2025-07-01".into(),
            expected_completion: "2026-06-30".into(),
            site_manager_name: "fatima khan".into(),
            description: "  ".into(),
        }
    }

    #[test]
    fn derives_initials_and_budget() {
        let seed = plaza().validate().unwrap();
        assert_eq!(seed.budget, 12_500_000);
        assert_eq!(seed.site_manager.initials, "FK");
        assert_eq!(seed.description, None);
    }

    #[test]
    fn completion_cannot_precede_start() {
        let mut draft = plaza();
        draft.expected_completion = "2025-01-01".into();
        let error = draft.validate().unwrap_err();
        assert!(error.has("expected_completion"));
        assert!(!error.has("start_date"));
    }

    #[test]
    fn description_is_optional() {
        let spec = ProjectDraft::fields().iter().find(|f| f.key == "description").unwrap();
        assert!(!spec.required);
        let error = ProjectDraft::default().validate().unwrap_err();
        assert!(!error.has("description"));
        assert_eq!(error.errors().len(), 6);
    }
}
