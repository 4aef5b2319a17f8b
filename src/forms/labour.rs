use super::{parse_amount, require, FieldSpec, FormDraft};
use crate::error::ValidationError;
use crate::models::LabourSeed;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabourDraft {
    pub name: String,
    pub role: String,
    pub contact: String,
    pub daily_rate: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Worker Name"),
    FieldSpec::required("role", "Role"),
    FieldSpec::required("contact", "Contact"),
    FieldSpec::required("daily_rate", "Daily Rate (Rs.)"),
];

impl LabourDraft {
    pub fn validate(&self) -> Result<LabourSeed, ValidationError> {
        let mut errors = ValidationError::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "role", &self.role, "Role is required");
        require(&mut errors, "contact", &self.contact, "Contact is required");

        let daily_rate = if self.daily_rate.trim().is_empty() {
            errors.push("daily_rate", "Daily rate is required");
            None
        } else {
            let parsed = parse_amount(&self.daily_rate);
            if parsed.is_none() {
                errors.push("daily_rate", "Please enter a valid number");
            }
            parsed
        };

        errors.finish()?;
        Ok(LabourSeed {
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            contact: self.contact.trim().to_string(),
            daily_rate: daily_rate.unwrap_or_default(),
        })
    }
}

impl FormDraft for LabourDraft {
    const TITLE: &'static str = "Add Labour";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.role,
            2 => &self.contact,
            3 => &self.daily_rate,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.role),
            2 => Some(&mut self.contact),
            3 => Some(&mut self.daily_rate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_rate_must_be_numeric() {
        let draft = LabourDraft {
            name: "Imran".into(),
            role: "Carpenter".into(),
            contact: "+92 307 0000000".into(),
            daily_rate: "two thousand".into(),
        };
        let error = draft.validate().unwrap_err();
        assert_eq!(error.errors().len(), 1);
        assert!(error.has("daily_rate"));
    }

    #[test]
    fn rate_accepts_separators() {
        let draft = LabourDraft {
            name: "Imran".into(),
            role: "Carpenter".into(),
            contact: "+92 307 0000000".into(),
            daily_rate: "2,600".into(),
        };
        assert_eq!(draft.validate().unwrap().daily_rate, 2600);
    }
}
