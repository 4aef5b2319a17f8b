use chrono::NaiveDate;

use super::{parse_amount, parse_quantity, require, FieldSpec, FormDraft};
use crate::categories::CategoryRegistry;
use crate::error::ValidationError;
use crate::models::MaterialSeed;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialDraft {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub unit_cost: String,
    pub supplier: String,
    pub project: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Material Name"),
    FieldSpec::required("category", "Category"),
    FieldSpec::required("quantity", "Quantity"),
    FieldSpec::required("unit_cost", "Unit Cost (Rs.)"),
    FieldSpec::required("supplier", "Supplier"),
    FieldSpec::required("project", "Project"),
];

impl MaterialDraft {
    pub fn validate(
        &self,
        categories: &CategoryRegistry,
        today: NaiveDate,
    ) -> Result<MaterialSeed, ValidationError> {
        let mut errors = ValidationError::new();
        require(&mut errors, "name", &self.name, "Material name is required");
        require(&mut errors, "supplier", &self.supplier, "Supplier is required");
        require(&mut errors, "project", &self.project, "Project is required");

        let category = self.category.trim();
        if category.is_empty() {
            errors.push("category", "Category is required");
        } else if !categories.contains(category) {
            errors.push("category", format!("Unknown category `{}`", category));
        }

        let quantity = if self.quantity.trim().is_empty() {
            errors.push("quantity", "Quantity is required");
            None
        } else {
            let parsed = parse_quantity(&self.quantity);
            if parsed.is_none() {
                errors.push("quantity", "Quantity must contain a number");
            }
            parsed
        };

        let unit_cost = if self.unit_cost.trim().is_empty() {
            errors.push("unit_cost", "Unit cost is required");
            None
        } else {
            let parsed = parse_amount(&self.unit_cost);
            if parsed.is_none() {
                errors.push("unit_cost", "Please enter a valid number");
            }
            parsed
        };

        errors.finish()?;
        Ok(MaterialSeed {
            name: self.name.trim().to_string(),
            category: category.to_string(),
            assigned_qty: self.quantity.trim().to_string(),
            quantity: quantity.unwrap_or_default(),
            unit_cost: unit_cost.unwrap_or_default(),
            project: self.project.trim().to_string(),
            supplier: self.supplier.trim().to_string(),
            last_updated: today,
        })
    }
}

impl FormDraft for MaterialDraft {
    const TITLE: &'static str = "Add New Material";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.category,
            2 => &self.quantity,
            3 => &self.unit_cost,
            4 => &self.supplier,
            5 => &self.project,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.category),
            2 => Some(&mut self.quantity),
            3 => Some(&mut self.unit_cost),
            4 => Some(&mut self.supplier),
            5 => Some(&mut self.project),
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

    fn cement() -> MaterialDraft {
        MaterialDraft {
            name: "Portland Cement".into(),
            category: "Civil".into(),
            quantity: "200 Bags".into(),
            unit_cost: "850".into(),
            supplier: "ABC Cement Co.".into(),
            project: "DHA Phase 4".into(),
        }
    }

    #[test]
    fn valid_draft_becomes_a_seed() {
        let seed = cement().validate(&CategoryRegistry::default(), today()).unwrap();
        assert_eq!(seed.quantity, 200);
        assert_eq!(seed.unit_cost, 850);
        assert_eq!(seed.assigned_qty, "200 Bags");
        assert_eq!(seed.last_updated, today());
    }

    #[test]
    fn blank_draft_reports_every_field() {
        let error = MaterialDraft::default()
            .validate(&CategoryRegistry::default(), today())
            .unwrap_err();
        for spec in MaterialDraft::fields() {
            assert!(error.has(spec.key), "missing error for {}", spec.key);
        }
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let mut draft = cement();
        draft.quantity = "lots".into();
        draft.unit_cost = "8.50".into();
        let error = draft.validate(&CategoryRegistry::default(), today()).unwrap_err();
        assert_eq!(error.message_for("quantity"), Some("Quantity must contain a number"));
        assert_eq!(error.message_for("unit_cost"), Some("Please enter a valid number"));
        assert!(!error.has("name"));
    }

    #[test]
    fn category_must_be_registered() {
        let mut draft = cement();
        draft.category = "Plumbing".into();
        let error = draft.validate(&CategoryRegistry::default(), today()).unwrap_err();
        assert!(error.has("category"));
    }
}
