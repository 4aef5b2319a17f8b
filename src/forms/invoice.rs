use super::{parse_amount, parse_date, require, FieldSpec, FormDraft};
use crate::error::ValidationError;
use crate::models::{InvoiceSeed, InvoiceStatus, PaymentMethod};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub supplier: String,
    pub amount: String,
    pub project: String,
    pub category: String,
    pub payment_method: String,
    pub issue_date: String,
    pub due_date: String,
    /// Blank means Draft.
    pub status: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("supplier", "Supplier"),
    FieldSpec::required("amount", "Amount (Rs.)"),
    FieldSpec::required("project", "Project"),
    FieldSpec::required("category", "Category"),
    FieldSpec::required("payment_method", "Payment Method"),
    FieldSpec::required("issue_date", "Issue Date (YYYY-MM-DD)"),
    FieldSpec::required("due_date", "Due Date (YYYY-MM-DD)"),
    FieldSpec::optional("status", "Status"),
];

impl InvoiceDraft {
    pub fn validate(&self) -> Result<InvoiceSeed, ValidationError> {
        let mut errors = ValidationError::new();
        require(&mut errors, "supplier", &self.supplier, "Supplier is required");
        require(&mut errors, "project", &self.project, "Project is required");
        require(&mut errors, "category", &self.category, "Category is required");

        let amount = if self.amount.trim().is_empty() {
            errors.push("amount", "Amount is required");
            None
        } else {
            let parsed = parse_amount(&self.amount);
            if parsed.is_none() {
                errors.push("amount", "Please enter a valid amount");
            }
            parsed
        };

        let payment_method = match self.payment_method.trim() {
            "" => {
                errors.push("payment_method", "Payment method is required");
                None
            }
            value => {
                let parsed = value.parse::<PaymentMethod>().ok();
                if parsed.is_none() {
                    errors.push("payment_method", format!("Unknown payment method `{}`", value));
                }
                parsed
            }
        };

        let status = match self.status.trim() {
            "" => Some(InvoiceStatus::Draft),
            value => {
                let parsed = value.parse::<InvoiceStatus>().ok();
                if parsed.is_none() {
                    errors.push("status", format!("Unknown status `{}`", value));
                }
                parsed
            }
        };

        let issue_date = date(&mut errors, "issue_date", &self.issue_date);
        let due_date = date(&mut errors, "due_date", &self.due_date);
        if let (Some(issued), Some(due)) = (issue_date, due_date) {
            if due < issued {
                errors.push("due_date", "Due date cannot be before the issue date");
            }
        }

        errors.finish()?;
        Ok(InvoiceSeed {
            supplier: self.supplier.trim().to_string(),
            amount: amount.unwrap_or_default(),
            status: status.unwrap_or(InvoiceStatus::Draft),
            due_date: due_date.unwrap_or_default(),
            issue_date: issue_date.unwrap_or_default(),
            project: self.project.trim().to_string(),
            category: self.category.trim().to_string(),
            payment_method: payment_method.unwrap_or(PaymentMethod::BankTransfer),
        })
    }
}

fn date(errors: &mut ValidationError, field: &'static str, value: &str) -> Option<chrono::NaiveDate> {
    if value.trim().is_empty() {
        errors.push(field, "Date is required");
        return None;
    }
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.push(field, "Use the YYYY-MM-DD format");
    }
    parsed
}

impl FormDraft for InvoiceDraft {
    const TITLE: &'static str = "Create Invoice";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.supplier,
            1 => &self.amount,
            2 => &self.project,
            3 => &self.category,
            4 => &self.payment_method,
            5 => &self.issue_date,
            6 => &self.due_date,
            7 => &self.status,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.supplier),
            1 => Some(&mut self.amount),
            2 => Some(&mut self.project),
            3 => Some(&mut self.category),
            4 => Some(&mut self.payment_method),
            5 => Some(&mut self.issue_date),
            6 => Some(&mut self.due_date),
            7 => Some(&mut self.status),
            _ => None,
        }
    }
}
