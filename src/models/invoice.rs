use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Entity, Id};

labelled_enum! {
    /// Set by hand; nothing moves an invoice to Overdue when its due date passes.
    InvoiceStatus {
        Paid => "Paid",
        Pending => "Pending",
        Overdue => "Overdue",
        Draft => "Draft",
    }
}

labelled_enum! {
    PaymentMethod {
        BankTransfer => "Bank Transfer",
        Cheque => "Cheque",
        Cash => "Cash",
    }
}

impl InvoiceStatus {
    /// Pending and overdue invoices are money still owed.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Overdue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: Id,
    pub code: String,
    pub supplier: String,
    pub amount: u64,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub issue_date: NaiveDate,
    pub project: String,
    pub category: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSeed {
    pub supplier: String,
    pub amount: u64,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub issue_date: NaiveDate,
    pub project: String,
    pub category: String,
    pub payment_method: PaymentMethod,
}

pub fn invoice_code(id: Id) -> String {
    format!("INV-{:03}", id)
}

impl Entity for Invoice {
    type Seed = InvoiceSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: InvoiceSeed) -> Self {
        Self {
            id,
            code: invoice_code(id),
            supplier: seed.supplier,
            amount: seed.amount,
            status: seed.status,
            due_date: seed.due_date,
            issue_date: seed.issue_date,
            project: seed.project,
            category: seed.category,
            payment_method: seed.payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_zero_padded() {
        assert_eq!(invoice_code(1), "INV-001");
        assert_eq!(invoice_code(42), "INV-042");
        assert_eq!(invoice_code(1234), "INV-1234");
    }
}
