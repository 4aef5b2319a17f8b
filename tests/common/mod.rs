#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use site_admin::forms::{InvoiceDraft, MaterialDraft};
use site_admin::{Dashboard, Session};

pub fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 22)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid timestamp")
}

/// Seeded dashboard for a signed-in site engineer, with a frozen clock.
pub fn dashboard() -> Dashboard {
    Dashboard::new(Session::new("sara@des.com")).with_clock(noon)
}

pub fn cement_draft() -> MaterialDraft {
    MaterialDraft {
        name: "Portland Cement".to_string(),
        category: "Civil".to_string(),
        quantity: "200 Bags".to_string(),
        unit_cost: "850".to_string(),
        supplier: "ABC Cement Co.".to_string(),
        project: "DHA Phase 4".to_string(),
    }
}

pub fn invoice_draft() -> InvoiceDraft {
    InvoiceDraft {
        supplier: "Lahore Sand Traders".to_string(),
        amount: "50,000".to_string(),
        project: "Wild Zoo Complex".to_string(),
        category: "Materials".to_string(),
        payment_method: "Cash".to_string(),
        issue_date: "2025-05-22".to_string(),
        due_date: "2025-06-01".to_string(),
        status: "Pending".to_string(),
    }
}
