use chrono::NaiveDate;

/// Enumerations that round-trip through the labels shown on screen.
pub trait Labelled: Sized + Copy + 'static {
    fn all() -> &'static [Self];
    fn label(&self) -> &'static str;

    fn from_label(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.label() == value)
    }
}

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl $crate::models::Labelled for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn label(&self) -> &'static str {
                self.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::models::Labelled>::from_label(s)
                    .ok_or_else(|| $crate::error::UnknownLabel(s.to_string()))
            }
        }
    };
}

mod project;
mod material;
mod invoice;
mod team_member;
mod directory_file;
mod task;
mod labour;
mod audit;

pub use project::{Project, ProjectSeed, ProjectStatus, SiteManager};
pub use material::{Material, MaterialSeed, MaterialStatus};
pub use invoice::{invoice_code, Invoice, InvoiceSeed, InvoiceStatus, PaymentMethod};
pub use team_member::{Designation, MemberStatus, TeamMember, TeamMemberSeed};
pub use directory_file::{format_file_size, DirectoryFile, DirectoryFileSeed, FileType};
pub use task::{Task, TaskSeed, TaskStatus};
pub use labour::{Labour, LabourSeed};
pub use audit::AuditEntry;

/// Dates are shown the way the site office writes them, e.g. "May 21, 2025".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Rupee amounts with thousands separators, e.g. "Rs. 170,000".
pub fn display_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("Rs. {}", grouped)
}
