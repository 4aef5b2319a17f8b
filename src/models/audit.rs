use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub at: NaiveDateTime,
    pub user: String,
    /// Page the change came from ("Materials", "Projects", ...).
    pub module: String,
    pub action: String,
}

impl AuditEntry {
    pub fn timestamp(&self) -> String {
        self.at.format("%b %-d, %Y %I:%M %p").to_string()
    }
}
