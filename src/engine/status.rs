use serde::Serialize;

use crate::models::{
    Designation, FileType, InvoiceStatus, Labelled, MaterialStatus, MemberStatus, ProjectStatus,
    TaskStatus,
};

/// Display classification of a status value. Front-ends pick the actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayTag {
    Success,
    Info,
    Warning,
    Danger,
    Accent,
    Highlight,
    Muted,
    /// Anything outside the known enumeration.
    Neutral,
}

/// The single colour mapping for one status enumeration.
pub trait Tagged {
    fn tag(&self) -> DisplayTag;
}

impl Tagged for MaterialStatus {
    fn tag(&self) -> DisplayTag {
        match self {
            MaterialStatus::OnSite => DisplayTag::Success,
            MaterialStatus::InWarehouse => DisplayTag::Info,
            MaterialStatus::OnTheWay => DisplayTag::Warning,
        }
    }
}

impl Tagged for InvoiceStatus {
    fn tag(&self) -> DisplayTag {
        match self {
            InvoiceStatus::Paid => DisplayTag::Success,
            InvoiceStatus::Pending => DisplayTag::Warning,
            InvoiceStatus::Overdue => DisplayTag::Danger,
            InvoiceStatus::Draft => DisplayTag::Muted,
        }
    }
}

impl Tagged for MemberStatus {
    fn tag(&self) -> DisplayTag {
        match self {
            MemberStatus::Active => DisplayTag::Success,
            MemberStatus::OnLeave => DisplayTag::Warning,
            MemberStatus::Inactive => DisplayTag::Danger,
        }
    }
}

impl Tagged for Designation {
    fn tag(&self) -> DisplayTag {
        match self {
            Designation::SiteManager | Designation::Supervisor | Designation::Foreman => {
                DisplayTag::Info
            }
            Designation::Engineer => DisplayTag::Accent,
            Designation::Labour
            | Designation::Electrician
            | Designation::Plumber
            | Designation::Mason => DisplayTag::Highlight,
        }
    }
}

impl Tagged for ProjectStatus {
    fn tag(&self) -> DisplayTag {
        match self {
            ProjectStatus::InProgress => DisplayTag::Success,
            ProjectStatus::Planning => DisplayTag::Info,
            ProjectStatus::Completed => DisplayTag::Muted,
        }
    }
}

impl Tagged for TaskStatus {
    fn tag(&self) -> DisplayTag {
        match self {
            TaskStatus::Completed => DisplayTag::Success,
            TaskStatus::InProgress => DisplayTag::Info,
            TaskStatus::Pending => DisplayTag::Warning,
        }
    }
}

impl Tagged for FileType {
    fn tag(&self) -> DisplayTag {
        match self {
            FileType::Pdf => DisplayTag::Danger,
            FileType::Excel => DisplayTag::Success,
            FileType::Archive => DisplayTag::Accent,
            FileType::Image => DisplayTag::Info,
            FileType::Document => DisplayTag::Muted,
        }
    }
}

/// Which enumeration a raw status string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Material,
    Invoice,
    Member,
    Designation,
    Project,
    Task,
    FileType,
}

impl StatusKind {
    pub const ALL: &'static [StatusKind] = &[
        StatusKind::Material,
        StatusKind::Invoice,
        StatusKind::Member,
        StatusKind::Designation,
        StatusKind::Project,
        StatusKind::Task,
        StatusKind::FileType,
    ];

    /// Labels of every declared value for this kind.
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            StatusKind::Material => labels::<MaterialStatus>(),
            StatusKind::Invoice => labels::<InvoiceStatus>(),
            StatusKind::Member => labels::<MemberStatus>(),
            StatusKind::Designation => labels::<Designation>(),
            StatusKind::Project => labels::<ProjectStatus>(),
            StatusKind::Task => labels::<TaskStatus>(),
            StatusKind::FileType => labels::<FileType>(),
        }
    }
}

fn labels<E: Labelled>() -> Vec<&'static str> {
    E::all().iter().map(Labelled::label).collect()
}

fn lookup<E: Labelled + Tagged>(value: &str) -> DisplayTag {
    E::from_label(value).map_or(DisplayTag::Neutral, |v| v.tag())
}

/// Maps a raw status string to its tag. Never fails: unknown values are `Neutral`.
/// File types compare case-insensitively, like the directory page does.
pub fn resolve(kind: StatusKind, value: &str) -> DisplayTag {
    match kind {
        StatusKind::Material => lookup::<MaterialStatus>(value),
        StatusKind::Invoice => lookup::<InvoiceStatus>(value),
        StatusKind::Member => lookup::<MemberStatus>(value),
        StatusKind::Designation => lookup::<Designation>(value),
        StatusKind::Project => lookup::<ProjectStatus>(value),
        StatusKind::Task => lookup::<TaskStatus>(value),
        StatusKind::FileType => FileType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .map_or(DisplayTag::Neutral, Tagged::tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_value_has_a_real_tag() {
        for kind in StatusKind::ALL {
            for label in kind.labels() {
                assert_ne!(resolve(*kind, label), DisplayTag::Neutral, "{:?} {}", kind, label);
            }
        }
    }

    #[test]
    fn unknown_values_fall_back_to_neutral() {
        for kind in StatusKind::ALL {
            assert_eq!(resolve(*kind, "Delivered"), DisplayTag::Neutral);
            assert_eq!(resolve(*kind, ""), DisplayTag::Neutral);
        }
    }

    #[test]
    fn known_colours() {
        assert_eq!(resolve(StatusKind::Material, "On Site"), DisplayTag::Success);
        assert_eq!(resolve(StatusKind::Invoice, "Overdue"), DisplayTag::Danger);
        assert_eq!(resolve(StatusKind::Member, "On Leave"), DisplayTag::Warning);
        assert_eq!(resolve(StatusKind::FileType, "pdf"), DisplayTag::Danger);
        assert_eq!(resolve(StatusKind::FileType, "EXCEL"), DisplayTag::Success);
    }
}
