//! Per-entity capability sets: what each list page filters on, searches through,
//! shows as columns and sums up in its footer.

use serde::Serialize;

use crate::engine::{Aggregator, Entity, Filterable, Id, StatusKind};
use crate::models::{
    display_amount, display_date, Designation, DirectoryFile, Invoice, InvoiceStatus, Labour,
    Material, MaterialStatus, MemberStatus, Project, ProjectStatus, Task, TaskStatus, TeamMember,
};

/// A record kind that can back a list page.
pub trait Listing: Filterable + Entity + Serialize {
    const TITLE: &'static str;
    /// Enumeration the status column is coloured by.
    const STATUS_KIND: StatusKind;

    /// Dimensions offered as quick filters, with their labels.
    fn filter_dimensions() -> &'static [(Self::Dimension, &'static str)];
    fn columns() -> &'static [&'static str];
    /// Index into `columns()` of the coloured status cell.
    fn status_column() -> usize;
    fn cells(&self) -> Vec<String>;
    /// Label/value pairs summarising the given (filtered) records.
    fn footer(records: &[&Self]) -> Vec<(&'static str, String)>;

    fn record_id(&self) -> Id {
        self.id()
    }
}

/// Distinct values of `dimension` in first-seen order, for filter pickers.
pub fn filter_options<T: Filterable>(records: &[T], dimension: T::Dimension) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for record in records {
        let value = record.dimension_value(dimension);
        if !options.iter().any(|o| o == value) {
            options.push(value.to_string());
        }
    }
    options
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialFilter {
    Status,
    Category,
    Project,
}

impl Filterable for Material {
    type Dimension = MaterialFilter;

    fn dimension_value(&self, dimension: MaterialFilter) -> &str {
        match dimension {
            MaterialFilter::Status => self.status.as_str(),
            MaterialFilter::Category => &self.category,
            MaterialFilter::Project => &self.project,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.category, &self.supplier]
    }
}

impl Listing for Material {
    const TITLE: &'static str = "Material Inventory";
    const STATUS_KIND: StatusKind = StatusKind::Material;

    fn filter_dimensions() -> &'static [(MaterialFilter, &'static str)] {
        &[
            (MaterialFilter::Status, "Status"),
            (MaterialFilter::Category, "Category"),
            (MaterialFilter::Project, "Project"),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["Material", "Category", "Quantity", "Unit Cost", "Total Cost", "Status", "Project", "Updated"]
    }

    fn status_column() -> usize {
        5
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.clone(),
            self.assigned_qty.clone(),
            display_amount(self.unit_cost),
            display_amount(self.total_cost),
            self.status.to_string(),
            self.project.clone(),
            display_date(self.last_updated),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        vec![
            ("Items", agg.count().to_string()),
            ("Total Value", display_amount(agg.sum(|m| m.total_cost))),
            ("On Site", agg.count_where(|m| m.status == MaterialStatus::OnSite).to_string()),
            ("On The Way", agg.count_where(|m| m.status == MaterialStatus::OnTheWay).to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceFilter {
    Status,
    Project,
    Category,
}

impl Filterable for Invoice {
    type Dimension = InvoiceFilter;

    fn dimension_value(&self, dimension: InvoiceFilter) -> &str {
        match dimension {
            InvoiceFilter::Status => self.status.as_str(),
            InvoiceFilter::Project => &self.project,
            InvoiceFilter::Category => &self.category,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.code, &self.supplier, &self.project]
    }
}

impl Listing for Invoice {
    const TITLE: &'static str = "Invoice Management";
    const STATUS_KIND: StatusKind = StatusKind::Invoice;

    fn filter_dimensions() -> &'static [(InvoiceFilter, &'static str)] {
        &[
            (InvoiceFilter::Status, "Status"),
            (InvoiceFilter::Project, "Project"),
            (InvoiceFilter::Category, "Category"),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["Invoice", "Supplier", "Project", "Amount", "Status", "Issued", "Due", "Payment"]
    }

    fn status_column() -> usize {
        4
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.supplier.clone(),
            self.project.clone(),
            display_amount(self.amount),
            self.status.to_string(),
            display_date(self.issue_date),
            display_date(self.due_date),
            self.payment_method.to_string(),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        vec![
            ("Invoices", agg.count().to_string()),
            ("Total Amount", display_amount(agg.sum(|i| i.amount))),
            (
                "Pending Amount",
                display_amount(agg.sum_where(|i| i.status.is_outstanding(), |i| i.amount)),
            ),
            ("Overdue", agg.count_where(|i| i.status == InvoiceStatus::Overdue).to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFilter {
    Designation,
    Status,
}

impl Filterable for TeamMember {
    type Dimension = MemberFilter;

    fn dimension_value(&self, dimension: MemberFilter) -> &str {
        match dimension {
            MemberFilter::Designation => self.designation.as_str(),
            MemberFilter::Status => self.status.as_str(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, self.designation.as_str(), &self.email]
    }
}

impl Listing for TeamMember {
    const TITLE: &'static str = "Team Directory";
    const STATUS_KIND: StatusKind = StatusKind::Member;

    fn filter_dimensions() -> &'static [(MemberFilter, &'static str)] {
        &[(MemberFilter::Designation, "Designation"), (MemberFilter::Status, "Status")]
    }

    fn columns() -> &'static [&'static str] {
        &["", "Name", "Designation", "Status", "Phone", "Email", "Projects", "Experience"]
    }

    fn status_column() -> usize {
        3
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.initials(),
            self.name.clone(),
            self.designation.to_string(),
            self.status.to_string(),
            self.phone.clone(),
            self.email.clone(),
            self.assigned_projects.join(", "),
            self.experience.clone(),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        vec![
            ("Members", agg.count().to_string()),
            ("Active", agg.count_where(|m| m.status == MemberStatus::Active).to_string()),
            (
                "Site Managers",
                agg.count_where(|m| m.designation == Designation::SiteManager).to_string(),
            ),
            ("Engineers", agg.count_where(|m| m.designation == Designation::Engineer).to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    Project,
    Type,
    Category,
}

impl Filterable for DirectoryFile {
    type Dimension = FileFilter;

    fn dimension_value(&self, dimension: FileFilter) -> &str {
        match dimension {
            FileFilter::Project => &self.project,
            FileFilter::Type => self.file_type.as_str(),
            FileFilter::Category => &self.category,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.category]
    }
}

impl Listing for DirectoryFile {
    const TITLE: &'static str = "File Repository";
    const STATUS_KIND: StatusKind = StatusKind::FileType;

    fn filter_dimensions() -> &'static [(FileFilter, &'static str)] {
        &[
            (FileFilter::Project, "Project"),
            (FileFilter::Type, "Type"),
            (FileFilter::Category, "Category"),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Type", "Size", "Project", "Category", "Uploaded By", "Date"]
    }

    fn status_column() -> usize {
        1
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.file_type.to_string(),
            self.size.clone(),
            self.project.clone(),
            self.category.clone(),
            self.uploaded_by.clone(),
            display_date(self.upload_date),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        let mut projects: Vec<&str> = records.iter().map(|f| f.project.as_str()).collect();
        projects.sort_unstable();
        projects.dedup();
        vec![
            ("Files", agg.count().to_string()),
            ("Projects", projects.len().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    Status,
    Location,
}

impl Filterable for Project {
    type Dimension = ProjectFilter;

    fn dimension_value(&self, dimension: ProjectFilter) -> &str {
        match dimension {
            ProjectFilter::Status => self.status.as_str(),
            ProjectFilter::Location => &self.location,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.location, &self.site_manager.name]
    }
}

impl Listing for Project {
    const TITLE: &'static str = "Projects";
    const STATUS_KIND: StatusKind = StatusKind::Project;

    fn filter_dimensions() -> &'static [(ProjectFilter, &'static str)] {
        &[(ProjectFilter::Status, "Status"), (ProjectFilter::Location, "Location")]
    }

    fn columns() -> &'static [&'static str] {
        &["Project", "Status", "Progress", "Site Manager", "Budget", "Spent", "Start", "Completion"]
    }

    fn status_column() -> usize {
        1
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.to_string(),
            format!("{}%", self.progress),
            format!("{} ({})", self.site_manager.name, self.site_manager.initials),
            display_amount(self.budget),
            display_amount(self.spent),
            display_date(self.start_date),
            display_date(self.expected_completion),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        vec![
            ("Projects", agg.count().to_string()),
            ("In Progress", agg.count_where(|p| p.status == ProjectStatus::InProgress).to_string()),
            ("Total Budget", display_amount(agg.sum(|p| p.budget))),
            ("Spent", display_amount(agg.sum(|p| p.spent))),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    Status,
    Assignee,
}

impl Filterable for Task {
    type Dimension = TaskFilter;

    fn dimension_value(&self, dimension: TaskFilter) -> &str {
        match dimension {
            TaskFilter::Status => self.status.as_str(),
            TaskFilter::Assignee => &self.assigned_to,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.assigned_to]
    }
}

impl Listing for Task {
    const TITLE: &'static str = "Tasks";
    const STATUS_KIND: StatusKind = StatusKind::Task;

    fn filter_dimensions() -> &'static [(TaskFilter, &'static str)] {
        &[(TaskFilter::Status, "Status"), (TaskFilter::Assignee, "Assigned To")]
    }

    fn columns() -> &'static [&'static str] {
        &["Task", "Assigned To", "Due", "Status", "Description"]
    }

    fn status_column() -> usize {
        3
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.assigned_to.clone(),
            display_date(self.due_date),
            self.status.to_string(),
            self.description.clone(),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        vec![
            ("Tasks", agg.count().to_string()),
            ("Completed", agg.count_where(|t| t.status == TaskStatus::Completed).to_string()),
            ("Pending", agg.count_where(|t| t.status == TaskStatus::Pending).to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabourFilter {
    Role,
}

impl Filterable for Labour {
    type Dimension = LabourFilter;

    fn dimension_value(&self, dimension: LabourFilter) -> &str {
        match dimension {
            LabourFilter::Role => &self.role,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.role, &self.contact]
    }
}

impl Listing for Labour {
    const TITLE: &'static str = "Labour";
    // Roles are free text; those naming a designation pick up its colour.
    const STATUS_KIND: StatusKind = StatusKind::Designation;

    fn filter_dimensions() -> &'static [(LabourFilter, &'static str)] {
        &[(LabourFilter::Role, "Role")]
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Role", "Contact", "Daily Rate"]
    }

    fn status_column() -> usize {
        1
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.clone(),
            self.contact.clone(),
            display_amount(self.daily_rate),
        ]
    }

    fn footer(records: &[&Self]) -> Vec<(&'static str, String)> {
        let agg = Aggregator::new(records.iter().copied());
        vec![
            ("Workers", agg.count().to_string()),
            ("Daily Payroll", display_amount(agg.sum(|l| l.daily_rate))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Query;
    use crate::seed;

    #[test]
    fn materials_filter_by_status_and_category_together() {
        let materials = seed::materials();
        let query = Query::new()
            .filter(MaterialFilter::Status, "On Site")
            .filter(MaterialFilter::Category, "Civil");
        let names: Vec<&str> = query.apply(&materials).iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Portland Cement"]);
    }

    #[test]
    fn material_search_is_case_insensitive() {
        let materials = seed::materials();
        for needle in ["cement", "CEMENT"] {
            let hits = Query::<MaterialFilter>::new().search(needle).apply(&materials);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].name, "Portland Cement");
        }
    }

    #[test]
    fn invoice_search_covers_code_supplier_and_project() {
        let invoices = seed::invoices();
        let by = |needle: &str| Query::<InvoiceFilter>::new().search(needle).apply(&invoices).len();
        assert_eq!(by("inv-003"), 1);
        assert_eq!(by("steel"), 1);
        assert_eq!(by("mall of lahore"), 2);
        assert_eq!(by("bank transfer"), 0);
    }

    #[test]
    fn invoice_footer_sums_the_filtered_view() {
        let invoices = seed::invoices();
        let query = Query::new().filter(InvoiceFilter::Project, "DHA Phase 4");
        let footer = Invoice::footer(&query.apply(&invoices));
        assert_eq!(footer[0], ("Invoices", "2".to_string()));
        assert_eq!(footer[1], ("Total Amount", "Rs. 295,000".to_string()));
        assert_eq!(footer[2], ("Pending Amount", "Rs. 125,000".to_string()));
    }

    #[test]
    fn empty_view_has_zero_footer() {
        let invoices = seed::invoices();
        let hits = Query::<InvoiceFilter>::new().search("no such supplier").apply(&invoices);
        let footer = Invoice::footer(&hits);
        assert_eq!(footer[0].1, "0");
        assert_eq!(footer[1].1, "Rs. 0");
    }

    #[test]
    fn team_filters_by_designation() {
        let team = seed::team();
        let engineers = Query::new().filter(MemberFilter::Designation, "Engineer").apply(&team);
        assert_eq!(engineers.len(), 1);
        assert_eq!(engineers[0].name, "Hassan Raza");
    }

    #[test]
    fn filter_options_keep_first_seen_order() {
        let files = seed::files();
        assert_eq!(
            filter_options(&files, FileFilter::Project),
            vec!["DHA Phase 4", "Mall of Lahore", "Wild Zoo Complex"]
        );
    }

    #[test]
    fn every_row_has_one_cell_per_column() {
        fn check<T: Listing>(records: &[T]) {
            for record in records {
                assert_eq!(record.cells().len(), T::columns().len(), "{}", T::TITLE);
            }
            assert!(T::status_column() < T::columns().len());
        }
        check(&seed::materials());
        check(&seed::invoices());
        check(&seed::team());
        check(&seed::files());
        check(&seed::projects());
        check(&seed::tasks());
        check(&seed::labour());
    }
}
