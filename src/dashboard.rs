//! The composition root: one [`Dashboard`] per logged-in session owns every store,
//! routes every create and delete through validation, and records what changed.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};

use crate::auth::Session;
use crate::categories::CategoryRegistry;
use crate::engine::{DashboardLayout, EntityStore, Id, LayoutStore, WidgetKey};
use crate::error::{CategoryError, LayoutError, ValidationError};
use crate::forms::{
    InvoiceDraft, LabourDraft, MaterialDraft, ProjectDraft, TaskDraft, TeamMemberDraft,
    UploadDraft,
};
use crate::models::{
    display_amount, AuditEntry, DirectoryFile, Invoice, Labour, Material, Project, Task, TeamMember,
};
use crate::seed;
use crate::summary::{FinanceSummary, QuickOverview};

/// Tasks and crew belonging to one project.
#[derive(Debug, Clone, Default)]
pub struct ProjectWorkspace {
    pub tasks: EntityStore<Task>,
    pub labour: EntityStore<Labour>,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct Dashboard {
    session: Session,
    projects: EntityStore<Project>,
    materials: EntityStore<Material>,
    invoices: EntityStore<Invoice>,
    team: EntityStore<TeamMember>,
    files: EntityStore<DirectoryFile>,
    workspaces: BTreeMap<Id, ProjectWorkspace>,
    categories: CategoryRegistry,
    layout: LayoutStore,
    audit: Vec<AuditEntry>,
    clock: fn() -> NaiveDateTime,
}

impl Dashboard {
    /// A dashboard preloaded with the demo records.
    pub fn new(session: Session) -> Self {
        let projects = EntityStore::from_records(seed::projects());
        let workspaces = projects
            .list()
            .iter()
            .map(|p| {
                let workspace = ProjectWorkspace {
                    tasks: EntityStore::from_records(seed::tasks()),
                    labour: EntityStore::from_records(seed::labour()),
                };
                (p.id, workspace)
            })
            .collect();

        info!("dashboard opened for {}", session.email);
        Self {
            session,
            projects,
            materials: EntityStore::from_records(seed::materials()),
            invoices: EntityStore::from_records(seed::invoices()),
            team: EntityStore::from_records(seed::team()),
            files: EntityStore::from_records(seed::files()),
            workspaces,
            categories: seed::categories(),
            layout: LayoutStore::new(DashboardLayout::default()),
            audit: seed::audit_log(),
            clock: local_now,
        }
    }

    /// A dashboard with no records, only the default categories.
    pub fn empty(session: Session) -> Self {
        Self {
            session,
            projects: EntityStore::new(),
            materials: EntityStore::new(),
            invoices: EntityStore::new(),
            team: EntityStore::new(),
            files: EntityStore::new(),
            workspaces: BTreeMap::new(),
            categories: CategoryRegistry::default(),
            layout: LayoutStore::new(DashboardLayout::default()),
            audit: Vec::new(),
            clock: local_now,
        }
    }

    /// Replaces the wall clock used for "today" and audit timestamps.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    fn today(&self) -> NaiveDate {
        (self.clock)().date()
    }

    fn record(&mut self, module: &str, action: String) {
        debug!("[{}] {}", module, action);
        self.audit.push(AuditEntry {
            at: (self.clock)(),
            user: self.session.name.clone(),
            module: module.to_string(),
            action,
        });
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.list()
    }

    pub fn materials(&self) -> &[Material] {
        self.materials.list()
    }

    pub fn invoices(&self) -> &[Invoice] {
        self.invoices.list()
    }

    pub fn team(&self) -> &[TeamMember] {
        self.team.list()
    }

    pub fn files(&self) -> &[DirectoryFile] {
        self.files.list()
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Audit entries, oldest first.
    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit
    }

    pub fn project(&self, id: Id) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn workspace(&self, project: Id) -> Option<&ProjectWorkspace> {
        self.workspaces.get(&project)
    }

    pub fn create_material(&mut self, draft: &MaterialDraft) -> Result<Id, ValidationError> {
        let seed = draft.validate(&self.categories, self.today()).inspect_err(|e| {
            warn!("material rejected: {}", e);
        })?;
        let action = format!("Added material: {} ({})", seed.name, seed.assigned_qty);
        let id = self.materials.create(seed);
        self.record("Materials", action);
        Ok(id)
    }

    pub fn delete_material(&mut self, id: Id) -> bool {
        let name = self.materials.get(id).map(|m| m.name.clone());
        let removed = self.materials.delete(id);
        if let (true, Some(name)) = (removed, name) {
            self.record("Materials", format!("Removed material: {}", name));
        }
        removed
    }

    /// Adds a material category. The name is trimmed; blanks and duplicates are refused.
    pub fn add_category(&mut self, name: &str) -> Result<String, CategoryError> {
        let added = self.categories.add(name)?;
        self.record("Materials", format!("Added category: {}", added));
        Ok(added)
    }

    pub fn create_project(&mut self, draft: &ProjectDraft) -> Result<Id, ValidationError> {
        let seed = draft.validate().inspect_err(|e| {
            warn!("project rejected: {}", e);
        })?;
        let action = format!("Created new project: {}", seed.name);
        let id = self.projects.create(seed);
        self.workspaces.insert(id, ProjectWorkspace::default());
        self.record("Projects", action);
        Ok(id)
    }

    /// Removes the project together with its tasks and crew.
    pub fn delete_project(&mut self, id: Id) -> bool {
        let name = self.projects.get(id).map(|p| p.name.clone());
        let removed = self.projects.delete(id);
        self.workspaces.remove(&id);
        if let (true, Some(name)) = (removed, name) {
            self.record("Projects", format!("Removed project: {}", name));
        }
        removed
    }

    pub fn create_team_member(&mut self, draft: &TeamMemberDraft) -> Result<Id, ValidationError> {
        let seed = draft.validate(self.today()).inspect_err(|e| {
            warn!("team member rejected: {}", e);
        })?;
        let action = format!("Added team member: {} ({})", seed.name, seed.designation);
        let id = self.team.create(seed);
        self.record("Team", action);
        Ok(id)
    }

    pub fn delete_team_member(&mut self, id: Id) -> bool {
        let name = self.team.get(id).map(|m| m.name.clone());
        let removed = self.team.delete(id);
        if let (true, Some(name)) = (removed, name) {
            self.record("Team", format!("Removed team member: {}", name));
        }
        removed
    }

    /// Files every picked file as its own record; returns the new ids in pick order.
    pub fn upload_files(&mut self, draft: &UploadDraft) -> Result<Vec<Id>, ValidationError> {
        let seeds = draft
            .validate(&self.session.name, self.today())
            .inspect_err(|e| warn!("upload rejected: {}", e))?;
        let count = seeds.len();
        let project = draft.project.trim().to_string();
        let ids: Vec<Id> = seeds.into_iter().map(|seed| self.files.create(seed)).collect();
        self.record("Directory", format!("Uploaded {} file(s) to {}", count, project));
        Ok(ids)
    }

    pub fn delete_file(&mut self, id: Id) -> bool {
        let name = self.files.get(id).map(|f| f.name.clone());
        let removed = self.files.delete(id);
        if let (true, Some(name)) = (removed, name) {
            self.record("Directory", format!("Removed file: {}", name));
        }
        removed
    }

    pub fn create_invoice(&mut self, draft: &InvoiceDraft) -> Result<Id, ValidationError> {
        let seed = draft.validate().inspect_err(|e| {
            warn!("invoice rejected: {}", e);
        })?;
        let action = format!("Added invoice: {} from {}", display_amount(seed.amount), seed.supplier);
        let id = self.invoices.create(seed);
        self.record("Finance", action);
        Ok(id)
    }

    pub fn delete_invoice(&mut self, id: Id) -> bool {
        let code = self.invoices.get(id).map(|i| i.code.clone());
        let removed = self.invoices.delete(id);
        if let (true, Some(code)) = (removed, code) {
            self.record("Finance", format!("Removed invoice: {}", code));
        }
        removed
    }

    fn workspace_mut(&mut self, project: Id) -> Result<&mut ProjectWorkspace, ValidationError> {
        self.workspaces
            .get_mut(&project)
            .ok_or_else(|| ValidationError::single("project", "Unknown project"))
    }

    fn project_name(&self, project: Id) -> String {
        self.projects
            .get(project)
            .map_or_else(|| format!("project {}", project), |p| p.name.clone())
    }

    pub fn add_task(&mut self, project: Id, draft: &TaskDraft) -> Result<Id, ValidationError> {
        let seed = draft.validate().inspect_err(|e| {
            warn!("task rejected: {}", e);
        })?;
        let action = format!("Added task: {} to {}", seed.name, self.project_name(project));
        let id = self.workspace_mut(project)?.tasks.create(seed);
        self.record("Tasks", action);
        Ok(id)
    }

    pub fn delete_task(&mut self, project: Id, task: Id) -> bool {
        let removed = self
            .workspaces
            .get_mut(&project)
            .is_some_and(|w| w.tasks.delete(task));
        if removed {
            let action = format!("Removed task {} from {}", task, self.project_name(project));
            self.record("Tasks", action);
        }
        removed
    }

    pub fn add_labour(&mut self, project: Id, draft: &LabourDraft) -> Result<Id, ValidationError> {
        let seed = draft.validate().inspect_err(|e| {
            warn!("labour rejected: {}", e);
        })?;
        let action = format!("Hired {} ({}) for {}", seed.name, seed.role, self.project_name(project));
        let id = self.workspace_mut(project)?.labour.create(seed);
        self.record("Labour", action);
        Ok(id)
    }

    pub fn delete_labour(&mut self, project: Id, worker: Id) -> bool {
        let removed = self
            .workspaces
            .get_mut(&project)
            .is_some_and(|w| w.labour.delete(worker));
        if removed {
            let action = format!("Released worker {} from {}", worker, self.project_name(project));
            self.record("Labour", action);
        }
        removed
    }

    pub fn layout(&self) -> &LayoutStore {
        &self.layout
    }

    pub fn open_layout_editor(&mut self) -> Result<&DashboardLayout, LayoutError> {
        self.layout.open_editor()
    }

    pub fn toggle_widget(&mut self, key: WidgetKey) -> Result<bool, LayoutError> {
        self.layout.toggle(key)
    }

    pub fn commit_layout(&mut self) -> Result<(), LayoutError> {
        let visible = self.layout.commit()?.visible_widgets().len();
        self.record(
            "Dashboard",
            format!("Saved dashboard layout ({} widgets visible)", visible),
        );
        Ok(())
    }

    pub fn cancel_layout(&mut self) {
        self.layout.cancel();
    }

    pub fn finance_summary(&self) -> FinanceSummary {
        FinanceSummary::compute(self.projects(), self.invoices())
    }

    pub fn quick_overview(&self) -> QuickOverview {
        QuickOverview::compute(self.projects(), self.materials(), self.invoices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 22)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(Session::new("sara@des.com")).with_clock(noon)
    }

    fn cement() -> MaterialDraft {
        MaterialDraft {
            name: "Portland Cement".to_string(),
            category: "Civil".to_string(),
            quantity: "200 Bags".to_string(),
            unit_cost: "850".to_string(),
            supplier: "ABC Cement Co.".to_string(),
            project: "DHA Phase 4".to_string(),
        }
    }

    #[test]
    fn created_material_is_listed_with_its_total() {
        let mut dashboard = dashboard();
        let before = dashboard.materials().len();

        let id = dashboard.create_material(&cement()).unwrap();

        assert_eq!(dashboard.materials().len(), before + 1);
        let created = dashboard.materials().last().unwrap();
        assert_eq!(created.id, id);
        assert_eq!(created.total_cost, 170_000);
        assert_eq!(created.last_updated, noon().date());
    }

    #[test]
    fn rejected_material_leaves_store_and_log_untouched() {
        let mut dashboard = dashboard();
        let before = (dashboard.materials().len(), dashboard.audit_log().len());

        let draft = MaterialDraft {
            category: "Plumbing".to_string(),
            ..cement()
        };
        let err = dashboard.create_material(&draft).unwrap_err();

        assert!(err.has("category"));
        assert_eq!((dashboard.materials().len(), dashboard.audit_log().len()), before);
    }

    #[test]
    fn mutations_are_audited_under_the_session_user() {
        let mut dashboard = dashboard();
        dashboard.create_material(&cement()).unwrap();

        let entry = dashboard.audit_log().last().unwrap();
        assert_eq!(entry.user, "sara");
        assert_eq!(entry.module, "Materials");
        assert_eq!(entry.at, noon());
    }

    #[test]
    fn deleting_twice_is_a_no_op() {
        let mut dashboard = dashboard();
        assert!(dashboard.delete_invoice(3));
        let logged = dashboard.audit_log().len();
        assert!(!dashboard.delete_invoice(3));
        assert_eq!(dashboard.audit_log().len(), logged);
        assert!(dashboard.invoices().iter().all(|i| i.id != 3));
    }

    #[test]
    fn new_ids_never_reuse_deleted_ones() {
        let mut dashboard = dashboard();
        dashboard.delete_material(5);
        let id = dashboard.create_material(&cement()).unwrap();
        assert_eq!(id, 6);
    }

    #[test]
    fn tasks_go_to_the_chosen_project() {
        let mut dashboard = dashboard();
        let draft = TaskDraft {
            name: "Plastering".to_string(),
            assigned_to: "Ali Hassan".to_string(),
            due_date: "2025-06-10".to_string(),
            ..TaskDraft::default()
        };

        let id = dashboard.add_task(2, &draft).unwrap();

        assert_eq!(dashboard.workspace(2).unwrap().tasks.len(), 4);
        assert_eq!(dashboard.workspace(1).unwrap().tasks.len(), 3);
        assert_eq!(id, 4);
        assert!(dashboard.add_task(99, &draft).unwrap_err().has("project"));
    }

    #[test]
    fn new_projects_start_with_an_empty_workspace() {
        let mut dashboard = dashboard();
        let draft = ProjectDraft {
            name: "Canal View Towers".to_string(),
            location: "Canal Road, Lahore".to_string(),
            budget: "12,000,000".to_string(),
            start_date: "2025-07-01".to_string(),
            expected_completion: "2026-06-30".to_string(),
            site_manager_name: "Sara Ahmed".to_string(),
            ..ProjectDraft::default()
        };

        let id = dashboard.create_project(&draft).unwrap();

        assert!(dashboard.workspace(id).unwrap().tasks.is_empty());
        assert!(dashboard.delete_project(id));
        assert!(dashboard.workspace(id).is_none());
    }

    #[test]
    fn upload_creates_one_file_per_pick() {
        let mut dashboard = dashboard();
        let draft = UploadDraft {
            files: vec![
                crate::forms::FileUpload { name: "Site Plan.pdf".to_string(), size_bytes: 2048 },
                crate::forms::FileUpload { name: "Front.jpg".to_string(), size_bytes: 0 },
            ],
            project: "Mall of Lahore".to_string(),
            category: "Photos".to_string(),
        };

        let ids = dashboard.upload_files(&draft).unwrap();

        assert_eq!(ids, vec![5, 6]);
        let added = &dashboard.files()[4..];
        assert_eq!(added[0].size, "2 KB");
        assert_eq!(added[1].size, "0 Bytes");
        assert!(added.iter().all(|f| f.uploaded_by == "sara"));
    }

    #[test]
    fn duplicate_category_is_reported() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.add_category("  Plumbing ").unwrap(), "Plumbing");
        assert!(matches!(
            dashboard.add_category("Civil"),
            Err(CategoryError::Duplicate(_))
        ));
        assert_eq!(dashboard.categories().len(), 4);
    }

    #[test]
    fn layout_changes_apply_only_on_commit() {
        let mut dashboard = dashboard();

        dashboard.open_layout_editor().unwrap();
        dashboard.toggle_widget(WidgetKey::Invoices).unwrap();
        dashboard.cancel_layout();
        assert!(dashboard.layout().live().is_visible(WidgetKey::Invoices));

        dashboard.open_layout_editor().unwrap();
        dashboard.toggle_widget(WidgetKey::Invoices).unwrap();
        dashboard.commit_layout().unwrap();
        assert!(!dashboard.layout().live().is_visible(WidgetKey::Invoices));
        assert_eq!(dashboard.commit_layout(), Err(LayoutError::NotEditing));
    }

    #[test]
    fn empty_dashboard_summarises_to_zero() {
        let dashboard = Dashboard::empty(Session::new("admin@des.com"));
        assert_eq!(dashboard.finance_summary().total_budget, 0);
        assert_eq!(dashboard.quick_overview().open_invoices, 0);
    }

    #[test]
    fn huge_invoice_saturates_the_summary() {
        let mut dashboard = dashboard();
        let draft = InvoiceDraft {
            supplier: "XYZ Steel Works".to_string(),
            amount: u64::MAX.to_string(),
            project: "Mall of Lahore".to_string(),
            category: "Materials".to_string(),
            payment_method: "Cheque".to_string(),
            issue_date: "2025-05-22".to_string(),
            due_date: "2025-06-22".to_string(),
            status: "Pending".to_string(),
        };
        dashboard.create_invoice(&draft).unwrap();

        let summary = dashboard.finance_summary();
        assert_eq!(summary.pending_payments, u64::MAX);
        let materials = summary
            .expense_breakdown
            .iter()
            .find(|share| share.group == "Materials")
            .unwrap();
        assert_eq!(materials.amount, u64::MAX);
    }
}
