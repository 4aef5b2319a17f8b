mod ui;

use std::{
    fs::{self, OpenOptions},
    io,
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use serde_json::json;
use tracing::{error, info, warn};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use site_admin::config::{self, AuthMode, Config};
use site_admin::engine::{Id, Query};
use site_admin::error::{CategoryError, ValidationError};
use site_admin::forms::{
    DirectoryDraft, FormDraft, InvoiceDraft, LabourDraft, MaterialDraft, ProjectDraft, TaskDraft,
    TeamMemberDraft,
};
use site_admin::listing::{
    FileFilter, InvoiceFilter, Listing, MaterialFilter, MemberFilter, ProjectFilter,
};
use site_admin::models::{
    display_amount, DirectoryFile, Invoice, Labour, Material, Project, Task, TeamMember,
};
use site_admin::{Authenticator, Dashboard};

use crate::ui::{
    category_dialog::{
        handle_input as handle_category_input, render_category_dialog, CategoryAction,
        CategoryDialogState,
    },
    collection::{
        handle_input as handle_collection_input, render_collection, CollectionAction,
        CollectionState,
    },
    finance::{handle_input as handle_finance_input, render_finance, FinanceAction, FinanceState},
    form_wizard::{
        handle_input as handle_form_input, render_form_wizard, FormWizardAction, FormWizardState,
    },
    home::{handle_input as handle_home_input, render_home, HomeAction, HomeState, Page},
    login::{handle_input as handle_login_input, render_login, LoginAction, LoginState},
};

#[derive(Parser)]
#[command(name = "site-admin", version, about = "Construction site administration dashboard")]
struct Cli {
    /// Login check to use, overrides AUTH_MODE
    #[arg(long, value_enum, global = true)]
    auth_mode: Option<AuthModeArg>,

    /// Max log level, overrides LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AuthModeArg {
    Any,
    Fixed,
}

impl From<AuthModeArg> for AuthMode {
    fn from(arg: AuthModeArg) -> Self {
        match arg {
            AuthModeArg::Any => AuthMode::Any,
            AuthModeArg::Fixed => AuthMode::Fixed,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal dashboard (the default)
    Tui,
    /// Print the finance summary and quick overview
    Summary {
        #[command(flatten)]
        credentials: Credentials,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one collection, filtered, with its totals
    List {
        #[arg(value_enum)]
        collection: CollectionArg,
        #[command(flatten)]
        credentials: Credentials,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Credentials {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Args)]
struct FilterArgs {
    /// Status (file type for files)
    #[arg(long)]
    status: Option<String>,
    /// Category (designation for team)
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    project: Option<String>,
    /// Case-insensitive text search
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    fn project(&self) -> &str {
        self.project.as_deref().unwrap_or_default()
    }

    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CollectionArg {
    Materials,
    Invoices,
    Team,
    Files,
    Projects,
}

// Represents the current screen in the app
#[derive(Clone, Copy)]
enum AppScreen {
    Login,
    Home,
    Materials,
    Categories,
    Invoices,
    Team,
    Files,
    Projects,
    Finance,
    Tasks(Id),  // Contains project_id
    Labour(Id), // Contains project_id
    MaterialWizard,
    InvoiceWizard,
    TeamWizard,
    FileWizard,
    ProjectWizard,
    TaskWizard(Id),   // Contains project_id
    LabourWizard(Id), // Contains project_id
}

// Main application state
struct AppState {
    authenticator: Box<dyn Authenticator>,
    dashboard: Option<Dashboard>,
    screen: AppScreen,
    login_state: Option<LoginState>,
    home_state: Option<HomeState>,
    materials_state: Option<CollectionState<Material>>,
    category_state: Option<CategoryDialogState>,
    invoices_state: Option<CollectionState<Invoice>>,
    team_state: Option<CollectionState<TeamMember>>,
    files_state: Option<CollectionState<DirectoryFile>>,
    projects_state: Option<CollectionState<Project>>,
    finance_state: Option<FinanceState>,
    tasks_state: Option<CollectionState<Task>>,
    labour_state: Option<CollectionState<Labour>>,
    material_wizard_state: Option<FormWizardState<MaterialDraft>>,
    invoice_wizard_state: Option<FormWizardState<InvoiceDraft>>,
    team_wizard_state: Option<FormWizardState<TeamMemberDraft>>,
    file_wizard_state: Option<FormWizardState<DirectoryDraft>>,
    project_wizard_state: Option<FormWizardState<ProjectDraft>>,
    task_wizard_state: Option<FormWizardState<TaskDraft>>,
    labour_wizard_state: Option<FormWizardState<LabourDraft>>,
}

impl AppState {
    fn new(authenticator: Box<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            dashboard: None,
            screen: AppScreen::Login,
            login_state: Some(LoginState::new()),
            home_state: None,
            materials_state: None,
            category_state: None,
            invoices_state: None,
            team_state: None,
            files_state: None,
            projects_state: None,
            finance_state: None,
            tasks_state: None,
            labour_state: None,
            material_wizard_state: None,
            invoice_wizard_state: None,
            team_wizard_state: None,
            file_wizard_state: None,
            project_wizard_state: None,
            task_wizard_state: None,
            labour_wizard_state: None,
        }
    }

    /// Drops the session together with every page state built on it.
    fn sign_out(&mut self) {
        self.dashboard = None;
        self.screen = AppScreen::Login;
        self.login_state = Some(LoginState::new());
        self.home_state = None;
        self.materials_state = None;
        self.category_state = None;
        self.invoices_state = None;
        self.team_state = None;
        self.files_state = None;
        self.projects_state = None;
        self.finance_state = None;
        self.tasks_state = None;
        self.labour_state = None;
        self.material_wizard_state = None;
        self.invoice_wizard_state = None;
        self.team_wizard_state = None;
        self.file_wizard_state = None;
        self.project_wizard_state = None;
        self.task_wizard_state = None;
        self.labour_wizard_state = None;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, command line flags win over the environment
    let mut config = config::init()?;
    if let Some(mode) = cli.auth_mode {
        config.auth_mode = mode.into();
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    let authenticator = config.authenticator()?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            init_file_logging(&config)?;
            run_tui(authenticator)
        }
        Command::Summary { credentials, json } => {
            init_stderr_logging(&config);
            let dashboard = open_dashboard(authenticator.as_ref(), &credentials)?;
            print_summary(&dashboard, json)
        }
        Command::List {
            collection,
            credentials,
            filters,
            json,
        } => {
            init_stderr_logging(&config);
            let dashboard = open_dashboard(authenticator.as_ref(), &credentials)?;
            print_collection(&dashboard, collection, &filters, json)
        }
    }
}

fn init_stderr_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_max_level(config.max_level())
        .with_writer(io::stderr)
        .init();
}

// The terminal owns stdout, so the UI only logs when a file is configured
fn init_file_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(config.max_level())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn open_dashboard(authenticator: &dyn Authenticator, credentials: &Credentials) -> Result<Dashboard> {
    let session = authenticator
        .login(&credentials.email, &credentials.password)
        .with_context(|| format!("cannot sign in as {}", credentials.email))?;
    info!(user = %session.email, "signed in");
    Ok(Dashboard::new(session))
}

fn print_summary(dashboard: &Dashboard, as_json: bool) -> Result<()> {
    let finance = dashboard.finance_summary();
    let overview = dashboard.quick_overview();

    if as_json {
        let out = json!({
            "finance": serde_json::to_value(&finance)?,
            "overview": serde_json::to_value(overview)?,
            "layout": serde_json::to_value(dashboard.layout().live())?,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Finance");
    println!("  Total budget:        {}", display_amount(finance.total_budget));
    println!(
        "  Total spent:         {} ({}%)",
        display_amount(finance.total_spent),
        finance.spent_percentage()
    );
    println!("  Available funds:     {}", display_amount(finance.available_funds));
    println!("  Pending payments:    {}", display_amount(finance.pending_payments));
    println!("  Over budget:         {} project(s)", finance.over_budget_projects);
    println!("  Expense breakdown:");
    for share in &finance.expense_breakdown {
        println!(
            "    {:<14}{:>16}  {:>5.1}%",
            share.group,
            display_amount(share.amount),
            share.percentage
        );
    }
    println!("  Monthly expenses:");
    for month in &finance.monthly_expenses {
        println!("    {:<14}{:>16}", month.group, display_amount(month.amount));
    }
    println!();
    println!("Quick Overview");
    println!("  Active projects:     {}", overview.active_projects);
    println!("  Materials on site:   {}", overview.materials_on_site);
    println!("  Pending deliveries:  {}", overview.pending_deliveries);
    println!("  Open invoices:       {}", overview.open_invoices);
    Ok(())
}

fn print_collection(
    dashboard: &Dashboard,
    collection: CollectionArg,
    filters: &FilterArgs,
    as_json: bool,
) -> Result<()> {
    match collection {
        CollectionArg::Materials => {
            let query = Query::new()
                .filter(MaterialFilter::Status, filters.status())
                .filter(MaterialFilter::Category, filters.category())
                .filter(MaterialFilter::Project, filters.project())
                .search(filters.search());
            print_listing(dashboard.materials(), &query, as_json)
        }
        CollectionArg::Invoices => {
            let query = Query::new()
                .filter(InvoiceFilter::Status, filters.status())
                .filter(InvoiceFilter::Category, filters.category())
                .filter(InvoiceFilter::Project, filters.project())
                .search(filters.search());
            print_listing(dashboard.invoices(), &query, as_json)
        }
        CollectionArg::Team => {
            let query = Query::new()
                .filter(MemberFilter::Status, filters.status())
                .filter(MemberFilter::Designation, filters.category())
                .search(filters.search());
            print_listing(dashboard.team(), &query, as_json)
        }
        CollectionArg::Files => {
            let query = Query::new()
                .filter(FileFilter::Type, filters.status())
                .filter(FileFilter::Category, filters.category())
                .filter(FileFilter::Project, filters.project())
                .search(filters.search());
            print_listing(dashboard.files(), &query, as_json)
        }
        CollectionArg::Projects => {
            let query = Query::new()
                .filter(ProjectFilter::Status, filters.status())
                .search(filters.search());
            print_listing(dashboard.projects(), &query, as_json)
        }
    }
}

fn print_listing<T: Listing>(records: &[T], query: &Query<T::Dimension>, as_json: bool) -> Result<()> {
    let visible = query.apply(records);
    let footer = T::footer(&visible);

    if as_json {
        let totals: serde_json::Map<String, serde_json::Value> = footer
            .into_iter()
            .map(|(label, value)| (label.to_string(), value.into()))
            .collect();
        let out = json!({
            "title": T::TITLE,
            "records": serde_json::to_value(&visible)?,
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = visible.iter().map(|record| record.cells()).collect();
    let widths: Vec<usize> = T::columns()
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count()])
                .max()
                .unwrap_or_default()
        })
        .collect();
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{} ({} of {})", T::TITLE, visible.len(), records.len());
    println!("{}", line(T::columns().to_vec()));
    for row in &rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
    println!();
    for (label, value) in footer {
        println!("{}: {}", label, value);
    }
    Ok(())
}

fn run_tui(authenticator: Box<dyn Authenticator>) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(authenticator);

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("terminal ui stopped: {:#}", err);
        println!("Error: {}", err);
    }

    println!("Thanks for using Site Admin!");

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        // Render current screen
        terminal.draw(|f| {
            let dashboard = app_state.dashboard.as_ref();
            match app_state.screen {
                AppScreen::Login => {
                    if let Some(state) = &mut app_state.login_state {
                        render_login(f, state);
                    }
                }
                AppScreen::Home => {
                    if let (Some(state), Some(d)) = (&mut app_state.home_state, dashboard) {
                        render_home(f, state, d);
                    }
                }
                AppScreen::Materials => {
                    if let (Some(state), Some(d)) = (&mut app_state.materials_state, dashboard) {
                        render_collection(f, state, d.materials());
                    }
                }
                AppScreen::Categories => {
                    if let (Some(state), Some(d)) = (&mut app_state.materials_state, dashboard) {
                        render_collection(f, state, d.materials());
                    }
                    if let (Some(state), Some(d)) = (&mut app_state.category_state, dashboard) {
                        render_category_dialog(f, state, d.categories().names());
                    }
                }
                AppScreen::Invoices => {
                    if let (Some(state), Some(d)) = (&mut app_state.invoices_state, dashboard) {
                        render_collection(f, state, d.invoices());
                    }
                }
                AppScreen::Team => {
                    if let (Some(state), Some(d)) = (&mut app_state.team_state, dashboard) {
                        render_collection(f, state, d.team());
                    }
                }
                AppScreen::Files => {
                    if let (Some(state), Some(d)) = (&mut app_state.files_state, dashboard) {
                        render_collection(f, state, d.files());
                    }
                }
                AppScreen::Projects => {
                    if let (Some(state), Some(d)) = (&mut app_state.projects_state, dashboard) {
                        render_collection(f, state, d.projects());
                    }
                }
                AppScreen::Finance => {
                    if let (Some(state), Some(d)) = (&mut app_state.finance_state, dashboard) {
                        render_finance(f, state, d);
                    }
                }
                AppScreen::Tasks(project) => {
                    let workspace = dashboard.and_then(|d| d.workspace(project));
                    if let (Some(state), Some(w)) = (&mut app_state.tasks_state, workspace) {
                        render_collection(f, state, w.tasks.list());
                    }
                }
                AppScreen::Labour(project) => {
                    let workspace = dashboard.and_then(|d| d.workspace(project));
                    if let (Some(state), Some(w)) = (&mut app_state.labour_state, workspace) {
                        render_collection(f, state, w.labour.list());
                    }
                }
                AppScreen::MaterialWizard => {
                    if let Some(state) = &mut app_state.material_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
                AppScreen::InvoiceWizard => {
                    if let Some(state) = &mut app_state.invoice_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
                AppScreen::TeamWizard => {
                    if let Some(state) = &mut app_state.team_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
                AppScreen::FileWizard => {
                    if let Some(state) = &mut app_state.file_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
                AppScreen::ProjectWizard => {
                    if let Some(state) = &mut app_state.project_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
                AppScreen::TaskWizard(_) => {
                    if let Some(state) = &mut app_state.task_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
                AppScreen::LabourWizard(_) => {
                    if let Some(state) = &mut app_state.labour_wizard_state {
                        render_form_wizard(f, state);
                    }
                }
            }
        })?;

        // Handle input for current screen
        let should_quit = match app_state.screen {
            AppScreen::Login => handle_login_screen(app_state)?,
            AppScreen::Home => handle_home_screen(app_state)?,
            AppScreen::Materials => handle_materials_screen(app_state)?,
            AppScreen::Categories => handle_categories_screen(app_state)?,
            AppScreen::Invoices => handle_invoices_screen(app_state)?,
            AppScreen::Team => handle_team_screen(app_state)?,
            AppScreen::Files => handle_files_screen(app_state)?,
            AppScreen::Projects => handle_projects_screen(app_state)?,
            AppScreen::Finance => handle_finance_screen(app_state)?,
            AppScreen::Tasks(project) => handle_tasks_screen(app_state, project)?,
            AppScreen::Labour(project) => handle_labour_screen(app_state, project)?,
            AppScreen::MaterialWizard => handle_material_wizard_screen(app_state)?,
            AppScreen::InvoiceWizard => handle_invoice_wizard_screen(app_state)?,
            AppScreen::TeamWizard => handle_team_wizard_screen(app_state)?,
            AppScreen::FileWizard => handle_file_wizard_screen(app_state)?,
            AppScreen::ProjectWizard => handle_project_wizard_screen(app_state)?,
            AppScreen::TaskWizard(project) => handle_task_wizard_screen(app_state, project)?,
            AppScreen::LabourWizard(project) => handle_labour_wizard_screen(app_state, project)?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_login_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.login_state {
        match handle_login_input(state)? {
            Some(LoginAction::Exit) => {
                return Ok(true);
            }
            Some(LoginAction::Submit { email, password }) => {
                match app_state.authenticator.login(&email, &password) {
                    Ok(session) => {
                        info!(user = %session.email, "signed in");
                        app_state.dashboard = Some(Dashboard::new(session));
                        app_state.login_state = None;
                        app_state.home_state = Some(HomeState::new());
                        app_state.screen = AppScreen::Home;
                    }
                    Err(err) => {
                        warn!(%email, "sign in failed");
                        state.reject(err.to_string());
                    }
                }
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_home_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.home_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_home_input(state)? {
        Some(HomeAction::Logout) => {
            info!("signed out");
            app_state.sign_out();
        }
        Some(HomeAction::Open(page)) => open_page(app_state, page),
        Some(HomeAction::OpenEditor) => match dashboard.open_layout_editor() {
            Ok(_) => state.editor_opened(),
            Err(err) => warn!(%err, "cannot open layout editor"),
        },
        Some(HomeAction::ToggleWidget(key)) => {
            if let Err(err) = dashboard.toggle_widget(key) {
                warn!(%err, "cannot toggle {}", key);
            }
        }
        Some(HomeAction::CommitLayout) => {
            if let Err(err) = dashboard.commit_layout() {
                warn!(%err, "cannot save layout");
            }
            state.editor_closed();
        }
        Some(HomeAction::CancelLayout) => {
            dashboard.cancel_layout();
            state.editor_closed();
        }
        None => {}
    }

    Ok(false)
}

fn open_page(app_state: &mut AppState, page: Page) {
    app_state.screen = match page {
        Page::Materials => {
            app_state.materials_state.get_or_insert_with(materials_page);
            AppScreen::Materials
        }
        Page::Invoices => {
            app_state.invoices_state.get_or_insert_with(CollectionState::new);
            AppScreen::Invoices
        }
        Page::Team => {
            app_state.team_state.get_or_insert_with(CollectionState::new);
            AppScreen::Team
        }
        Page::Files => {
            app_state.files_state.get_or_insert_with(CollectionState::new);
            AppScreen::Files
        }
        Page::Projects => {
            app_state.projects_state.get_or_insert_with(|| {
                CollectionState::new()
                    .with_extra_key('t', "Tasks")
                    .with_extra_key('l', "Labour")
                    .with_extra_key('m', "Materials")
            });
            AppScreen::Projects
        }
        Page::Finance => {
            app_state.finance_state.get_or_insert_with(FinanceState::new);
            AppScreen::Finance
        }
    };
}

fn materials_page() -> CollectionState<Material> {
    CollectionState::new().with_extra_key('c', "Categories")
}

fn handle_materials_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.materials_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_collection_input(state, dashboard.materials())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Home,
        Some(CollectionAction::New) => {
            app_state.material_wizard_state = Some(FormWizardState::new());
            app_state.screen = AppScreen::MaterialWizard;
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_material(id);
        }
        Some(CollectionAction::Extra('c', _)) => {
            app_state.category_state = Some(CategoryDialogState::new());
            app_state.screen = AppScreen::Categories;
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

fn handle_categories_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.category_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_category_input(state)? {
        Some(CategoryAction::Close) => {
            app_state.category_state = None;
            app_state.screen = AppScreen::Materials;
        }
        Some(CategoryAction::Add(name)) => match dashboard.add_category(&name) {
            Ok(added) => {
                info!(category = %added, "category added");
                state.accepted();
            }
            Err(CategoryError::Duplicate(_)) => {
                state.error = Some(format!("Category \"{}\" already exists", name.trim()));
            }
            Err(CategoryError::Invalid(err)) => {
                state.error = err.errors().first().map(|e| e.message.clone());
            }
        },
        None => {}
    }

    Ok(false)
}

fn handle_invoices_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.invoices_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_collection_input(state, dashboard.invoices())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Home,
        Some(CollectionAction::New) => {
            app_state.invoice_wizard_state = Some(FormWizardState::new());
            app_state.screen = AppScreen::InvoiceWizard;
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_invoice(id);
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

fn handle_team_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.team_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_collection_input(state, dashboard.team())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Home,
        Some(CollectionAction::New) => {
            app_state.team_wizard_state = Some(FormWizardState::new());
            app_state.screen = AppScreen::TeamWizard;
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_team_member(id);
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

fn handle_files_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.files_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_collection_input(state, dashboard.files())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Home,
        Some(CollectionAction::New) => {
            app_state.file_wizard_state = Some(FormWizardState::new());
            app_state.screen = AppScreen::FileWizard;
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_file(id);
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

fn handle_projects_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.projects_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    match handle_collection_input(state, dashboard.projects())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Home,
        Some(CollectionAction::New) => {
            app_state.project_wizard_state = Some(FormWizardState::new());
            app_state.screen = AppScreen::ProjectWizard;
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_project(id);
        }
        Some(CollectionAction::Extra('t', Some(id))) => {
            let name = project_name(dashboard, id);
            app_state.tasks_state =
                Some(CollectionState::new().with_title(format!("Tasks - {}", name)));
            app_state.screen = AppScreen::Tasks(id);
        }
        Some(CollectionAction::Extra('m', Some(id))) => {
            let name = project_name(dashboard, id);
            app_state.materials_state =
                Some(materials_page().with_filter(MaterialFilter::Project, &name));
            app_state.screen = AppScreen::Materials;
        }
        Some(CollectionAction::Extra('l', Some(id))) => {
            let name = project_name(dashboard, id);
            app_state.labour_state =
                Some(CollectionState::new().with_title(format!("Labour - {}", name)));
            app_state.screen = AppScreen::Labour(id);
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

fn handle_finance_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.finance_state {
        match handle_finance_input(state)? {
            Some(FinanceAction::Back) => app_state.screen = AppScreen::Home,
            None => {}
        }
    }

    Ok(false)
}

fn project_name(dashboard: &Dashboard, project: Id) -> String {
    dashboard
        .project(project)
        .map(|p| p.name.clone())
        .unwrap_or_default()
}

fn handle_tasks_screen(app_state: &mut AppState, project: Id) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.tasks_state, &mut app_state.dashboard) else {
        return Ok(false);
    };
    let Some(workspace) = dashboard.workspace(project) else {
        app_state.screen = AppScreen::Projects;
        return Ok(false);
    };

    match handle_collection_input(state, workspace.tasks.list())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Projects,
        Some(CollectionAction::New) => {
            let wizard = FormWizardState::new().with_context(project_name(dashboard, project));
            app_state.task_wizard_state = Some(wizard);
            app_state.screen = AppScreen::TaskWizard(project);
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_task(project, id);
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

fn handle_labour_screen(app_state: &mut AppState, project: Id) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.labour_state, &mut app_state.dashboard) else {
        return Ok(false);
    };
    let Some(workspace) = dashboard.workspace(project) else {
        app_state.screen = AppScreen::Projects;
        return Ok(false);
    };

    match handle_collection_input(state, workspace.labour.list())? {
        Some(CollectionAction::Back) => app_state.screen = AppScreen::Projects,
        Some(CollectionAction::New) => {
            let wizard = FormWizardState::new().with_context(project_name(dashboard, project));
            app_state.labour_wizard_state = Some(wizard);
            app_state.screen = AppScreen::LabourWizard(project);
        }
        Some(CollectionAction::Delete(id)) => {
            dashboard.delete_labour(project, id);
        }
        Some(CollectionAction::Extra(..)) | None => {}
    }

    Ok(false)
}

/// Feeds one key press to a create form. A submitted draft goes to `submit`; when that
/// rejects it the form stays open with the messages. Returns true once the form closes.
fn drive_wizard<D: FormDraft + Clone>(
    state: &mut FormWizardState<D>,
    submit: impl FnOnce(&D) -> Result<(), ValidationError>,
) -> Result<bool> {
    match handle_form_input(state)? {
        Some(FormWizardAction::Cancel) => Ok(true),
        Some(FormWizardAction::Submit(draft)) => match submit(&draft) {
            Ok(()) => Ok(true),
            Err(errors) => {
                state.show_errors(errors);
                Ok(false)
            }
        },
        None => Ok(false),
    }
}

fn handle_material_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.material_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    if drive_wizard(state, |draft| dashboard.create_material(draft).map(|_| ()))? {
        app_state.material_wizard_state = None;
        app_state.screen = AppScreen::Materials;
    }

    Ok(false)
}

fn handle_invoice_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.invoice_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    if drive_wizard(state, |draft| dashboard.create_invoice(draft).map(|_| ()))? {
        app_state.invoice_wizard_state = None;
        app_state.screen = AppScreen::Invoices;
    }

    Ok(false)
}

fn handle_team_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.team_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    if drive_wizard(state, |draft| dashboard.create_team_member(draft).map(|_| ()))? {
        app_state.team_wizard_state = None;
        app_state.screen = AppScreen::Team;
    }

    Ok(false)
}

/// Size of a regular file on disk; the upload form only records name and size.
fn probe_file_size(path: &str) -> Option<u64> {
    fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
}

fn handle_file_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.file_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    let closed = drive_wizard(state, |draft| {
        let upload = draft.to_upload(probe_file_size)?;
        dashboard.upload_files(&upload).map(|_| ())
    })?;
    if closed {
        app_state.file_wizard_state = None;
        app_state.screen = AppScreen::Files;
    }

    Ok(false)
}

fn handle_project_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.project_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    if drive_wizard(state, |draft| dashboard.create_project(draft).map(|_| ()))? {
        app_state.project_wizard_state = None;
        app_state.screen = AppScreen::Projects;
    }

    Ok(false)
}

fn handle_task_wizard_screen(app_state: &mut AppState, project: Id) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.task_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    if drive_wizard(state, |draft| dashboard.add_task(project, draft).map(|_| ()))? {
        app_state.task_wizard_state = None;
        app_state.screen = AppScreen::Tasks(project);
    }

    Ok(false)
}

fn handle_labour_wizard_screen(app_state: &mut AppState, project: Id) -> Result<bool> {
    let (Some(state), Some(dashboard)) = (&mut app_state.labour_wizard_state, &mut app_state.dashboard) else {
        return Ok(false);
    };

    if drive_wizard(state, |draft| dashboard.add_labour(project, draft).map(|_| ()))? {
        app_state.labour_wizard_state = None;
        app_state.screen = AppScreen::Labour(project);
    }

    Ok(false)
}
