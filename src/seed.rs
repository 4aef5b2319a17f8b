//! Demo records the dashboard starts with.

use chrono::{NaiveDate, NaiveDateTime};

use crate::categories::CategoryRegistry;
use crate::models::{
    invoice_code, AuditEntry, Designation, DirectoryFile, FileType, Invoice, InvoiceStatus, Labour,
    Material, MaterialStatus, MemberStatus, PaymentMethod, Project, ProjectStatus, SiteManager, Task,
    TaskStatus, TeamMember,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn categories() -> CategoryRegistry {
    CategoryRegistry::default()
}

pub fn projects() -> Vec<Project> {
    let project = |id, name: &str, status, progress, start, end, manager: &str, budget, spent, location: &str| Project {
        id,
        name: name.to_string(),
        status,
        progress,
        start_date: start,
        expected_completion: end,
        site_manager: SiteManager {
            name: manager.to_string(),
            initials: crate::forms::initials(manager),
        },
        budget,
        spent,
        location: location.to_string(),
        description: None,
    };
    vec![
        project(
            1,
            "DHA Phase 4 Commercial Plaza",
            ProjectStatus::InProgress,
            35,
            day(2025, 3, 15),
            day(2025, 12, 30),
            "Sara Ahmed",
            15_000_000,
            5_250_000,
            "DHA Phase 4, Lahore",
        ),
        project(
            2,
            "Mall of Lahore",
            ProjectStatus::Planning,
            10,
            day(2025, 6, 1),
            day(2026, 3, 30),
            "Ahmed Hassan",
            25_000_000,
            2_500_000,
            "Gulberg, Lahore",
        ),
        project(
            3,
            "Wild Zoo Complex",
            ProjectStatus::InProgress,
            60,
            day(2025, 1, 10),
            day(2025, 8, 15),
            "Fatima Khan",
            8_000_000,
            4_800_000,
            "Safari Park, Lahore",
        ),
    ]
}

pub fn materials() -> Vec<Material> {
    let material = |id, name: &str, category: &str, qty: &str, unit_cost, total_cost, status, updated, project: &str, supplier: &str| Material {
        id,
        name: name.to_string(),
        category: category.to_string(),
        assigned_qty: qty.to_string(),
        unit_cost,
        total_cost,
        status,
        project: project.to_string(),
        supplier: supplier.to_string(),
        last_updated: updated,
    };
    vec![
        material(1, "Portland Cement", "Civil", "200 Bags", 850, 170_000, MaterialStatus::OnSite, day(2025, 5, 21), "DHA Phase 4", "ABC Cement Co."),
        material(2, "Red Clay Bricks", "Civil", "5,000 Pcs", 15, 75_000, MaterialStatus::InWarehouse, day(2025, 5, 20), "Mall of Lahore", "Elite Brick Company"),
        material(3, "Copper Wires", "Electrical", "10 Rolls", 1200, 12_000, MaterialStatus::OnTheWay, day(2025, 5, 20), "Wild Zoo Complex", "XYZ Electric"),
        material(4, "Exterior Paint", "Finishing", "50 Cans", 900, 45_000, MaterialStatus::OnSite, day(2025, 5, 18), "DHA Phase 4", "Color Master"),
        material(5, "Steel Rebars", "Civil", "100 Pieces", 2500, 250_000, MaterialStatus::InWarehouse, day(2025, 5, 19), "Mall of Lahore", "Steel Works Ltd"),
    ]
}

pub fn invoices() -> Vec<Invoice> {
    let invoice = |id, supplier: &str, amount, status, due, issued, project: &str, category: &str, method| Invoice {
        id,
        code: invoice_code(id),
        supplier: supplier.to_string(),
        amount,
        status,
        due_date: due,
        issue_date: issued,
        project: project.to_string(),
        category: category.to_string(),
        payment_method: method,
    };
    vec![
        invoice(1, "ABC Cement Suppliers", 170_000, InvoiceStatus::Paid, day(2025, 5, 25), day(2025, 5, 15), "DHA Phase 4", "Materials", PaymentMethod::BankTransfer),
        invoice(2, "XYZ Steel Works", 450_000, InvoiceStatus::Pending, day(2025, 5, 28), day(2025, 5, 18), "Mall of Lahore", "Materials", PaymentMethod::Cheque),
        invoice(3, "Elite Brick Company", 75_000, InvoiceStatus::Overdue, day(2025, 5, 20), day(2025, 5, 10), "Wild Zoo Complex", "Materials", PaymentMethod::Cash),
        invoice(4, "Power Electric Solutions", 125_000, InvoiceStatus::Pending, day(2025, 6, 1), day(2025, 5, 22), "DHA Phase 4", "Electrical", PaymentMethod::BankTransfer),
        invoice(5, "Color Master Paints", 65_000, InvoiceStatus::Draft, day(2025, 6, 5), day(2025, 5, 23), "Mall of Lahore", "Finishing", PaymentMethod::Cheque),
    ]
}

pub fn team() -> Vec<TeamMember> {
    let member = |id, name: &str, designation, phone: &str, joined, projects: &[&str], tasks: &[&str], experience: &str, location: &str| TeamMember {
        id,
        name: name.to_string(),
        designation,
        phone: phone.to_string(),
        email: format!("{}@des.com", name.to_lowercase().replace(' ', ".")),
        join_date: joined,
        assigned_projects: projects.iter().map(|p| p.to_string()).collect(),
        current_tasks: tasks.iter().map(|t| t.to_string()).collect(),
        status: MemberStatus::Active,
        experience: experience.to_string(),
        location: location.to_string(),
    };
    vec![
        member(1, "Sara Ahmed", Designation::SiteManager, "+92 300 1234567", day(2024, 1, 15), &["DHA Phase 4 Commercial Plaza"], &["Site supervision", "Material coordination"], "8 years", "DHA Phase 4, Lahore"),
        member(2, "Ahmed Hassan", Designation::SiteManager, "+92 301 9876543", day(2024, 3, 10), &["Mall of Lahore"], &["Project planning", "Team coordination"], "6 years", "Gulberg, Lahore"),
        member(3, "Fatima Khan", Designation::SiteManager, "+92 302 5555666", day(2023, 12, 5), &["Wild Zoo Complex"], &["Quality control", "Safety management"], "10 years", "Safari Park, Lahore"),
        member(4, "Muhammad Ali", Designation::Labour, "+92 303 7777888", day(2024, 2, 20), &["DHA Phase 4 Commercial Plaza"], &["Construction work", "Material handling"], "4 years", "DHA Phase 4, Lahore"),
        member(5, "Zain Malik", Designation::Labour, "+92 304 9999000", day(2024, 4, 8), &["Mall of Lahore"], &["Electrical work", "Installation"], "3 years", "Gulberg, Lahore"),
        member(6, "Hassan Raza", Designation::Engineer, "+92 305 1111222", day(2024, 1, 2), &["Wild Zoo Complex", "DHA Phase 4 Commercial Plaza"], &["Design review", "Technical supervision"], "7 years", "Head Office, Lahore"),
    ]
}

pub fn files() -> Vec<DirectoryFile> {
    let file = |id, name: &str, file_type, size: &str, project: &str, by: &str, date, category: &str| DirectoryFile {
        id,
        name: name.to_string(),
        file_type,
        size: size.to_string(),
        project: project.to_string(),
        category: category.to_string(),
        uploaded_by: by.to_string(),
        upload_date: date,
    };
    vec![
        file(1, "Project Blueprint.pdf", FileType::Pdf, "2.5 MB", "DHA Phase 4", "Sara Ahmed", day(2025, 5, 21), "Blueprint"),
        file(2, "Material Invoice.xlsx", FileType::Excel, "1.2 MB", "Mall of Lahore", "Ahmed Hassan", day(2025, 5, 20), "Invoice"),
        file(3, "Site Photos.zip", FileType::Archive, "15.3 MB", "Wild Zoo Complex", "Fatima Khan", day(2025, 5, 19), "Photos"),
        file(4, "Contract Agreement.pdf", FileType::Pdf, "892 KB", "DHA Phase 4", "Admin", day(2025, 5, 18), "Contract"),
    ]
}

/// Starting task list of a seeded project.
pub fn tasks() -> Vec<Task> {
    let task = |id, name: &str, status, assigned: &str, due, description: &str| Task {
        id,
        name: name.to_string(),
        description: description.to_string(),
        assigned_to: assigned.to_string(),
        due_date: due,
        status,
    };
    vec![
        task(1, "Foundation Work", TaskStatus::Completed, "Ali Hassan", day(2025, 3, 20), "Complete foundation work"),
        task(2, "Wall Construction", TaskStatus::InProgress, "Sara Ahmed", day(2025, 4, 15), "Build main walls"),
        task(3, "Electrical Wiring", TaskStatus::Pending, "Ahmed Khan", day(2025, 5, 10), "Install electrical systems"),
    ]
}

/// Starting crew of a seeded project.
pub fn labour() -> Vec<Labour> {
    let worker = |id, name: &str, role: &str, contact: &str, daily_rate| Labour {
        id,
        name: name.to_string(),
        role: role.to_string(),
        contact: contact.to_string(),
        daily_rate,
    };
    vec![
        worker(1, "Ali Hassan", "Mason", "+92 300 1234567", 2500),
        worker(2, "Ahmed Khan", "Electrician", "+92 301 2345678", 3000),
        worker(3, "Fatima Ali", "Plumber", "+92 302 3456789", 2800),
    ]
}

pub fn audit_log() -> Vec<AuditEntry> {
    let entry = |when, user: &str, module: &str, action: &str| AuditEntry {
        at: when,
        user: user.to_string(),
        module: module.to_string(),
        action: action.to_string(),
    };
    vec![
        entry(at(day(2025, 5, 21), 16, 20), "Sara", "Labour", "Marked 8 workers present on Wild Zoo site"),
        entry(at(day(2025, 5, 21), 17, 44), "Ahsan", "Projects", "Created new project: Mall of Lahore"),
        entry(at(day(2025, 5, 22), 9, 58), "Kamran", "Finance", "Added invoice: Rs. 75,000 from ABC Bricks Supplier"),
        entry(at(day(2025, 5, 22), 10, 12), "Sara", "Inventory", "Updated material status: 100 Bricks → On Site"),
        entry(at(day(2025, 5, 22), 10, 15), "Ali", "Materials", "Assigned 200 Cement bags to DHA Phase 4"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::parse_quantity;

    #[test]
    fn seeded_material_totals_follow_the_formula() {
        for material in materials() {
            let quantity = parse_quantity(&material.assigned_qty).unwrap();
            assert_eq!(material.total_cost, material.unit_cost * quantity, "{}", material.name);
        }
    }

    #[test]
    fn seeded_file_types_match_their_names() {
        for file in files() {
            assert_eq!(file.file_type, FileType::from_file_name(&file.name));
        }
    }

    #[test]
    fn seeded_materials_use_registered_categories() {
        let registry = categories();
        assert!(materials().iter().all(|m| registry.contains(&m.category)));
    }

    #[test]
    fn seeded_projects_are_within_budget() {
        assert!(projects().iter().all(|p| !p.is_over_budget()));
    }
}
