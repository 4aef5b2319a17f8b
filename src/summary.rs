//! Headline numbers for the finance page and the Quick Overview card.

use serde::Serialize;

use crate::engine::{Aggregator, GroupShare};
use crate::models::{Invoice, Material, MaterialStatus, Project, ProjectStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub total_budget: u64,
    pub total_spent: u64,
    pub available_funds: u64,
    /// Pending and overdue invoice amounts.
    pub pending_payments: u64,
    pub over_budget_projects: usize,
    /// Invoice amounts by invoice category.
    pub expense_breakdown: Vec<GroupShare>,
    /// Invoice amounts by issue month ("May 2025"), oldest month first.
    pub monthly_expenses: Vec<GroupShare>,
}

impl FinanceSummary {
    pub fn compute(projects: &[Project], invoices: &[Invoice]) -> Self {
        let budgets = Aggregator::new(projects);
        let bills = Aggregator::new(invoices);

        let total_budget = budgets.sum(|p| p.budget);
        let total_spent = budgets.sum(|p| p.spent);

        Self {
            total_budget,
            total_spent,
            available_funds: total_budget.saturating_sub(total_spent),
            pending_payments: bills.sum_where(|i| i.status.is_outstanding(), |i| i.amount),
            over_budget_projects: budgets.count_where(Project::is_over_budget),
            expense_breakdown: bills.group_percentages(|i| i.category.as_str(), |i| i.amount),
            monthly_expenses: monthly_expenses(invoices_by_issue_date(invoices)),
        }
    }

    /// Share of the total budget already spent, in percent.
    pub fn spent_percentage(&self) -> f64 {
        if self.total_budget == 0 {
            return 0.0;
        }
        crate::engine::round_one_decimal(100.0 * self.total_spent as f64 / self.total_budget as f64)
    }
}

fn invoices_by_issue_date(invoices: &[Invoice]) -> Vec<&Invoice> {
    let mut sorted: Vec<&Invoice> = invoices.iter().collect();
    sorted.sort_by_key(|i| (i.issue_date, i.id));
    sorted
}

fn monthly_expenses(chronological: Vec<&Invoice>) -> Vec<GroupShare> {
    Aggregator::new(chronological)
        .group_percentages(|i| i.issue_date.format("%b %Y").to_string(), |i| i.amount)
}

/// The `limit` most recently issued invoices, newest first.
pub fn recent_transactions(invoices: &[Invoice], limit: usize) -> Vec<&Invoice> {
    let mut recent = invoices_by_issue_date(invoices);
    recent.reverse();
    recent.truncate(limit);
    recent
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickOverview {
    pub active_projects: usize,
    pub materials_on_site: usize,
    pub pending_deliveries: usize,
    pub open_invoices: usize,
}

impl QuickOverview {
    pub fn compute(projects: &[Project], materials: &[Material], invoices: &[Invoice]) -> Self {
        let materials = Aggregator::new(materials);
        Self {
            active_projects: Aggregator::new(projects)
                .count_where(|p| p.status == ProjectStatus::InProgress),
            materials_on_site: materials.count_where(|m| m.status == MaterialStatus::OnSite),
            pending_deliveries: materials.count_where(|m| m.status == MaterialStatus::OnTheWay),
            open_invoices: Aggregator::new(invoices).count_where(|i| i.status.is_outstanding()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::seed;

    #[test]
    fn finance_summary_of_seed_data() {
        let summary = FinanceSummary::compute(&seed::projects(), &seed::invoices());
        assert_eq!(summary.total_budget, 48_000_000);
        assert_eq!(summary.total_spent, 12_550_000);
        assert_eq!(summary.available_funds, 35_450_000);
        assert_eq!(summary.pending_payments, 650_000);
        assert_eq!(summary.over_budget_projects, 0);

        let groups: Vec<&str> = summary.expense_breakdown.iter().map(|s| s.group.as_str()).collect();
        assert_eq!(groups, vec!["Materials", "Electrical", "Finishing"]);
        assert_eq!(summary.expense_breakdown[0].amount, 695_000);
        assert_eq!(summary.expense_breakdown[0].percentage, 78.5);
    }

    #[test]
    fn monthly_expenses_follow_the_issue_month() {
        let mut invoices = seed::invoices();
        invoices[0].issue_date = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
        invoices[2].issue_date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

        let summary = FinanceSummary::compute(&[], &invoices);

        let months: Vec<(&str, u64)> = summary
            .monthly_expenses
            .iter()
            .map(|s| (s.group.as_str(), s.amount))
            .collect();
        assert_eq!(
            months,
            vec![("Mar 2025", 75_000), ("Apr 2025", 170_000), ("May 2025", 640_000)]
        );
        assert_eq!(summary.monthly_expenses[2].percentage, 72.3);
    }

    #[test]
    fn recent_transactions_are_newest_first() {
        let invoices = seed::invoices();
        let ids: Vec<u64> = recent_transactions(&invoices, 3).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5, 4, 2]);
        assert!(recent_transactions(&[], 3).is_empty());
    }

    #[test]
    fn overspent_projects_are_counted_not_rejected() {
        let mut projects = seed::projects();
        projects[2].spent = projects[2].budget + 1;
        let summary = FinanceSummary::compute(&projects, &[]);
        assert_eq!(summary.over_budget_projects, 1);
        assert_eq!(summary.pending_payments, 0);
        assert!(summary.expense_breakdown.is_empty());
    }

    #[test]
    fn empty_dashboard_has_zero_summary() {
        let summary = FinanceSummary::compute(&[], &[]);
        assert_eq!(summary.available_funds, 0);
        assert_eq!(summary.spent_percentage(), 0.0);
    }

    #[test]
    fn quick_overview_of_seed_data() {
        let overview =
            QuickOverview::compute(&seed::projects(), &seed::materials(), &seed::invoices());
        assert_eq!(
            overview,
            QuickOverview {
                active_projects: 2,
                materials_on_site: 2,
                pending_deliveries: 1,
                open_invoices: 3,
            }
        );
    }
}
