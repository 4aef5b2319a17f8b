use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, Tabs},
    Frame,
};

use site_admin::engine::Tagged;
use site_admin::models::{display_amount, display_date};
use site_admin::summary::{recent_transactions, FinanceSummary};
use site_admin::Dashboard;

use super::tag_color;

const RECENT_LIMIT: usize = 10;
const BAR_WIDTH: usize = 30;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FinanceTab {
    Overview,
    Expenses,
    Transactions,
}

impl FinanceTab {
    pub const ALL: [FinanceTab; 3] = [FinanceTab::Overview, FinanceTab::Expenses, FinanceTab::Transactions];

    pub fn title(&self) -> &'static str {
        match self {
            FinanceTab::Overview => "Overview",
            FinanceTab::Expenses => "Expense Breakdown",
            FinanceTab::Transactions => "Recent Transactions",
        }
    }
}

pub enum FinanceAction {
    Back,
}

pub struct FinanceState {
    tab: usize,
}

impl FinanceState {
    pub fn new() -> Self {
        Self { tab: 0 }
    }

    pub fn tab(&self) -> FinanceTab {
        FinanceTab::ALL[self.tab % FinanceTab::ALL.len()]
    }

    pub fn next_tab(&mut self) {
        self.tab = (self.tab + 1) % FinanceTab::ALL.len();
    }

    pub fn previous_tab(&mut self) {
        self.tab = (self.tab + FinanceTab::ALL.len() - 1) % FinanceTab::ALL.len();
    }
}

/// Text bar for a share in percent.
fn share_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_finance<B: Backend>(f: &mut Frame<B>, state: &mut FinanceState, dashboard: &Dashboard) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    let finance = dashboard.finance_summary();

    let mut headline = vec![
        Span::styled("Financial Overview   ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("Budget {}   ", display_amount(finance.total_budget))),
        Span::raw(format!("Spent {}   ", display_amount(finance.total_spent))),
        Span::raw(format!("Available {}   ", display_amount(finance.available_funds))),
        Span::styled(
            format!("Pending {}", display_amount(finance.pending_payments)),
            Style::default().fg(Color::Yellow),
        ),
    ];
    if finance.over_budget_projects > 0 {
        headline.push(Span::styled(
            format!("   {} project(s) over budget", finance.over_budget_projects),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(
        Paragraph::new(Spans::from(headline)).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let titles: Vec<Spans> = FinanceTab::ALL.iter().map(|tab| Spans::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(state.tab)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[1]);

    match state.tab() {
        FinanceTab::Overview => render_overview(f, &finance, chunks[2]),
        FinanceTab::Expenses => render_expenses(f, &finance, chunks[2]),
        FinanceTab::Transactions => render_transactions(f, dashboard, chunks[2]),
    }

    let help = Paragraph::new("<Tab>/<Right> Next tab | <Left> Previous tab | <Esc> Back")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    f.render_widget(help, chunks[3]);
}

fn render_overview<B: Backend>(f: &mut Frame<B>, finance: &FinanceSummary, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let months: Vec<ListItem> = finance
        .monthly_expenses
        .iter()
        .map(|month| {
            ListItem::new(Spans::from(vec![
                Span::styled(format!("{:<10}", month.group), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{:>18}", display_amount(month.amount))),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(months).block(Block::default().title("Monthly Expenses Trend").borders(Borders::ALL)),
        halves[0],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)].as_ref())
        .split(halves[1]);

    let used = finance.spent_percentage();
    let gauge = Gauge::default()
        .block(Block::default().title("Budget Utilization").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
        .ratio((used / 100.0).clamp(0.0, 1.0))
        .label(format!("{}% used", used));
    f.render_widget(gauge, right[0]);

    let details = vec![
        Spans::from(format!("Remaining:  {}", display_amount(finance.available_funds))),
        Spans::from(format!("Spent:      {}", display_amount(finance.total_spent))),
    ];
    f.render_widget(
        Paragraph::new(details).block(Block::default().borders(Borders::ALL)),
        right[1],
    );
}

fn render_expenses<B: Backend>(f: &mut Frame<B>, finance: &FinanceSummary, area: Rect) {
    let items: Vec<ListItem> = finance
        .expense_breakdown
        .iter()
        .map(|share| {
            ListItem::new(vec![
                Spans::from(vec![
                    Span::styled(format!("{:<14}", share.group), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("{:>18}", display_amount(share.amount))),
                    Span::styled(format!("  ({}%)", share.percentage), Style::default().fg(Color::Gray)),
                ]),
                Spans::from(Span::styled(
                    share_bar(share.percentage, BAR_WIDTH),
                    Style::default().fg(Color::Yellow),
                )),
            ])
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().title("Expense Categories").borders(Borders::ALL)),
        area,
    );
}

fn render_transactions<B: Backend>(f: &mut Frame<B>, dashboard: &Dashboard, area: Rect) {
    let rows = recent_transactions(dashboard.invoices(), RECENT_LIMIT)
        .into_iter()
        .map(|invoice| {
            Row::new(vec![
                Cell::from(display_date(invoice.issue_date)),
                Cell::from(invoice.code.clone()),
                Cell::from(invoice.supplier.clone()),
                Cell::from(invoice.project.clone()),
                Cell::from(display_amount(invoice.amount))
                    .style(Style::default().fg(tag_color(invoice.status.tag()))),
            ])
        });
    let header = Row::new(vec!["Date", "Invoice", "Supplier", "Project", "Amount"])
        .style(Style::default().fg(Color::Yellow))
        .bottom_margin(1);
    let widths = [
        Constraint::Percentage(18),
        Constraint::Percentage(12),
        Constraint::Percentage(28),
        Constraint::Percentage(22),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Recent Transactions").borders(Borders::ALL))
        .widths(&widths);
    f.render_widget(table, area);
}

pub fn handle_input(state: &mut FinanceState) -> Result<Option<FinanceAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Some(FinanceAction::Back)),
            KeyCode::Tab | KeyCode::Right => state.next_tab(),
            KeyCode::BackTab | KeyCode::Left => state.previous_tab(),
            _ => {}
        }
    }
    Ok(None)
}
