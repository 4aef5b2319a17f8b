use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use site_admin::engine::{Aggregator, Tagged, WidgetKey};
use site_admin::models::{display_amount, MaterialStatus};
use site_admin::Dashboard;

use super::tag_color;

/// Pages reachable from the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Materials,
    Invoices,
    Team,
    Files,
    Projects,
    Finance,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Materials,
        Page::Invoices,
        Page::Team,
        Page::Files,
        Page::Projects,
        Page::Finance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Materials => "Materials",
            Page::Invoices => "Invoices",
            Page::Team => "Team",
            Page::Files => "Directory",
            Page::Projects => "Projects",
            Page::Finance => "Finance",
        }
    }

    pub fn hotkey(&self) -> char {
        match self {
            Page::Materials => '1',
            Page::Invoices => '2',
            Page::Team => '3',
            Page::Files => '4',
            Page::Projects => '5',
            Page::Finance => '6',
        }
    }
}

pub enum HomeAction {
    Logout,
    Open(Page),
    OpenEditor,
    ToggleWidget(WidgetKey),
    CommitLayout,
    CancelLayout,
}

pub struct HomeState {
    /// Highlighted row of the layout editor while it is open.
    editor: Option<ListState>,
}

impl HomeState {
    pub fn new() -> Self {
        Self { editor: None }
    }

    pub fn editor_opened(&mut self) {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        self.editor = Some(list_state);
    }

    pub fn editor_closed(&mut self) {
        self.editor = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn next(&mut self) {
        if let Some(list_state) = &mut self.editor {
            list_state.select(super::next_index(list_state.selected(), WidgetKey::ALL.len()));
        }
    }

    pub fn previous(&mut self) {
        if let Some(list_state) = &mut self.editor {
            list_state.select(super::previous_index(list_state.selected(), WidgetKey::ALL.len()));
        }
    }

    pub fn selected_widget(&self) -> Option<WidgetKey> {
        self.editor
            .as_ref()
            .and_then(|list_state| list_state.selected())
            .and_then(|i| WidgetKey::ALL.get(i).copied())
    }
}

pub fn render_home<B: Backend>(f: &mut Frame<B>, state: &mut HomeState, dashboard: &Dashboard) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(3)].as_ref())
        .split(size);

    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Site Admin Dashboard", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("   Welcome, {}", dashboard.session().name)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let widgets = dashboard.layout().live().visible_widgets();
    if widgets.is_empty() {
        let empty = Paragraph::new("Every card is hidden. Press E to customize the dashboard.")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
    } else {
        let rows: Vec<&[WidgetKey]> = widgets.chunks(2).collect();
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                rows.iter()
                    .map(|_| Constraint::Ratio(1, rows.len() as u32))
                    .collect::<Vec<_>>(),
            )
            .split(chunks[1]);
        for (row, area) in rows.iter().zip(row_areas.iter()) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    row.iter()
                        .map(|_| Constraint::Ratio(1, row.len() as u32))
                        .collect::<Vec<_>>(),
                )
                .split(*area);
            for (key, cell) in row.iter().zip(cells.iter()) {
                render_card(f, *key, dashboard, *cell);
            }
        }
    }

    let quick_keys: Vec<String> = Page::ALL
        .iter()
        .map(|page| format!("<{}> {}", page.hotkey(), page.label()))
        .collect();
    let help = Paragraph::new(format!("{} | <E> Customize | <Esc> Log out", quick_keys.join(" | ")))
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    f.render_widget(help, chunks[2]);

    if state.is_editing() {
        render_layout_editor(f, state, dashboard, size);
    }
}

fn card(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL)
}

fn render_card<B: Backend>(f: &mut Frame<B>, key: WidgetKey, dashboard: &Dashboard, area: Rect) {
    let title = key.as_str().trim_end_matches(" Card");
    match key {
        WidgetKey::ProjectInfo => {
            let rows = dashboard.projects().iter().map(|project| {
                Row::new(vec![
                    Cell::from(project.name.clone()),
                    Cell::from(project.status.to_string())
                        .style(Style::default().fg(tag_color(project.status.tag()))),
                    Cell::from(format!("{}%", project.progress)),
                    Cell::from(project.site_manager.name.clone()),
                ])
            });
            let widths = [
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(15),
                Constraint::Percentage(25),
            ];
            let header = Row::new(vec!["Project", "Status", "Progress", "Site Manager"])
                .style(Style::default().fg(Color::Yellow));
            let table = Table::new(rows).header(header).block(card(title)).widths(&widths);
            f.render_widget(table, area);
        }
        WidgetKey::MaterialStatus => {
            let materials = Aggregator::new(dashboard.materials());
            let items: Vec<ListItem> = MaterialStatus::ALL
                .iter()
                .map(|status| {
                    let count = materials.count_where(|m| m.status == *status);
                    ListItem::new(Spans::from(vec![
                        Span::styled(
                            format!("{:<14}", status.as_str()),
                            Style::default().fg(tag_color(status.tag())),
                        ),
                        Span::raw(format!("{} item(s)", count)),
                    ]))
                })
                .collect();
            f.render_widget(List::new(items).block(card(title)), area);
        }
        WidgetKey::AuditLogs => {
            let items: Vec<ListItem> = dashboard
                .audit_log()
                .iter()
                .rev()
                .map(|entry| {
                    ListItem::new(Spans::from(vec![
                        Span::styled(entry.timestamp(), Style::default().fg(Color::Gray)),
                        Span::raw(format!("  {} ", entry.user)),
                        Span::styled(format!("[{}] ", entry.module), Style::default().fg(Color::Cyan)),
                        Span::raw(entry.action.clone()),
                    ]))
                })
                .collect();
            f.render_widget(List::new(items).block(card(title)), area);
        }
        WidgetKey::QuickOverview => {
            let overview = dashboard.quick_overview();
            let finance = dashboard.finance_summary();
            let lines = vec![
                Spans::from(format!("Active projects:      {}", overview.active_projects)),
                Spans::from(format!("Materials on site:    {}", overview.materials_on_site)),
                Spans::from(format!("Pending deliveries:   {}", overview.pending_deliveries)),
                Spans::from(format!("Open invoices:        {}", overview.open_invoices)),
                Spans::from(""),
                Spans::from(format!("Total budget:         {}", display_amount(finance.total_budget))),
                Spans::from(format!(
                    "Spent:                {} ({}%)",
                    display_amount(finance.total_spent),
                    finance.spent_percentage()
                )),
                Spans::from(format!("Available funds:      {}", display_amount(finance.available_funds))),
            ];
            f.render_widget(Paragraph::new(lines).block(card(title)), area);
        }
        WidgetKey::QuickActions => {
            let mut lines: Vec<Spans> = Page::ALL
                .iter()
                .map(|page| Spans::from(format!("[{}] Open {}", page.hotkey(), page.label())))
                .collect();
            lines.push(Spans::from("[e] Customize dashboard"));
            f.render_widget(Paragraph::new(lines).block(card(title)), area);
        }
        WidgetKey::Invoices => {
            let finance = dashboard.finance_summary();
            let mut items = vec![ListItem::new(Spans::from(vec![
                Span::raw("Pending payments: "),
                Span::styled(
                    display_amount(finance.pending_payments),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))];
            items.extend(
                dashboard
                    .invoices()
                    .iter()
                    .filter(|invoice| invoice.status.is_outstanding())
                    .map(|invoice| {
                        ListItem::new(Spans::from(vec![
                            Span::raw(format!("{}  {:<26}", invoice.code, invoice.supplier)),
                            Span::styled(
                                format!("{:>12}  {}", display_amount(invoice.amount), invoice.status),
                                Style::default().fg(tag_color(invoice.status.tag())),
                            ),
                        ]))
                    }),
            );
            f.render_widget(List::new(items).block(card(title)), area);
        }
    }
}

fn render_layout_editor<B: Backend>(
    f: &mut Frame<B>,
    state: &mut HomeState,
    dashboard: &Dashboard,
    size: Rect,
) {
    let Some(draft) = dashboard.layout().draft() else {
        return;
    };
    let Some(list_state) = &mut state.editor else {
        return;
    };

    let area = super::centered_rect(50, 50, size);
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = WidgetKey::ALL
        .iter()
        .map(|key| {
            let mark = if draft.is_visible(*key) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, key))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title("Customize Dashboard - Space toggle | S save | Esc cancel")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_stateful_widget(list, area, list_state);
}

pub fn handle_input(state: &mut HomeState) -> Result<Option<HomeAction>> {
    if let Event::Key(key) = event::read()? {
        if state.is_editing() {
            match key.code {
                KeyCode::Esc => return Ok(Some(HomeAction::CancelLayout)),
                KeyCode::Char('s') => return Ok(Some(HomeAction::CommitLayout)),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(widget) = state.selected_widget() {
                        return Ok(Some(HomeAction::ToggleWidget(widget)));
                    }
                }
                KeyCode::Down => state.next(),
                KeyCode::Up => state.previous(),
                _ => {}
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Some(HomeAction::Logout)),
            KeyCode::Char('e') => return Ok(Some(HomeAction::OpenEditor)),
            KeyCode::Char(c) => {
                if let Some(page) = Page::ALL.iter().find(|page| page.hotkey() == c) {
                    return Ok(Some(HomeAction::Open(*page)));
                }
            }
            _ => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_selection_wraps_over_every_widget() {
        let mut state = HomeState::new();
        assert_eq!(state.selected_widget(), None);

        state.editor_opened();
        assert_eq!(state.selected_widget(), Some(WidgetKey::ProjectInfo));
        state.previous();
        assert_eq!(state.selected_widget(), Some(WidgetKey::Invoices));

        state.editor_closed();
        assert!(!state.is_editing());
    }

    #[test]
    fn page_hotkeys_are_distinct() {
        let mut keys: Vec<char> = Page::ALL.iter().map(Page::hotkey).collect();
        keys.dedup();
        assert_eq!(keys.len(), Page::ALL.len());
    }
}
