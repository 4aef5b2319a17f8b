use std::marker::PhantomData;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use site_admin::engine::{resolve, Id, Query, Selection};
use site_admin::listing::{filter_options, Listing};

/// Keys cycling the first, second and third filter dimension.
const FILTER_KEYS: [char; 3] = ['f', 'g', 'h'];

pub enum CollectionAction {
    Back,
    New,
    Delete(Id),
    /// A page specific key, with the selected record if there is one.
    Extra(char, Option<Id>),
}

/// One list page: search text, filter selections and the highlighted row. Records stay
/// in the dashboard and are passed in on every render and key press.
pub struct CollectionState<T: Listing> {
    title: String,
    query: Query<T::Dimension>,
    table_state: TableState,
    searching: bool,
    show_delete_confirmation: bool,
    extra_keys: Vec<(char, &'static str)>,
    _records: PhantomData<T>,
}

impl<T: Listing> CollectionState<T> {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            title: T::TITLE.to_string(),
            query: Query::new(),
            table_state,
            searching: false,
            show_delete_confirmation: false,
            extra_keys: Vec::new(),
            _records: PhantomData,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Opens the page already narrowed to `value` on `dimension`.
    pub fn with_filter(mut self, dimension: T::Dimension, value: &str) -> Self {
        self.query.set_filter(dimension, value);
        self
    }

    pub fn with_extra_key(mut self, key: char, label: &'static str) -> Self {
        self.extra_keys.push((key, label));
        self
    }

    pub fn visible<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        self.query.apply(records)
    }

    pub fn next(&mut self, len: usize) {
        self.table_state.select(super::next_index(self.table_state.selected(), len));
    }

    pub fn previous(&mut self, len: usize) {
        self.table_state.select(super::previous_index(self.table_state.selected(), len));
    }

    /// Keeps the highlight on a row that still exists after the view shrank.
    fn clamp_selection(&mut self, len: usize) {
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn selected_id(&self, records: &[T]) -> Option<Id> {
        let visible = self.visible(records);
        self.table_state
            .selected()
            .and_then(|i| visible.get(i))
            .map(|record| record.record_id())
    }

    /// Moves filter `slot` on to the next distinct value, wrapping back to "all".
    pub fn cycle_filter(&mut self, slot: usize, records: &[T]) {
        let Some((dimension, _)) = T::filter_dimensions().get(slot).copied() else {
            return;
        };
        let options = filter_options(records, dimension);
        let next = match self.query.selection(dimension) {
            Selection::All => options.first().cloned(),
            Selection::Exact(current) => options
                .iter()
                .position(|o| o == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };
        self.query
            .set_filter(dimension, next.map_or(Selection::All, Selection::Exact));
        self.table_state.select(Some(0));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }
}

pub fn render_collection<B: Backend, T: Listing>(
    frame: &mut Frame<B>,
    state: &mut CollectionState<T>,
    records: &[T],
) {
    let size = frame.size();
    let visible = state.visible(records);
    state.clamp_selection(visible.len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    render_query_bar(frame, state, chunks[0]);

    let header_cells = T::columns()
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let status_column = T::status_column();
    let rows = visible.iter().map(|record| {
        let cells = record.cells().into_iter().enumerate().map(|(i, text)| {
            if i == status_column {
                let color = super::tag_color(resolve(T::STATUS_KIND, &text));
                Cell::from(text).style(Style::default().fg(color))
            } else {
                Cell::from(text)
            }
        });
        Row::new(cells).height(1)
    });

    let widths: Vec<Constraint> = T::columns()
        .iter()
        .map(|_| Constraint::Ratio(1, T::columns().len() as u32))
        .collect();

    let title = format!("{} ({} of {})", state.title, visible.len(), records.len());
    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .widths(&widths);
    frame.render_stateful_widget(table, chunks[1], &mut state.table_state);

    let mut totals = Vec::new();
    for (label, value) in T::footer(&visible) {
        totals.push(Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)));
        totals.push(Span::styled(value, Style::default().add_modifier(Modifier::BOLD)));
        totals.push(Span::raw("   "));
    }
    let footer = Paragraph::new(Spans::from(totals)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    let mut buttons_text = if state.searching {
        "Type to search | Enter/Esc - Done".to_string()
    } else {
        let filters: Vec<String> = T::filter_dimensions()
            .iter()
            .zip(FILTER_KEYS)
            .map(|((_, label), key)| format!("<{}> {}", key.to_ascii_uppercase(), label))
            .collect();
        format!("</> Search | {} | <N> New | <D> Delete", filters.join(" | "))
    };
    if !state.searching {
        for (key, label) in &state.extra_keys {
            buttons_text.push_str(&format!(" | <{}> {}", key.to_ascii_uppercase(), label));
        }
        buttons_text.push_str(" | <Esc> Back");
    }
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[3]);

    if state.show_delete_confirmation {
        render_delete_confirmation(frame, size);
    }
}

fn render_query_bar<B: Backend, T: Listing>(
    frame: &mut Frame<B>,
    state: &CollectionState<T>,
    area: Rect,
) {
    let search_style = if state.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if state.searching { "|" } else { "" };
    let mut spans = vec![
        Span::styled("Search: ", search_style),
        Span::raw(format!("{}{}", state.query.search_text(), cursor)),
    ];
    for (dimension, label) in T::filter_dimensions() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)));
        spans.push(Span::raw(state.query.selection(*dimension).to_string()));
    }
    let bar = Paragraph::new(Spans::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn render_delete_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect) {
    let popup_area = super::centered_rect(50, 20, size);

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from("Are you sure you want to delete this record?"),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(popup, popup_area);
}

pub fn handle_input<T: Listing>(
    state: &mut CollectionState<T>,
    records: &[T],
) -> Result<Option<CollectionAction>> {
    if let Event::Key(key) = event::read()? {
        if state.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => state.searching = false,
                KeyCode::Char(c) => {
                    state.query.search_text_mut().push(c);
                    state.table_state.select(Some(0));
                }
                KeyCode::Backspace => {
                    state.query.search_text_mut().pop();
                }
                _ => {}
            }
            return Ok(None);
        }

        if state.show_delete_confirmation {
            match key.code {
                KeyCode::Char('y') => {
                    state.toggle_delete_confirmation();
                    if let Some(id) = state.selected_id(records) {
                        return Ok(Some(CollectionAction::Delete(id)));
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => state.toggle_delete_confirmation(),
                _ => {}
            }
            return Ok(None);
        }

        let len = state.visible(records).len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(CollectionAction::Back)),
            KeyCode::Char('/') => state.searching = true,
            KeyCode::Char(c) if FILTER_KEYS.contains(&c) => {
                let slot = FILTER_KEYS.iter().position(|k| *k == c).unwrap_or_default();
                state.cycle_filter(slot, records);
            }
            KeyCode::Char('n') => return Ok(Some(CollectionAction::New)),
            KeyCode::Char('d') => {
                if state.selected_id(records).is_some() {
                    state.toggle_delete_confirmation();
                }
            }
            KeyCode::Down => state.next(len),
            KeyCode::Up => state.previous(len),
            KeyCode::Char(c) if state.extra_keys.iter().any(|(k, _)| *k == c) => {
                return Ok(Some(CollectionAction::Extra(c, state.selected_id(records))));
            }
            _ => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_admin::listing::MaterialFilter;
    use site_admin::models::Material;
    use site_admin::seed;

    #[test]
    fn filter_cycles_through_present_values_and_back_to_all() {
        let materials = seed::materials();
        let mut state = CollectionState::<Material>::new();

        let mut seen = Vec::new();
        for _ in 0..4 {
            state.cycle_filter(0, &materials);
            seen.push(state.query.selection(MaterialFilter::Status).to_string());
        }

        assert_eq!(seen, vec!["On Site", "In Warehouse", "On The Way", "all"]);
    }

    #[test]
    fn selection_follows_the_filtered_view() {
        let materials = seed::materials();
        let mut state = CollectionState::<Material>::new();
        state.cycle_filter(1, &materials);
        state.cycle_filter(1, &materials);

        // second category seen is "Electrical", which only the copper wires carry
        assert_eq!(state.selected_id(&materials), Some(3));
    }

    #[test]
    fn third_filter_narrows_by_project() {
        let materials = seed::materials();
        let state = CollectionState::<Material>::new().with_filter(MaterialFilter::Project, "Mall of Lahore");

        let ids: Vec<Id> = state.visible(&materials).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 5]);

        let mut cycled = CollectionState::<Material>::new();
        cycled.cycle_filter(2, &materials);
        assert_eq!(cycled.query.selection(MaterialFilter::Project).to_string(), "DHA Phase 4");
    }
}
