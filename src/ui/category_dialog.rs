use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub enum CategoryAction {
    Close,
    Add(String),
}

pub struct CategoryDialogState {
    pub name: String,
    pub error: Option<String>,
}

impl CategoryDialogState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            error: None,
        }
    }

    /// Clears the input after a successful add so another can be typed.
    pub fn accepted(&mut self) {
        self.name.clear();
        self.error = None;
    }
}

/// Popup over the materials page listing the categories with an input for a new one.
pub fn render_category_dialog<B: Backend>(
    f: &mut Frame<B>,
    state: &mut CategoryDialogState,
    categories: &[String],
) {
    let area = super::centered_rect(50, 60, f.size());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3), Constraint::Length(2)].as_ref())
        .split(area);

    let items: Vec<ListItem> = categories
        .iter()
        .map(|name| ListItem::new(Spans::from(vec![Span::raw(name.as_str())])))
        .collect();
    let list = List::new(items).block(Block::default().title("Categories").borders(Borders::ALL));
    f.render_widget(list, chunks[0]);

    let input = Paragraph::new(format!("{}|", state.name))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title("New Category").borders(Borders::ALL));
    f.render_widget(input, chunks[1]);

    let status = match &state.error {
        Some(message) => Span::styled(message.as_str(), Style::default().fg(Color::Red)),
        None => Span::styled("Enter - Add | Esc - Close", Style::default().fg(Color::Gray)),
    };
    f.render_widget(
        Paragraph::new(Spans::from(vec![status])).block(Block::default().borders(Borders::TOP)),
        chunks[2],
    );
}

pub fn handle_input(state: &mut CategoryDialogState) -> Result<Option<CategoryAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Esc => return Ok(Some(CategoryAction::Close)),
            KeyCode::Enter => return Ok(Some(CategoryAction::Add(state.name.clone()))),
            KeyCode::Char(c) => {
                state.error = None;
                state.name.push(c);
            }
            KeyCode::Backspace => {
                state.name.pop();
            }
            _ => {}
        }
    }
    Ok(None)
}
