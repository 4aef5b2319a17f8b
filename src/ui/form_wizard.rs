use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use site_admin::error::ValidationError;
use site_admin::forms::FormDraft;

pub enum FormWizardAction<D> {
    Cancel,
    Submit(D),
}

/// Create form for any draft. Field navigation and editing follow the draft's field list;
/// messages from a rejected submit are shown under the fields they belong to.
pub struct FormWizardState<D: FormDraft> {
    pub draft: D,
    pub current_field: usize,
    pub editing: bool,
    /// Extra title text, e.g. the project a task is added to.
    pub context: Option<String>,
    errors: ValidationError,
}

impl<D: FormDraft + Clone> FormWizardState<D> {
    pub fn new() -> Self {
        Self {
            draft: D::default(),
            current_field: 0,
            editing: false,
            context: None,
            errors: ValidationError::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % D::fields().len();
    }

    pub fn previous_field(&mut self) {
        let count = D::fields().len();
        self.current_field = (self.current_field + count - 1) % count;
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let Some(field_value) = self.draft.field_mut(self.current_field) else {
            return;
        };

        match key {
            KeyCode::Char(c) => {
                field_value.push(c);
            }
            KeyCode::Backspace => {
                field_value.pop();
            }
            _ => {}
        }
    }

    /// Keeps the form open with every message from a rejected submit.
    pub fn show_errors(&mut self, errors: ValidationError) {
        if let Some(first) = errors.errors().first() {
            if let Some(index) = D::fields().iter().position(|f| f.key == first.field) {
                self.current_field = index;
            }
        }
        self.errors = errors;
    }
}

pub fn render_form_wizard<B: Backend, D: FormDraft + Clone>(
    f: &mut Frame<B>,
    state: &mut FormWizardState<D>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title_text = match &state.context {
        Some(context) => format!("{} - {}", D::TITLE, context),
        None => D::TITLE.to_string(),
    };
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let help_text = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Submit | Esc - Cancel"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend, D: FormDraft + Clone>(
    f: &mut Frame<B>,
    state: &mut FormWizardState<D>,
    area: Rect,
) {
    let items: Vec<ListItem> = D::fields()
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let focused = i == state.current_field;
            let label_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let marker = if input.required { "*" } else { "" };
            let value = state.draft.field(i);

            let value_span = if focused && state.editing {
                Span::styled(format!("{}|", value), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Span::raw(value.to_string())
            };

            let mut lines = vec![Spans::from(vec![
                Span::styled(format!("{}{}: ", input.label, marker), label_style),
                value_span,
            ])];
            if let Some(message) = state.errors.message_for(input.key) {
                lines.push(Spans::from(vec![Span::styled(
                    format!("  {}", message),
                    Style::default().fg(Color::Red),
                )]));
            }

            ListItem::new(lines)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Details"));

    f.render_widget(form_list, area);
}

pub fn handle_input<D: FormDraft + Clone>(
    state: &mut FormWizardState<D>,
) -> Result<Option<FormWizardAction<D>>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Esc => {
                if state.editing {
                    state.toggle_editing();
                } else {
                    return Ok(Some(FormWizardAction::Cancel));
                }
            }
            KeyCode::Enter => {
                state.toggle_editing();
            }
            KeyCode::Up if !state.editing => {
                state.previous_field();
            }
            KeyCode::Down | KeyCode::Tab if !state.editing => {
                state.next_field();
            }
            KeyCode::Char('s') if !state.editing => {
                return Ok(Some(FormWizardAction::Submit(state.draft.clone())));
            }
            _ if state.editing => {
                state.edit_current_field(key.code);
            }
            _ => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_admin::forms::MaterialDraft;

    #[test]
    fn typing_only_changes_the_focused_field_while_editing() {
        let mut state = FormWizardState::<MaterialDraft>::new();
        state.edit_current_field(KeyCode::Char('x'));
        assert!(state.draft.name.is_empty());

        state.toggle_editing();
        for c in "Sand".chars() {
            state.edit_current_field(KeyCode::Char(c));
        }
        state.edit_current_field(KeyCode::Backspace);
        assert_eq!(state.draft.name, "San");
    }

    #[test]
    fn navigation_wraps_around_the_fields() {
        let mut state = FormWizardState::<MaterialDraft>::new();
        state.previous_field();
        assert_eq!(state.current_field, MaterialDraft::fields().len() - 1);
        state.next_field();
        assert_eq!(state.current_field, 0);
    }

    #[test]
    fn rejected_submit_focuses_the_first_bad_field() {
        let mut state = FormWizardState::<MaterialDraft>::new();
        let mut errors = ValidationError::new();
        errors.push("unit_cost", "Unit cost is required");
        errors.push("supplier", "Supplier is required");

        state.show_errors(errors);

        assert_eq!(MaterialDraft::fields()[state.current_field].key, "unit_cost");
        assert_eq!(state.errors.errors().len(), 2);
    }
}
