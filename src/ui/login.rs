use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub enum LoginAction {
    Exit,
    Submit { email: String, password: String },
}

#[derive(Clone, PartialEq, Copy)]
pub enum LoginField {
    Email,
    Password,
}

pub struct LoginState {
    pub email: String,
    pub password: String,
    pub current_field: LoginField,
    pub error: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            current_field: LoginField::Email,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        let field_value = match self.current_field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        };

        match key {
            KeyCode::Char(c) => field_value.push(c),
            KeyCode::Backspace => {
                field_value.pop();
            }
            _ => {}
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Shows a failed attempt and clears the password for the next one.
    pub fn reject(&mut self, message: String) {
        self.error = Some(message);
        self.password.clear();
        self.current_field = LoginField::Password;
    }
}

pub fn render_login<B: Backend>(f: &mut Frame<B>, state: &mut LoginState) {
    let area = super::centered_rect(60, 50, f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new("Site Admin - Sign in")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let masked = "*".repeat(state.password.chars().count());
    let fields = [
        (LoginField::Email, "Email", state.email.as_str()),
        (LoginField::Password, "Password", masked.as_str()),
    ];
    for (i, (field, label, value)) in fields.iter().enumerate() {
        let focused = state.current_field == *field;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let cursor = if focused { "|" } else { "" };
        let input = Paragraph::new(Spans::from(vec![Span::raw(format!("{}{}", value, cursor))]))
            .block(Block::default().borders(Borders::ALL).title(*label).border_style(style));
        f.render_widget(input, chunks[1 + i]);
    }

    let status = match &state.error {
        Some(message) => Span::styled(message.as_str(), Style::default().fg(Color::Red)),
        None => Span::styled(
            "Tab - Switch field | Enter - Sign in | Esc - Quit",
            Style::default().fg(Color::Gray),
        ),
    };
    f.render_widget(
        Paragraph::new(Spans::from(vec![status])).alignment(Alignment::Center),
        chunks[3],
    );
}

pub fn handle_input(state: &mut LoginState) -> Result<Option<LoginAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Esc => return Ok(Some(LoginAction::Exit)),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => state.next_field(),
            KeyCode::Enter => {
                if state.current_field == LoginField::Email {
                    state.next_field();
                } else if state.is_valid() {
                    return Ok(Some(LoginAction::Submit {
                        email: state.email.trim().to_string(),
                        password: state.password.clone(),
                    }));
                } else {
                    state.error = Some("Email and password are required".to_string());
                }
            }
            _ => {
                state.error = None;
                state.edit_current_field(key.code);
            }
        }
    }

    Ok(None)
}
