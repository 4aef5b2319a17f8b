pub mod category_dialog;
pub mod collection;
pub mod finance;
pub mod form_wizard;
pub mod home;
pub mod login;

use site_admin::engine::DisplayTag;
use tui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

/// Terminal colour for a status tag.
pub fn tag_color(tag: DisplayTag) -> Color {
    match tag {
        DisplayTag::Success => Color::Green,
        DisplayTag::Info => Color::Blue,
        DisplayTag::Warning => Color::Yellow,
        DisplayTag::Danger => Color::Red,
        DisplayTag::Accent => Color::Magenta,
        DisplayTag::Highlight => Color::LightRed,
        DisplayTag::Muted => Color::Gray,
        DisplayTag::Neutral => Color::White,
    }
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Wrapping step forward through `len` rows.
pub fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Wrapping step backward through `len` rows.
pub fn previous_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(previous_index(Some(0), 3), Some(2));
        assert_eq!(previous_index(Some(1), 3), Some(0));
        assert_eq!(next_index(Some(0), 0), None);
    }
}
