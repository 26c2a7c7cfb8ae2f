use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::Block;

pub mod accounts;
pub mod add_user;

pub trait Component {
    /// What a key press asks of the owner.
    type Output;

    fn handle_input(&mut self, event: KeyEvent) -> Result<Self::Output>;
    fn render(&self, frame: &mut Frame);
}

/// Background painted behind every screen.
pub fn backdrop() -> Block<'static> {
    Block::default().style(Style::default().bg(Color::Rgb(16, 16, 28)))
}

/// Helper function to create a centered rect using up certain percentage of the available rect
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
