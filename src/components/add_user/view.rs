//! Terminal rendering of the Add User dialog.

use super::area::AreaSelector;
use super::validation::{self, FieldKey};
use super::{AddUserDialog, Focus};
use crate::components::centered_rect;
use crate::tui::Frame;
use ratatui::{prelude::*, widgets::*};

const PANEL: Color = Color::Rgb(22, 22, 35);
const INPUT_BG: Color = Color::Rgb(26, 26, 36);
const TEXT: Color = Color::Rgb(220, 220, 240);
const BORDER: Color = Color::Rgb(75, 75, 120);
const IDLE: Color = Color::Rgb(140, 140, 200);
const FOCUSED: Color = Color::Rgb(250, 250, 110);
const ERROR: Color = Color::Rgb(255, 100, 100);
const SUBMIT: Color = Color::Rgb(140, 219, 140);
const CANCEL: Color = Color::Rgb(129, 199, 245);
const MUTED: Color = Color::Rgb(140, 140, 170);

impl AddUserDialog {
    pub(super) fn render_dialog(&self, frame: &mut Frame) {
        let area = centered_rect(80, 80, frame.area());
        frame.render_widget(Clear, area);

        let container = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(
                " Add User ",
                Style::default().fg(Color::Rgb(230, 230, 250)).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(PANEL));
        let inner = container.inner(area);
        frame.render_widget(container, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // First / last name
                Constraint::Length(3), // CNIC / contact
                Constraint::Length(3), // User type / area
                Constraint::Length(3), // Email / password
                Constraint::Length(1), // Spacing
                Constraint::Length(1), // Buttons
                Constraint::Min(1),    // Help
            ])
            .margin(1)
            .split(inner);

        self.render_pair(frame, rows[0], FieldKey::FirstName, FieldKey::LastName);
        self.render_pair(frame, rows[1], FieldKey::Cnic, FieldKey::Contact);
        self.render_selectors(frame, rows[2]);
        self.render_pair(frame, rows[3], FieldKey::Email, FieldKey::Password);
        self.render_buttons(frame, rows[5]);

        let help = Paragraph::new(
            "Tab/↑↓: Move | ←→: Choose option | Ctrl+V: Show/hide password | Enter: Select | Esc: Cancel",
        )
        .style(Style::default().fg(MUTED).bg(PANEL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(help, rows[6]);
    }

    fn render_pair(&self, frame: &mut Frame, row: Rect, left: FieldKey, right: FieldKey) {
        let cells = halves(row);
        self.render_text_field(frame, cells[0], left);
        self.render_text_field(frame, cells[1], right);
    }

    fn render_text_field(&self, frame: &mut Frame, cell: Rect, field: FieldKey) {
        let raw = self.form.values().get(field);
        let shown = if field == FieldKey::Password && !self.show_password {
            "•".repeat(raw.chars().count())
        } else {
            raw.to_string()
        };
        let label = validation::descriptor(field)
            .map(|descriptor| descriptor.label)
            .unwrap_or_default();
        frame.render_widget(self.input_box(field, label, shown), cell);
    }

    fn render_selectors(&self, frame: &mut Frame, row: Rect) {
        let user_type = self
            .form
            .values()
            .usertype
            .map(|user_type| format!("◂ {user_type} ▸"))
            .unwrap_or_default();

        match self.area_selector() {
            AreaSelector::Hidden => {
                frame.render_widget(self.input_box(FieldKey::UserType, "User Type", user_type), row);
            }
            selector @ AreaSelector::Visible(_) => {
                let cells = halves(row);
                frame.render_widget(
                    self.input_box(FieldKey::UserType, "User Type", user_type),
                    cells[0],
                );
                let options = self.area_options();
                let shown = match self.form.selected_area() {
                    Some(area) => format!("◂ {} ▸", area.name),
                    None if options.is_empty() => "No options".to_string(),
                    None => format!("Choose one of {}", options.len()),
                };
                let label = selector.label().unwrap_or_default();
                frame.render_widget(self.input_box(FieldKey::Area, label, shown), cells[1]);
            }
        }
    }

    fn input_box(&self, field: FieldKey, label: &str, value: String) -> Paragraph<'static> {
        let focused = self.focus == Focus::Field(field);
        let error = self.form.visible_error(field);
        let accent = match (focused, error.is_some()) {
            (true, _) => FOCUSED,
            (false, true) => ERROR,
            (false, false) => IDLE,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(format!(" {label} "), Style::default().fg(accent)))
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(INPUT_BG));
        if let Some(message) = error {
            block = block.title_bottom(Span::styled(
                format!(" {message} "),
                Style::default().fg(ERROR),
            ));
        }

        Paragraph::new(value)
            .style(Style::default().fg(TEXT).bg(INPUT_BG))
            .block(block)
    }

    fn render_buttons(&self, frame: &mut Frame, row: Rect) {
        let cells = halves(row);

        let submit_focused = self.focus == Focus::Submit;
        let (submit_text, submit_style) = if self.submitting {
            ("  Adding…  ", Style::default().fg(MUTED).add_modifier(Modifier::DIM))
        } else if submit_focused {
            ("► Add ◄", Style::default().fg(SUBMIT).add_modifier(Modifier::BOLD))
        } else {
            ("  Add  ", Style::default().fg(Color::Rgb(180, 180, 200)))
        };
        frame.render_widget(
            Paragraph::new(submit_text)
                .style(submit_style)
                .alignment(Alignment::Center),
            cells[0],
        );

        let (cancel_text, cancel_style) = if self.focus == Focus::Cancel {
            ("► Cancel ◄", Style::default().fg(CANCEL).add_modifier(Modifier::BOLD))
        } else {
            ("  Cancel  ", Style::default().fg(Color::Rgb(180, 180, 200)))
        };
        frame.render_widget(
            Paragraph::new(cancel_text)
                .style(cancel_style)
                .alignment(Alignment::Center),
            cells[1],
        );
    }
}

fn halves(row: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(row)
}
