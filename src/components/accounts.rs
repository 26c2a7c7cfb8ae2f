//! Manage Accounts screen.
//!
//! Hosts the Add User dialog: owns its `open` flag, reacts to the dialog's
//! `Refresh` and `Close` effects and hands every backend effect up to the
//! application for execution.

use crate::components::add_user::{AddUserDialog, Effect, Message};
use crate::components::{backdrop, Component};
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use time::macros::format_description;
use time::OffsetDateTime;

/// What the screen asks of the application after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountsAction {
    /// Backend work to start.
    Execute(Vec<Effect>),
    /// Leave the console.
    Quit,
}

/// The accounts screen and its dialog.
pub struct Accounts {
    backend: String,
    dialog: AddUserDialog,
    dialog_open: bool,
    /// Successful creations since start.
    added: usize,
    /// When the user list was last marked stale.
    refreshed_at: Option<OffsetDateTime>,
}

impl Accounts {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            dialog: AddUserDialog::new(),
            dialog_open: false,
            added: 0,
            refreshed_at: None,
        }
    }

    /// Opens the Add User dialog and returns the work that triggers.
    pub fn open_dialog(&mut self) -> Vec<Effect> {
        self.dialog_open = true;
        let effects = self.dialog.set_open(true);
        self.route(effects)
    }

    /// Delivers a backend result to the dialog.
    pub fn receive(&mut self, message: Message) -> Vec<Effect> {
        let effects = self.dialog.update(message);
        self.route(effects)
    }

    /// Handles host effects in order and returns the rest for execution.
    fn route(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::Refresh => self.refresh(),
                Effect::Close => self.close_dialog(),
                backend => pending.push(backend),
            }
        }
        pending
    }

    fn refresh(&mut self) {
        self.added += 1;
        self.refreshed_at =
            Some(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()));
        tracing::info!(added = self.added, "user list refreshed");
    }

    fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.dialog.set_open(false);
    }

    fn status_line(&self) -> String {
        let refreshed = self
            .refreshed_at
            .and_then(|at| at.format(format_description!("[hour]:[minute]:[second]")).ok())
            .map(|at| format!(" | Last refresh: {at}"))
            .unwrap_or_default();
        format!("Accounts added this session: {}{refreshed}", self.added)
    }
}

impl Component for Accounts {
    type Output = Option<AccountsAction>;

    fn handle_input(&mut self, event: KeyEvent) -> Result<Option<AccountsAction>> {
        if self.dialog_open {
            let effects = self.dialog.handle_input(event)?;
            let pending = self.route(effects);
            return Ok((!pending.is_empty()).then_some(AccountsAction::Execute(pending)));
        }

        match event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Enter => {
                let pending = self.open_dialog();
                Ok(Some(AccountsAction::Execute(pending)))
            }
            KeyCode::Char('q') | KeyCode::Esc => Ok(Some(AccountsAction::Quit)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame) {
        frame.render_widget(backdrop(), frame.area());

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Body
                Constraint::Length(2), // Help
            ])
            .margin(1)
            .split(frame.area());

        let header = Paragraph::new("👥 MANAGE ACCOUNTS")
            .style(
                Style::default()
                    .fg(Color::Rgb(230, 230, 250))
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::Rgb(75, 75, 120))),
            );
        frame.render_widget(header, layout[0]);

        let body = Paragraph::new(vec![
            Line::from(format!("Backend: {}", self.backend)),
            Line::from(""),
            Line::from(self.status_line()),
        ])
        .style(Style::default().fg(Color::Rgb(220, 220, 240)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(75, 75, 120)))
                .style(Style::default().bg(Color::Rgb(22, 22, 35))),
        );
        frame.render_widget(body, layout[1]);

        let help = Paragraph::new("A / Enter: Add User | Q / Esc: Quit | Ctrl+Q: Quit anywhere")
            .style(Style::default().fg(Color::Rgb(140, 140, 170)))
            .alignment(Alignment::Center);
        frame.render_widget(help, layout[2]);

        self.dialog.render(frame);
    }
}

#[cfg(test)]
impl Accounts {
    pub fn dialog(&self) -> &AddUserDialog {
        &self.dialog
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn added(&self) -> usize {
        self.added
    }
}
