//! Add User dialog.
//!
//! The dialog is a headless controller plus a terminal view. It performs no
//! I/O: every operation returns the [`Effect`]s the host must carry out, and
//! the results come back through [`AddUserDialog::update`] as [`Message`]s.
//!
//! Lifecycle:
//! - opening emits one [`Effect::FetchLookups`];
//! - submitting a valid form emits [`Effect::CreateUser`] and disables the
//!   Add button until the result arrives;
//! - a successful creation resets the form and emits [`Effect::Refresh`]
//!   followed by [`Effect::Close`]; a failed one keeps everything as typed.

pub mod area;
pub mod form;
pub mod payload;
pub mod validation;
mod view;

use self::area::{step_area, step_user_type, AreaSelector};
use self::form::FormState;
use self::payload::build_payload;
use self::validation::FieldKey;
use crate::components::Component;
use crate::error::ApiError;
use crate::models::{AreaReference, LookupCollections, SubmissionPayload};
use crate::tui::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Work the host performs on behalf of the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load all five lookup collections in one joined batch.
    FetchLookups,
    /// Post the new user.
    CreateUser(SubmissionPayload),
    /// The caller's user list is stale.
    Refresh,
    /// The dialog wants to be closed.
    Close,
}

/// Results of effects, fed back into the dialog.
#[derive(Debug)]
pub enum Message {
    LookupsLoaded(Result<LookupCollections, ApiError>),
    UserCreated(Result<(), ApiError>),
}

/// What currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldKey),
    Submit,
    Cancel,
}

const INITIAL_FOCUS: Focus = Focus::Field(FieldKey::FirstName);

/// The Add User dialog.
#[derive(Debug)]
pub struct AddUserDialog {
    /// Mirrors the host's `open` flag.
    open: bool,
    form: FormState,
    lookups: LookupCollections,
    /// A create request is in flight.
    submitting: bool,
    show_password: bool,
    focus: Focus,
}

impl AddUserDialog {
    pub fn new() -> Self {
        Self {
            open: false,
            form: FormState::new(),
            lookups: LookupCollections::default(),
            submitting: false,
            show_password: false,
            focus: INITIAL_FOCUS,
        }
    }

    /// Applies the host's `open` flag. Only a closed→open transition loads lookups.
    pub fn set_open(&mut self, open: bool) -> Vec<Effect> {
        let opening = open && !self.open;
        self.open = open;
        if opening {
            tracing::info!("add user dialog opened");
            self.focus = INITIAL_FOCUS;
            vec![Effect::FetchLookups]
        } else {
            Vec::new()
        }
    }

    /// Feeds the result of an effect back in.
    ///
    /// Results are applied even if the dialog was closed meanwhile.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::LookupsLoaded(Ok(lookups)) => {
                tracing::info!(
                    tehsils = lookups.tehsil.len(),
                    divisions = lookups.division.len(),
                    districts = lookups.district.len(),
                    provinces = lookups.province.len(),
                    hospitals = lookups.hospital.len(),
                    "lookup collections loaded"
                );
                if lookups.is_empty() {
                    tracing::warn!("every lookup collection is empty");
                }
                self.lookups = lookups;
                Vec::new()
            }
            Message::LookupsLoaded(Err(e)) => {
                tracing::error!(error = %e, "Error fetching options");
                Vec::new()
            }
            Message::UserCreated(Ok(())) => {
                tracing::info!("user created");
                self.submitting = false;
                self.clear();
                vec![Effect::Refresh, Effect::Close]
            }
            Message::UserCreated(Err(e)) => {
                tracing::error!(error = %e, "Error creating user");
                self.submitting = false;
                Vec::new()
            }
        }
    }

    /// Validates and, if the form is complete, emits the create request.
    pub fn submit(&mut self) -> Vec<Effect> {
        if self.submitting {
            return Vec::new();
        }
        if !self.form.attempt_submit() {
            tracing::debug!("submit blocked by validation");
            return Vec::new();
        }
        let Some(payload) = build_payload(self.form.values(), self.form.selected_area()) else {
            return Vec::new();
        };
        self.submitting = true;
        vec![Effect::CreateUser(payload)]
    }

    /// Discards the form and asks to be closed.
    pub fn cancel(&mut self) -> Vec<Effect> {
        self.clear();
        vec![Effect::Close]
    }

    pub fn area_selector(&self) -> AreaSelector {
        AreaSelector::for_user_type(self.form.values().usertype)
    }

    /// Options currently offered by the area selector.
    pub fn area_options(&self) -> &[AreaReference] {
        self.area_selector().options(&self.lookups)
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    fn clear(&mut self) {
        self.form.reset();
        self.show_password = false;
        self.focus = INITIAL_FOCUS;
    }

    /// Focus stops in display order; the area selector only when shown.
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![
            Focus::Field(FieldKey::FirstName),
            Focus::Field(FieldKey::LastName),
            Focus::Field(FieldKey::Cnic),
            Focus::Field(FieldKey::Contact),
            Focus::Field(FieldKey::UserType),
        ];
        if self.area_selector().is_visible() {
            order.push(Focus::Field(FieldKey::Area));
        }
        order.extend([
            Focus::Field(FieldKey::Email),
            Focus::Field(FieldKey::Password),
            Focus::Submit,
            Focus::Cancel,
        ]);
        order
    }

    fn move_focus(&mut self, forward: bool) {
        if let Focus::Field(field) = self.focus {
            self.form.blur(field);
        }
        let order = self.focus_order();
        let len = order.len();
        let next = match order.iter().position(|focus| *focus == self.focus) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => order
                .iter()
                .position(|focus| *focus == Focus::Field(FieldKey::UserType))
                .unwrap_or(0),
        };
        self.focus = order[next];
    }

    fn step_selector(&mut self, field: FieldKey, forward: bool) {
        match field {
            FieldKey::UserType => {
                let next = step_user_type(self.form.values().usertype, forward);
                self.form.set_user_type(Some(next));
            }
            FieldKey::Area => {
                let next = step_area(self.area_options(), self.form.selected_area(), forward);
                if next.is_some() {
                    self.form.select_area(next);
                }
            }
            _ => {}
        }
    }

    fn clear_field(&mut self, field: FieldKey) {
        match field {
            FieldKey::UserType => self.form.set_user_type(None),
            FieldKey::Area => self.form.select_area(None),
            text => self.form.pop_char(text),
        }
    }

    /// Maps one key press onto the form.
    fn process_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        match key.code {
            KeyCode::Esc => return self.cancel(),
            KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_password_visibility();
            }
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Enter => match self.focus {
                Focus::Submit => return self.submit(),
                Focus::Cancel => return self.cancel(),
                Focus::Field(_) => self.move_focus(true),
            },
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match self.focus {
                    Focus::Field(field) => self.step_selector(field, forward),
                    Focus::Submit => self.focus = Focus::Cancel,
                    Focus::Cancel => self.focus = Focus::Submit,
                }
            }
            KeyCode::Backspace => {
                if let Focus::Field(field) = self.focus {
                    self.clear_field(field);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Focus::Field(field) = self.focus {
                    self.form.push_char(field, c);
                }
            }
            _ => {}
        }
        Vec::new()
    }
}

impl Default for AddUserDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AddUserDialog {
    type Output = Vec<Effect>;

    fn handle_input(&mut self, event: KeyEvent) -> Result<Vec<Effect>> {
        Ok(self.process_key(event))
    }

    fn render(&self, frame: &mut Frame) {
        if self.open {
            self.render_dialog(frame);
        }
    }
}

#[cfg(test)]
impl AddUserDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn lookups(&self) -> &LookupCollections {
        &self.lookups
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn password_visible(&self) -> bool {
        self.show_password
    }
}
