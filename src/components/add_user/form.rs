//! Form state for the Add User dialog: values, touched flags and errors.

use super::validation::{self, FieldErrors, FieldKey};
use crate::models::{AreaReference, UserType};
use std::collections::BTreeSet;

/// Values typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub cnic: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub usertype: Option<UserType>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            cnic: String::new(),
            email: String::new(),
            contact: String::new(),
            password: String::new(),
            usertype: Some(UserType::SuperAdministrator),
        }
    }
}

impl FormValues {
    /// Current value of `key` as text. The area has no text value here.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::FirstName => &self.first_name,
            FieldKey::LastName => &self.last_name,
            FieldKey::Cnic => &self.cnic,
            FieldKey::Email => &self.email,
            FieldKey::Contact => &self.contact,
            FieldKey::Password => &self.password,
            FieldKey::UserType => self.usertype.map(UserType::as_str).unwrap_or(""),
            FieldKey::Area => "",
        }
    }

    fn text_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        match key {
            FieldKey::FirstName => Some(&mut self.first_name),
            FieldKey::LastName => Some(&mut self.last_name),
            FieldKey::Cnic => Some(&mut self.cnic),
            FieldKey::Email => Some(&mut self.email),
            FieldKey::Contact => Some(&mut self.contact),
            FieldKey::Password => Some(&mut self.password),
            FieldKey::UserType | FieldKey::Area => None,
        }
    }
}

/// Everything the form remembers between key presses.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: FormValues,
    selected_area: Option<AreaReference>,
    touched: BTreeSet<FieldKey>,
    errors: FieldErrors,
    submit_attempted: bool,
}

impl FormState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.revalidate();
        state
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn selected_area(&self) -> Option<&AreaReference> {
        self.selected_area.as_ref()
    }

    /// Replaces the text of `field`. Ignored for the selector fields.
    pub fn change(&mut self, field: FieldKey, value: impl Into<String>) {
        if let Some(slot) = self.values.text_mut(field) {
            *slot = value.into();
            self.revalidate();
        }
    }

    /// Appends one character to a text field.
    pub fn push_char(&mut self, field: FieldKey, c: char) {
        let mut value = self.values.get(field).to_string();
        value.push(c);
        self.change(field, value);
    }

    /// Removes the last character of a text field.
    pub fn pop_char(&mut self, field: FieldKey) {
        let mut value = self.values.get(field).to_string();
        if value.pop().is_some() {
            self.change(field, value);
        }
    }

    /// Marks `field` as visited so its error becomes visible.
    pub fn blur(&mut self, field: FieldKey) {
        self.touched.insert(field);
        self.revalidate();
    }

    /// Switches the user type. The area selection never survives a switch.
    pub fn set_user_type(&mut self, user_type: Option<UserType>) {
        self.values.usertype = user_type;
        self.selected_area = None;
        self.revalidate();
    }

    pub fn select_area(&mut self, area: Option<AreaReference>) {
        self.selected_area = area;
        self.revalidate();
    }

    /// Records a submit attempt and reports whether the form may be sent.
    pub fn attempt_submit(&mut self) -> bool {
        self.submit_attempted = true;
        self.revalidate();
        self.is_valid()
    }

    /// Back to an untouched, empty form with no area selected.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, field: FieldKey) -> bool {
        self.touched.contains(&field)
    }

    /// The error to show next to `field`, if the user has been there or tried to submit.
    pub fn visible_error(&self, field: FieldKey) -> Option<&str> {
        if self.submit_attempted || self.is_touched(field) {
            self.errors.get(&field).map(String::as_str)
        } else {
            None
        }
    }

    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.values, self.selected_area.as_ref());
    }
}

#[cfg(test)]
impl FormState {
    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_stay_hidden_until_blur() {
        let mut form = FormState::new();
        form.change(FieldKey::FirstName, "");
        assert!(!form.is_valid());
        assert_eq!(form.visible_error(FieldKey::FirstName), None);

        form.blur(FieldKey::FirstName);
        assert_eq!(
            form.visible_error(FieldKey::FirstName),
            Some("First name is required")
        );
    }

    #[test]
    fn error_clears_once_field_is_valid() {
        let mut form = FormState::new();
        form.blur(FieldKey::Email);
        form.change(FieldKey::Email, "nope");
        assert_eq!(form.visible_error(FieldKey::Email), Some("Invalid email"));
        form.change(FieldKey::Email, "nope@example.org");
        assert_eq!(form.visible_error(FieldKey::Email), None);
    }

    #[test]
    fn submit_attempt_reveals_every_error() {
        let mut form = FormState::new();
        assert!(!form.attempt_submit());
        assert_eq!(form.visible_error(FieldKey::Cnic), Some("CNIC is required"));
        assert_eq!(form.visible_error(FieldKey::Password), Some("Password is required"));
    }

    #[test]
    fn editing_characters() {
        let mut form = FormState::new();
        for c in "Alix".chars() {
            form.push_char(FieldKey::FirstName, c);
        }
        form.pop_char(FieldKey::FirstName);
        assert_eq!(form.values().first_name, "Ali");
        form.push_char(FieldKey::UserType, 'x');
        assert_eq!(form.values().usertype, Some(UserType::SuperAdministrator));
    }

    #[test]
    fn typed_characters_revalidate_the_field() {
        let mut form = FormState::new();
        form.blur(FieldKey::FirstName);
        assert_eq!(
            form.visible_error(FieldKey::FirstName),
            Some("First name is required")
        );

        form.push_char(FieldKey::FirstName, 'A');
        assert_eq!(form.visible_error(FieldKey::FirstName), None);

        form.pop_char(FieldKey::FirstName);
        form.pop_char(FieldKey::FirstName);
        assert_eq!(form.values().first_name, "");
        assert_eq!(
            form.visible_error(FieldKey::FirstName),
            Some("First name is required")
        );
    }

    #[test]
    fn user_type_switch_clears_area() {
        let mut form = FormState::new();
        form.set_user_type(Some(UserType::TehsilAdministrator));
        form.select_area(Some(AreaReference::new(1, "Kasur")));
        assert!(form.selected_area().is_some());

        form.set_user_type(Some(UserType::HospitalAdministrator));
        assert!(form.selected_area().is_none());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = FormState::new();
        form.change(FieldKey::LastName, "Raza");
        form.set_user_type(Some(UserType::ProvinceAdministrator));
        form.select_area(Some(AreaReference::new(2, "Punjab")));
        form.blur(FieldKey::LastName);
        form.attempt_submit();

        form.reset();
        assert_eq!(form.values(), &FormValues::default());
        assert!(form.selected_area().is_none());
        assert!(!form.is_touched(FieldKey::LastName));
        assert!(!form.submit_attempted());
    }
}
