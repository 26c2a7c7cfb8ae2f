//! Declarative validation rules for the Add User form.

use super::form::FormValues;
use crate::models::AreaReference;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Identifies one input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    FirstName,
    LastName,
    Cnic,
    Contact,
    UserType,
    Area,
    Email,
    Password,
}

/// A single check applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The value must not be empty.
    Required(&'static str),
    /// The value must look like an email address.
    Email(&'static str),
}

impl Rule {
    fn check(self, value: &str) -> Result<(), &'static str> {
        match self {
            Rule::Required(message) if value.is_empty() => Err(message),
            Rule::Email(message) if !is_email(value) => Err(message),
            _ => Ok(()),
        }
    }
}

/// Static description of a validated field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

/// Every field with value rules. The area selector is checked separately
/// since its requirement depends on the selected user type.
pub const FIELDS: [FieldDescriptor; 7] = [
    FieldDescriptor {
        key: FieldKey::FirstName,
        label: "First Name",
        rules: &[Rule::Required("First name is required")],
    },
    FieldDescriptor {
        key: FieldKey::LastName,
        label: "Last Name",
        rules: &[Rule::Required("Last name is required")],
    },
    FieldDescriptor {
        key: FieldKey::Cnic,
        label: "CNIC",
        rules: &[Rule::Required("CNIC is required")],
    },
    FieldDescriptor {
        key: FieldKey::Contact,
        label: "Contact",
        rules: &[Rule::Required("Contact is required")],
    },
    FieldDescriptor {
        key: FieldKey::UserType,
        label: "User Type",
        rules: &[Rule::Required("User type is required")],
    },
    FieldDescriptor {
        key: FieldKey::Email,
        label: "Email",
        rules: &[
            Rule::Required("Email is required"),
            Rule::Email("Invalid email"),
        ],
    },
    FieldDescriptor {
        key: FieldKey::Password,
        label: "Password",
        rules: &[Rule::Required("Password is required")],
    },
];

/// Looks up the descriptor of `key`.
pub fn descriptor(key: FieldKey) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|field| field.key == key)
}

/// Field errors keyed by field; a field missing from the map is valid.
pub type FieldErrors = BTreeMap<FieldKey, String>;

/// Runs every rule against `values` and the current area selection.
///
/// Only the first failing rule of a field is reported.
pub fn validate(values: &FormValues, selected_area: Option<&AreaReference>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in &FIELDS {
        let value = values.get(field.key);
        if let Some(message) = field
            .rules
            .iter()
            .find_map(|rule| rule.check(value).err())
        {
            errors.insert(field.key, message.to_string());
        }
    }

    if let Some(kind) = values.usertype.and_then(|user_type| user_type.area_kind()) {
        if selected_area.is_none() {
            errors.insert(FieldKey::Area, format!("{} is required", kind.label()));
        }
    }

    errors
}

/// HTML5 address syntax: a local part of atext and dots, then dot-separated
/// hostname labels. A single-label domain such as `a@b` is accepted.
const EMAIL_PATTERN: &str = concat!(
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
    r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
    r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
);

pub fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
        .is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;

    fn filled() -> FormValues {
        FormValues {
            first_name: "Ayesha".into(),
            last_name: "Khan".into(),
            cnic: "35202-1234567-1".into(),
            email: "a@b.com".into(),
            contact: "03001234567".into(),
            password: "secret".into(),
            usertype: Some(UserType::SuperAdministrator),
        }
    }

    #[test]
    fn complete_super_administrator_is_valid() {
        assert!(validate(&filled(), None).is_empty());
    }

    #[test]
    fn empty_form_reports_every_text_field() {
        let errors = validate(&FormValues::default(), None);
        assert_eq!(errors[&FieldKey::FirstName], "First name is required");
        assert_eq!(errors[&FieldKey::LastName], "Last name is required");
        assert_eq!(errors[&FieldKey::Cnic], "CNIC is required");
        assert_eq!(errors[&FieldKey::Email], "Email is required");
        assert_eq!(errors[&FieldKey::Contact], "Contact is required");
        assert_eq!(errors[&FieldKey::Password], "Password is required");
        assert!(!errors.contains_key(&FieldKey::UserType));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut values = filled();
        values.email = "not-an-email".into();
        let errors = validate(&values, None);
        assert_eq!(errors.get(&FieldKey::Email).map(String::as_str), Some("Invalid email"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last+tag@health.gov.pk"));
        assert!(is_email("a@b"));
        assert!(is_email("o'neil@sub-domain.example"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("@c.com"));
        assert!(!is_email("a@.com"));
        assert!(!is_email("a@b-.com"));
        assert!(!is_email("a@b.com."));
    }

    #[test]
    fn email_local_part_rejects_quotes_and_brackets() {
        assert!(!is_email("a\"b@c.com"));
        assert!(!is_email("<a>@c.com"));
        assert!(!is_email("a(b)@c.com"));
    }

    #[test]
    fn missing_user_type_is_reported() {
        let mut values = filled();
        values.usertype = None;
        let errors = validate(&values, None);
        assert_eq!(errors[&FieldKey::UserType], "User type is required");
    }

    #[test]
    fn scoped_user_type_requires_an_area() {
        let mut values = filled();
        values.usertype = Some(UserType::DistrictAdministrator);
        let errors = validate(&values, None);
        assert_eq!(errors[&FieldKey::Area], "District is required");

        let area = AreaReference::new(4, "Faisalabad");
        assert!(validate(&values, Some(&area)).is_empty());
    }

    #[test]
    fn descriptors_cover_all_text_fields() {
        let text_fields = [
            FieldKey::FirstName,
            FieldKey::LastName,
            FieldKey::Cnic,
            FieldKey::Contact,
            FieldKey::Email,
            FieldKey::Password,
        ];
        for key in text_fields {
            assert!(descriptor(key).is_some(), "{key:?} has no descriptor");
        }
        assert!(descriptor(FieldKey::Area).is_none());
    }
}
