//! Decides whether the area selector is shown and which options it offers.

use crate::models::{AreaKind, AreaReference, LookupCollections, UserType};

/// Visibility of the area selector, derived from the user type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSelector {
    /// Super administrators (or no user type) are not bound to an area.
    Hidden,
    /// The selector lists entries of one lookup collection.
    Visible(AreaKind),
}

impl AreaSelector {
    pub fn for_user_type(user_type: Option<UserType>) -> Self {
        match user_type.and_then(UserType::area_kind) {
            Some(kind) => AreaSelector::Visible(kind),
            None => AreaSelector::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, AreaSelector::Visible(_))
    }

    /// Options offered by the selector, read straight from the loaded lookups.
    pub fn options(self, lookups: &LookupCollections) -> &[AreaReference] {
        match self {
            AreaSelector::Visible(kind) => lookups.get(kind),
            AreaSelector::Hidden => &[],
        }
    }

    /// Title of the selector: the user type without its "Administrator" suffix.
    pub fn label(self) -> Option<&'static str> {
        match self {
            AreaSelector::Visible(kind) => Some(kind.label()),
            AreaSelector::Hidden => None,
        }
    }
}

/// Steps through the user types, wrapping at both ends.
///
/// With nothing selected, stepping forward lands on the first entry and
/// stepping back on the last.
pub fn step_user_type(current: Option<UserType>, forward: bool) -> UserType {
    let len = UserType::ALL.len();
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(user_type), true) => (user_type.index() + 1) % len,
        (Some(user_type), false) => (user_type.index() + len - 1) % len,
    };
    UserType::ALL[next]
}

/// Steps through `options`, wrapping at both ends. `None` when there is nothing to pick.
pub fn step_area(
    options: &[AreaReference],
    current: Option<&AreaReference>,
    forward: bool,
) -> Option<AreaReference> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let position = current.and_then(|area| options.iter().position(|option| option == area));
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(index), true) => (index + 1) % len,
        (Some(index), false) => (index + len - 1) % len,
    };
    options.get(next).cloned()
}
