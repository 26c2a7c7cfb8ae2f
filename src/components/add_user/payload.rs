//! Builds the `POST /user/add` body from the form.

use super::form::FormValues;
use crate::models::{AreaId, AreaKind, AreaReference, SubmissionPayload};

/// Assembles the request body.
///
/// Returns `None` when no user type is chosen, or when the user type is scoped
/// to an area and none is selected; validation reports both cases first.
pub fn build_payload(
    values: &FormValues,
    selected_area: Option<&AreaReference>,
) -> Option<SubmissionPayload> {
    let usertype = values.usertype?;
    let area = match usertype.area_kind() {
        Some(kind) => Some((kind, AreaId { id: selected_area?.id.clone() })),
        None => None,
    };
    let slot = |kind: AreaKind| match &area {
        Some((selected, id)) if *selected == kind => Some(id.clone()),
        _ => None,
    };

    Some(SubmissionPayload {
        first_name: values.first_name.clone(),
        last_name: values.last_name.clone(),
        cnic: values.cnic.clone(),
        email: values.email.clone(),
        contact: values.contact.clone(),
        password: values.password.clone(),
        usertype,
        tehsil: slot(AreaKind::Tehsil),
        division: slot(AreaKind::Division),
        district: slot(AreaKind::District),
        province: slot(AreaKind::Province),
        hospital: slot(AreaKind::Hospital),
    })
}
