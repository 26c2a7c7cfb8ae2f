//! Data models for the account console.
//!
//! These types mirror what the backend exchanges: the user roles, the
//! geographic/organizational areas a role is scoped to, and the `{id, name}`
//! entries of the lookup collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role assigned to a new account.
///
/// Every role except [`UserType::SuperAdministrator`] is bound to exactly one
/// area of a matching [`AreaKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "Super Administrator")]
    SuperAdministrator,
    #[serde(rename = "Province Administrator")]
    ProvinceAdministrator,
    #[serde(rename = "Division Administrator")]
    DivisionAdministrator,
    #[serde(rename = "District Administrator")]
    DistrictAdministrator,
    #[serde(rename = "Tehsil Administrator")]
    TehsilAdministrator,
    #[serde(rename = "Hospital Administrator")]
    HospitalAdministrator,
}

impl UserType {
    /// All roles, in the order the selector presents them.
    pub const ALL: [UserType; 6] = [
        UserType::SuperAdministrator,
        UserType::ProvinceAdministrator,
        UserType::DivisionAdministrator,
        UserType::DistrictAdministrator,
        UserType::TehsilAdministrator,
        UserType::HospitalAdministrator,
    ];

    /// The literal the backend expects for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::SuperAdministrator => "Super Administrator",
            UserType::ProvinceAdministrator => "Province Administrator",
            UserType::DivisionAdministrator => "Division Administrator",
            UserType::DistrictAdministrator => "District Administrator",
            UserType::TehsilAdministrator => "Tehsil Administrator",
            UserType::HospitalAdministrator => "Hospital Administrator",
        }
    }

    /// The kind of area this role is scoped to, if any.
    pub fn area_kind(self) -> Option<AreaKind> {
        match self {
            UserType::SuperAdministrator => None,
            UserType::ProvinceAdministrator => Some(AreaKind::Province),
            UserType::DivisionAdministrator => Some(AreaKind::Division),
            UserType::DistrictAdministrator => Some(AreaKind::District),
            UserType::TehsilAdministrator => Some(AreaKind::Tehsil),
            UserType::HospitalAdministrator => Some(AreaKind::Hospital),
        }
    }

    /// Position of this role in [`UserType::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five lookup collections served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AreaKind {
    Tehsil,
    Division,
    District,
    Province,
    Hospital,
}

impl AreaKind {
    /// All kinds, in the order their lookups are requested.
    pub const ALL: [AreaKind; 5] = [
        AreaKind::Tehsil,
        AreaKind::Division,
        AreaKind::District,
        AreaKind::Province,
        AreaKind::Hospital,
    ];

    /// URL path segment of the collection.
    pub fn collection(self) -> &'static str {
        match self {
            AreaKind::Tehsil => "tehsil",
            AreaKind::Division => "division",
            AreaKind::District => "district",
            AreaKind::Province => "province",
            AreaKind::Hospital => "hospital",
        }
    }

    /// Human readable label, used as the area selector title.
    pub fn label(self) -> &'static str {
        match self {
            AreaKind::Tehsil => "Tehsil",
            AreaKind::Division => "Division",
            AreaKind::District => "District",
            AreaKind::Province => "Province",
            AreaKind::Hospital => "Hospital",
        }
    }
}

/// A `{id, name}` entry of a lookup collection.
///
/// The id is kept as raw JSON so numeric and string ids round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaReference {
    pub id: Value,
    pub name: String,
}

/// The five lookup collections, loaded together when the dialog opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupCollections {
    pub tehsil: Vec<AreaReference>,
    pub division: Vec<AreaReference>,
    pub district: Vec<AreaReference>,
    pub province: Vec<AreaReference>,
    pub hospital: Vec<AreaReference>,
}

impl LookupCollections {
    pub fn get(&self, kind: AreaKind) -> &[AreaReference] {
        match kind {
            AreaKind::Tehsil => &self.tehsil,
            AreaKind::Division => &self.division,
            AreaKind::District => &self.district,
            AreaKind::Province => &self.province,
            AreaKind::Hospital => &self.hospital,
        }
    }

    pub fn is_empty(&self) -> bool {
        AreaKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

/// Reference to an area by id alone, as the creation endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaId {
    pub id: Value,
}

/// Body of `POST /user/add`.
///
/// At most one of the area fields is populated: the one matching `usertype`.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub first_name: String,
    pub last_name: String,
    pub cnic: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub usertype: UserType,
    pub tehsil: Option<AreaId>,
    pub division: Option<AreaId>,
    pub district: Option<AreaId>,
    pub province: Option<AreaId>,
    pub hospital: Option<AreaId>,
}

impl SubmissionPayload {
    /// The populated area field, if any.
    pub fn area(&self) -> Option<(AreaKind, &AreaId)> {
        AreaKind::ALL
            .into_iter()
            .find_map(|kind| self.area_slot(kind).map(|id| (kind, id)))
    }

    fn area_slot(&self, kind: AreaKind) -> Option<&AreaId> {
        match kind {
            AreaKind::Tehsil => self.tehsil.as_ref(),
            AreaKind::Division => self.division.as_ref(),
            AreaKind::District => self.district.as_ref(),
            AreaKind::Province => self.province.as_ref(),
            AreaKind::Hospital => self.hospital.as_ref(),
        }
    }
}

// Password stays out of logs and assertion output.
impl std::fmt::Debug for SubmissionPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionPayload")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("cnic", &self.cnic)
            .field("email", &self.email)
            .field("contact", &self.contact)
            .field("password", &"[REDACTED]")
            .field("usertype", &self.usertype)
            .field("area", &self.area())
            .finish()
    }
}

#[cfg(test)]
impl AreaReference {
    pub fn new(id: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
impl SubmissionPayload {
    /// Number of populated area fields.
    pub fn populated_areas(&self) -> usize {
        AreaKind::ALL
            .into_iter()
            .filter(|kind| self.area_slot(*kind).is_some())
            .count()
    }
}
