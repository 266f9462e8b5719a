//! Data model for stored records

use serde::{Deserialize, Serialize};

use crate::schema::AffiliationForm;

/// Stored `disability` value when the applicant left the field blank
pub const DISABILITY_NONE: &str = "none";

/// Storage input for a new affiliation, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAffiliation {
    pub name: String,
    pub surname: String,
    pub age: u8,
    pub gender: String,
    pub sector: String,
    pub disability: String,
    pub nationality: String,
    pub province: String,
    pub municipality: String,
    pub ward: String,
    pub qualifications: String,
}

impl From<AffiliationForm> for NewAffiliation {
    /// The one place optional fields receive their defaults:
    /// blank `disability` becomes `"none"`, blank `qualifications` becomes `""`.
    fn from(form: AffiliationForm) -> Self {
        Self {
            name: form.name,
            surname: form.surname,
            age: form.age,
            gender: form.gender,
            sector: form.sector,
            disability: form
                .disability
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DISABILITY_NONE.to_string()),
            nationality: form.nationality,
            province: form.province,
            municipality: form.municipality,
            ward: form.ward,
            qualifications: form.qualifications.unwrap_or_default(),
        }
    }
}

/// An accepted membership application
///
/// `id` and `created_at` are assigned by storage and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliationRecord {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub age: u8,
    pub gender: String,
    pub sector: String,
    pub disability: String,
    pub nationality: String,
    pub province: String,
    pub municipality: String,
    pub ward: String,
    pub qualifications: String,
    /// RFC 3339 UTC timestamp, see [`crate::time::to_record_string`]
    pub created_at: String,
}

impl AffiliationRecord {
    pub fn new(id: u64, new: NewAffiliation, created_at: String) -> Self {
        Self {
            id,
            name: new.name,
            surname: new.surname,
            age: new.age,
            gender: new.gender,
            sector: new.sector,
            disability: new.disability,
            nationality: new.nationality,
            province: new.province,
            municipality: new.municipality,
            ward: new.ward,
            qualifications: new.qualifications,
            created_at,
        }
    }
}

/// Site user account
///
/// Not used by any current route. The password never leaves the process in
/// serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Storage input for a new user account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
