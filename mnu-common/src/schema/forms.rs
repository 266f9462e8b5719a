//! Typed forms built from validated field values

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{validate_fields, FieldErrors, FieldSpec, ValidFields, AFFILIATION_FIELDS, CONTACT_FIELDS};

/// A validated membership application
///
/// Optional fields stay optional here; defaults are applied when the form is
/// turned into a [`crate::models::NewAffiliation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationForm {
    pub name: String,
    pub surname: String,
    pub age: u8,
    pub gender: String,
    pub sector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
    pub nationality: String,
    pub province: String,
    pub municipality: String,
    pub ward: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
}

/// A validated contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Server-side (authoritative) validation of an affiliation submission
pub fn validate_affiliation(raw: &Value) -> Result<AffiliationForm, FieldErrors> {
    let mut fields = validate_fields(AFFILIATION_FIELDS, raw)?;
    Ok(AffiliationForm {
        name: text(&mut fields, "name"),
        surname: text(&mut fields, "surname"),
        // Range-checked to 18..=100 by the descriptor
        age: fields
            .integer("age")
            .and_then(|n| u8::try_from(n).ok())
            .unwrap_or_default(),
        gender: text(&mut fields, "gender"),
        sector: text(&mut fields, "sector"),
        disability: fields.take_text("disability"),
        nationality: text(&mut fields, "nationality"),
        province: text(&mut fields, "province"),
        municipality: text(&mut fields, "municipality"),
        ward: text(&mut fields, "ward"),
        qualifications: fields.take_text("qualifications"),
    })
}

/// Server-side validation of a contact message
pub fn validate_contact(raw: &Value) -> Result<ContactForm, FieldErrors> {
    let mut fields = validate_fields(CONTACT_FIELDS, raw)?;
    Ok(ContactForm {
        name: text(&mut fields, "name"),
        email: text(&mut fields, "email"),
        message: text(&mut fields, "message"),
    })
}

// Required fields are always present once validation succeeded.
fn text(fields: &mut ValidFields, name: &str) -> String {
    fields.take_text(name).unwrap_or_default()
}

/// Steps of the two-step affiliation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffiliationStep {
    /// Step 1: personal details
    Personal,
    /// Step 2: location and qualifications
    Location,
}

impl AffiliationStep {
    pub fn number(self) -> u8 {
        match self {
            AffiliationStep::Personal => 1,
            AffiliationStep::Location => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(AffiliationStep::Personal),
            2 => Some(AffiliationStep::Location),
            _ => None,
        }
    }

    /// Descriptors of the fields shown on this step
    pub fn fields(self) -> Vec<FieldSpec> {
        AFFILIATION_FIELDS
            .iter()
            .filter(|spec| spec.step == Some(self.number()))
            .copied()
            .collect()
    }

    /// Field names shown on this step
    pub fn field_names(self) -> Vec<&'static str> {
        self.fields().into_iter().map(|spec| spec.name).collect()
    }
}

/// Step gating for the wizard
///
/// Checks only the fields belonging to `step`. Passing this gate lets the
/// user advance; it never authorizes a write.
pub fn validate_step(step: AffiliationStep, raw: &Value) -> Result<(), FieldErrors> {
    validate_fields(&step.fields(), raw).map(|_| ())
}
