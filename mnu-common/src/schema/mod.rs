//! Form validation schema
//!
//! Each submittable form is declared as a table of [`FieldSpec`] descriptors
//! (see [`fields`]). A single generic validator interprets those descriptors
//! against raw JSON input and either yields typed values or a [`FieldErrors`]
//! list. Malformed input is an expected outcome, never a panic.
//!
//! The same descriptor tables are served to the browser so the wizard's
//! step gating runs the identical rule set before anything is submitted.
//! Only the server-side pass may permit a write.

mod fields;
mod forms;
mod validate;


use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use fields::{
    FieldKind, FieldSpec, AFFILIATION_FIELDS, CONTACT_FIELDS, GENDERS, PROVINCES, SECTORS,
};
pub use forms::{
    validate_affiliation, validate_contact, validate_step, AffiliationForm, AffiliationStep,
    ContactForm,
};
pub use validate::{validate_fields, FieldValue, ValidFields};

/// Machine-readable reason a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing, or present with the wrong JSON type
    InvalidType,
    /// Shorter than the minimum length, or below the minimum value
    TooSmall,
    /// Above the maximum value
    TooBig,
    /// Not one of the enumerated options
    InvalidEnumValue,
    /// String present but in the wrong format (email)
    InvalidString,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// Ordered collection of field errors, one per rejected field
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First error reported for `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.for_field(field).is_some()
    }

    /// Keep only the errors whose field is in `fields`
    pub fn retain_fields(&mut self, fields: &[&str]) {
        self.0.retain(|e| fields.contains(&e.field.as_str()));
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// The submittable forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Affiliation,
    Contact,
}

impl FormKind {
    /// Field descriptor table for this form
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Affiliation => AFFILIATION_FIELDS,
            FormKind::Contact => CONTACT_FIELDS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Affiliation => "affiliation",
            FormKind::Contact => "contact",
        }
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "affiliation" => Ok(FormKind::Affiliation),
            "contact" => Ok(FormKind::Contact),
            other => Err(format!("Unknown form: {}", other)),
        }
    }
}

/// A fully-typed, validated submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedForm {
    Affiliation(AffiliationForm),
    Contact(ContactForm),
}

/// Validate raw input for the given form
pub fn validate(kind: FormKind, raw: &Value) -> Result<ValidatedForm, FieldErrors> {
    match kind {
        FormKind::Affiliation => validate_affiliation(raw).map(ValidatedForm::Affiliation),
        FormKind::Contact => validate_contact(raw).map(ValidatedForm::Contact),
    }
}
