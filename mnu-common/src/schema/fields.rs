//! Field descriptor tables for the affiliation and contact forms

use serde::Serialize;

/// Accepted gender values
pub const GENDERS: &[&str] = &["male", "female", "non-binary", "prefer-not-to-say"];

/// Accepted employment sectors
pub const SECTORS: &[&str] = &["government", "private"];

/// The nine provinces of South Africa
pub const PROVINCES: &[&str] = &[
    "Eastern Cape",
    "Free State",
    "Gauteng",
    "KwaZulu-Natal",
    "Limpopo",
    "Mpumalanga",
    "Northern Cape",
    "North West",
    "Western Cape",
];

/// Constraint kind of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// String with a minimum length in characters
    Text {
        min_len: usize,
        message: &'static str,
    },
    /// Unconstrained string
    FreeText,
    /// Integer in `min..=max`; numeric-looking input is coerced first
    Integer {
        min: i64,
        max: i64,
        min_message: &'static str,
        max_message: &'static str,
    },
    /// One of a fixed set of options
    Choice {
        options: &'static [&'static str],
        empty_message: &'static str,
    },
    /// Email address
    Email { message: &'static str },
}

/// Declarative description of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Wizard step the field belongs to (affiliation form only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u8>,
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            step: None,
        }
    }

    const fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::FreeText,
            required: false,
            step: None,
        }
    }

    const fn on_step(mut self, step: u8) -> Self {
        self.step = Some(step);
        self
    }
}

const fn text(min_len: usize, message: &'static str) -> FieldKind {
    FieldKind::Text { min_len, message }
}

const fn choice(options: &'static [&'static str], empty_message: &'static str) -> FieldKind {
    FieldKind::Choice {
        options,
        empty_message,
    }
}

/// Membership application form
pub const AFFILIATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", text(2, "Name must be at least 2 characters")).on_step(1),
    FieldSpec::required(
        "surname",
        "Surname",
        text(2, "Surname must be at least 2 characters"),
    )
    .on_step(1),
    FieldSpec::required(
        "age",
        "Age",
        FieldKind::Integer {
            min: 18,
            max: 100,
            min_message: "You must be at least 18 years old",
            max_message: "Age must be 100 or less",
        },
    )
    .on_step(1),
    FieldSpec::required("gender", "Gender", choice(GENDERS, "Please select a gender")).on_step(1),
    FieldSpec::required("sector", "Sector", choice(SECTORS, "Please select a sector")).on_step(1),
    FieldSpec::optional("disability", "Disability").on_step(1),
    FieldSpec::required(
        "nationality",
        "Nationality",
        text(2, "Nationality must be at least 2 characters"),
    )
    .on_step(1),
    FieldSpec::required(
        "province",
        "Province",
        choice(PROVINCES, "Please select a province"),
    )
    .on_step(2),
    FieldSpec::required(
        "municipality",
        "Municipality",
        text(2, "Municipality must be at least 2 characters"),
    )
    .on_step(2),
    FieldSpec::required("ward", "Ward", text(1, "Ward is required")).on_step(2),
    FieldSpec::optional("qualifications", "Qualifications").on_step(2),
];

/// Contact form
pub const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", text(2, "Name must be at least 2 characters")),
    FieldSpec::required(
        "email",
        "Email",
        FieldKind::Email {
            message: "Please enter a valid email address",
        },
    ),
    FieldSpec::required(
        "message",
        "Message",
        text(10, "Message must be at least 10 characters"),
    ),
];
