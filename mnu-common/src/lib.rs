//! # MNU Common Library
//!
//! Shared code for the Mkhonto National Union website services:
//! - Form validation schema (affiliation and contact forms)
//! - Data model for stored affiliations and user accounts
//! - Bootstrap configuration loading
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod models;
pub mod schema;
pub mod time;

pub use error::{Error, Result};
pub use models::{AffiliationRecord, NewAffiliation, NewUser, UserAccount};
pub use schema::{FieldError, FieldErrors, FormKind, ValidatedForm};
