//! Contact form validation and persistence
//!
//! A submission is accepted only if every field passes its validator; the
//! accepted email is then remembered under `email` in the persistent
//! namespace as bare text.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use sitestate_core::{keys, ErrorKind};

use crate::store::StoreAdapter;

/// Why a contact submission was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// A required field was blank
    #[error("{0} is required")]
    Missing(&'static str),

    /// Email is not of the form `local@domain.tld`
    #[error("Enter valid email")]
    InvalidEmail,

    /// Phone is not exactly 10 digits
    #[error("Enter valid phone number")]
    InvalidPhone,

    /// Name is too short or has characters other than letters and spaces
    #[error("Enter valid name")]
    InvalidName,

    /// The submission was valid but could not be stored
    #[error("Could not save submission: {0:?}")]
    Storage(ErrorKind),
}

/// `local@domain.tld` with no whitespace and exactly one `@`
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // Some dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Exactly 10 ASCII digits
pub fn validate_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// At least two characters after trimming, letters and whitespace only
pub fn validate_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Non-blank after trimming
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// One contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Visitor's name; optional
    #[serde(default)]
    pub name: String,
    /// Visitor's email; required
    pub email: String,
    /// Visitor's phone number; required
    pub phone: String,
}

impl ContactSubmission {
    /// Check every field, reporting the first problem found
    pub fn validate(&self) -> Result<(), ContactError> {
        if !validate_required(&self.email) {
            return Err(ContactError::Missing("email"));
        }
        if !validate_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        if !validate_required(&self.phone) {
            return Err(ContactError::Missing("phone"));
        }
        if !validate_phone(&self.phone) {
            return Err(ContactError::InvalidPhone);
        }
        if validate_required(&self.name) && !validate_name(&self.name) {
            return Err(ContactError::InvalidName);
        }
        Ok(())
    }
}

/// Accepts contact submissions
#[derive(Debug, Clone)]
pub struct ContactForm {
    store: StoreAdapter,
}

impl ContactForm {
    /// Remember accepted emails in `store` (the persistent namespace)
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    /// Validate `submission` and remember its email
    pub fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        submission.validate()?;
        let saved = self.store.save_text(keys::EMAIL, &submission.email);
        if let Some(kind) = saved.error {
            return Err(ContactError::Storage(kind));
        }
        info!(target: "sitestate::contact", "Form submitted successfully");
        Ok(())
    }

    /// The last accepted email, if any
    pub fn last_email(&self) -> Option<String> {
        self.store.load_text(keys::EMAIL).into_value()
    }
}
