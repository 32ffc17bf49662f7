//! Hosts and guests.
//!
//! Both parties are identified by their document number. Credentials are not
//! modelled here; authentication happens outside the engine.

use serde::{Deserialize, Serialize};

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub code: String,
    pub document: String,
    /// Months on the platform
    pub tenure_months: u32,
    /// Score between 0 and 5
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub document: String,
    pub tenure_months: u32,
    pub rating: f64,
}

impl Host {
    pub fn new(code: &str, document: &str, tenure_months: u32, rating: f64) -> Result<Self, PartyValidationError> {
        let document = validate_document(document)?;
        validate_rating(rating)?;
        Ok(Self {
            code: code.trim().to_string(),
            document,
            tenure_months,
            rating,
        })
    }
}

impl Guest {
    pub fn new(name: &str, document: &str, tenure_months: u32, rating: f64) -> Result<Self, PartyValidationError> {
        let document = validate_document(document)?;
        validate_rating(rating)?;
        Ok(Self {
            name: name.trim().to_string(),
            document,
            tenure_months,
            rating,
        })
    }
}

fn validate_document(document: &str) -> Result<String, PartyValidationError> {
    let document = document.trim();
    if document.is_empty() {
        return Err(PartyValidationError::EmptyDocument);
    }
    Ok(document.to_string())
}

fn validate_rating(rating: f64) -> Result<(), PartyValidationError> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(PartyValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PartyValidationError {
    #[error("Document number cannot be empty")]
    EmptyDocument,
    #[error("Rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(f64),
}
