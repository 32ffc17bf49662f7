//! backend/src/domain/models/accommodation.rs

use serde::{Deserialize, Serialize};

/// Kind of lodging. Stored on disk as "C" (house) or "A" (apartment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccommodationKind {
    House,
    Apartment,
}

impl AccommodationKind {
    pub fn code(&self) -> &'static str {
        match self {
            AccommodationKind::House => "C",
            AccommodationKind::Apartment => "A",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, AccommodationValidationError> {
        match code.trim() {
            "C" => Ok(AccommodationKind::House),
            "A" => Ok(AccommodationKind::Apartment),
            other => Err(AccommodationValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A bookable unit owned by exactly one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub code: String,
    pub name: String,
    pub host_document: String,
    pub department: String,
    pub municipality: String,
    pub kind: AccommodationKind,
    pub address: String,
    pub nightly_price: f64,
    pub amenities: Vec<String>,
}

/// Unvalidated accommodation fields as they come from storage or a form
#[derive(Debug, Clone, Default)]
pub struct NewAccommodation {
    pub code: String,
    pub name: String,
    pub host_document: String,
    pub department: String,
    pub municipality: String,
    pub kind_code: String,
    pub address: String,
    pub nightly_price: f64,
    /// Comma-separated amenity list
    pub amenities: String,
}

impl Accommodation {
    pub fn new(fields: NewAccommodation) -> Result<Self, AccommodationValidationError> {
        if fields.code.trim().is_empty() {
            return Err(AccommodationValidationError::EmptyCode);
        }
        if fields.host_document.trim().is_empty() {
            return Err(AccommodationValidationError::MissingHost(fields.code));
        }
        if !fields.nightly_price.is_finite() || fields.nightly_price < 0.0 {
            return Err(AccommodationValidationError::InvalidPrice(fields.nightly_price));
        }
        let kind = AccommodationKind::from_code(&fields.kind_code)?;

        Ok(Self {
            code: fields.code.trim().to_string(),
            name: fields.name,
            host_document: fields.host_document.trim().to_string(),
            department: fields.department,
            municipality: fields.municipality,
            kind,
            address: fields.address,
            nightly_price: fields.nightly_price,
            amenities: parse_amenities(&fields.amenities),
        })
    }

    /// Append a normalized amenity. Blank labels are ignored.
    pub fn add_amenity(&mut self, amenity: &str) {
        if let Some(label) = normalize_amenity(amenity) {
            self.amenities.push(label);
        }
    }

    pub fn amenities_as_text(&self) -> String {
        self.amenities.join(",")
    }

    /// Total charged for a stay of `nights` nights
    pub fn price_for(&self, nights: u32) -> f64 {
        self.nightly_price * nights as f64
    }
}

/// Split a comma-separated amenity list into trimmed, lowercase labels.
/// Empty entries are dropped, duplicates are kept.
pub fn parse_amenities(text: &str) -> Vec<String> {
    text.split(',').filter_map(normalize_amenity).collect()
}

fn normalize_amenity(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccommodationValidationError {
    #[error("Accommodation code cannot be empty")]
    EmptyCode,
    #[error("Accommodation {0} has no host document")]
    MissingHost(String),
    #[error("Nightly price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
    #[error("Unknown accommodation kind '{0}', expected C or A")]
    UnknownKind(String),
}
