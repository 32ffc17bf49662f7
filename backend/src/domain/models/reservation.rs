//! backend/src/domain/models/reservation.rs
//!
//! A reservation occupies the nights `[start_date, end_of_stay]` of one
//! accommodation for one guest. Only the active ledger holds `Reservation`
//! values; once a cutover moves an entry to history it is never touched again.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::calendar::CalendarDate;

/// Longest note kept on a reservation, in characters
pub const MAX_NOTE_CHARS: usize = 1000;

/// Longest stay that can be booked or searched, in nights
pub const MAX_NIGHTS: u32 = 365;

const CODE_PREFIX: &str = "RES";

/// Payment method. Stored on disk as "TC" (card) or "PSE"; the single-letter
/// tags "T" and "P" are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    Pse,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "TC",
            PaymentMethod::Pse => "PSE",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ReservationValidationError> {
        match code.trim() {
            "TC" | "T" => Ok(PaymentMethod::Card),
            "PSE" | "P" => Ok(PaymentMethod::Pse),
            other => Err(ReservationValidationError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Where a ledger entry stands relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub code: String,
    pub start_date: CalendarDate,
    pub nights: u32,
    pub accommodation_code: String,
    pub guest_document: String,
    pub payment_method: PaymentMethod,
    pub payment_date: CalendarDate,
    pub amount: f64,
    pub note: String,
}

impl Reservation {
    /// Build a reservation, enforcing `1 <= nights <= MAX_NIGHTS`, a non-negative
    /// amount and the note length cap (longer notes are truncated).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: String,
        start_date: CalendarDate,
        nights: u32,
        accommodation_code: String,
        guest_document: String,
        payment_method: PaymentMethod,
        payment_date: CalendarDate,
        amount: f64,
        note: &str,
    ) -> Result<Self, ReservationValidationError> {
        validate_nights(nights)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(ReservationValidationError::InvalidAmount(amount));
        }
        if code.trim().is_empty() {
            return Err(ReservationValidationError::EmptyCode);
        }
        if accommodation_code.trim().is_empty() || guest_document.trim().is_empty() {
            return Err(ReservationValidationError::MissingParty);
        }

        Ok(Self {
            code,
            start_date,
            nights,
            accommodation_code,
            guest_document,
            payment_method,
            payment_date,
            amount,
            note: truncate_note(note),
        })
    }

    /// Build a reservation code: `RES-<sequence>-<4 digits><A-Z>`.
    /// The sequence guarantees uniqueness; the suffix is cosmetic.
    pub fn generate_code<R: Rng>(sequence: u64, rng: &mut R) -> String {
        let digits: u32 = rng.random_range(0..10_000);
        let letter = char::from(b'A' + rng.random_range(0..26u8));
        format!("{}-{}-{:04}{}", CODE_PREFIX, sequence, digits, letter)
    }

    /// Extract the sequence number from a reservation code
    pub fn parse_code_sequence(code: &str) -> Result<u64, String> {
        let mut parts = code.trim().splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(CODE_PREFIX), Some(sequence), Some(suffix)) if suffix.len() == 5 => sequence
                .parse::<u64>()
                .map_err(|_| format!("Invalid sequence in reservation code: {}", code)),
            _ => Err(format!("Invalid reservation code format: {}", code)),
        }
    }

    /// Last occupied night
    pub fn end_of_stay(&self) -> CalendarDate {
        self.start_date.end_of_stay(self.nights)
    }

    /// Morning the guest leaves
    pub fn checkout_date(&self) -> CalendarDate {
        self.start_date.add_days(self.nights)
    }

    /// Inclusive ordinal interval of occupied nights
    pub fn occupied_ordinals(&self) -> (i64, i64) {
        let first = self.start_date.ordinal();
        (first, first + self.nights as i64 - 1)
    }

    /// True once every night of the stay is strictly before `today`
    pub fn has_finished_as_of(&self, today: &CalendarDate) -> bool {
        self.end_of_stay().ordinal() < today.ordinal()
    }

    pub fn has_started_as_of(&self, today: &CalendarDate) -> bool {
        self.start_date.has_elapsed_as_of(today)
    }

    pub fn status_as_of(&self, today: &CalendarDate) -> ReservationStatus {
        if self.has_finished_as_of(today) {
            ReservationStatus::Completed
        } else if self.start_date <= *today {
            ReservationStatus::Active
        } else {
            ReservationStatus::Pending
        }
    }
}

/// Stay length check shared by booking and search
pub fn validate_nights(nights: u32) -> Result<(), ReservationValidationError> {
    match nights {
        0 => Err(ReservationValidationError::NoNights),
        n if n > MAX_NIGHTS => Err(ReservationValidationError::TooManyNights(n)),
        _ => Ok(()),
    }
}

fn truncate_note(note: &str) -> String {
    note.chars().take(MAX_NOTE_CHARS).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ReservationValidationError {
    #[error("A reservation must cover at least one night")]
    NoNights,
    #[error("A stay cannot exceed {max} nights, got {0}", max = MAX_NIGHTS)]
    TooManyNights(u32),
    #[error("Amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
    #[error("Reservation code cannot be empty")]
    EmptyCode,
    #[error("Reservation must reference an accommodation and a guest")]
    MissingParty,
    #[error("Unknown payment method '{0}', expected TC or PSE")]
    UnknownPaymentMethod(String),
    #[error("Check-in date {0} has already passed")]
    StartInPast(CalendarDate),
    #[error("Range end {to} is before range start {from}")]
    InvertedRange { from: CalendarDate, to: CalendarDate },
}
