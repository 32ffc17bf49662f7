//! # CSV Reservation Repository
//!
//! Active ledger stored in `reservations.csv`:
//!
//! ```text
//! code|start_date|nights|accommodation_code|guest_document|payment_method|payment_date|amount|note
//! RES-7-0412K|10/06/2025|3|ALJ001|2001|TC|01/06/2025|300000.0|Llegamos tarde
//! ```
//!
//! New reservations are appended. Cancellation and cutover replace the whole
//! file through a temp file + rename, so a crash never leaves a half-written
//! ledger.

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, RESERVATIONS_FILE};
use super::file_io::{append_records, read_records, write_records_atomic};
use crate::domain::calendar::CalendarDate;
use crate::domain::models::reservation::{PaymentMethod, Reservation};
use crate::storage::traits::ReservationStorage;

pub(super) const RESERVATION_HEADER: [&str; 9] = [
    "code",
    "start_date",
    "nights",
    "accommodation_code",
    "guest_document",
    "payment_method",
    "payment_date",
    "amount",
    "note",
];

/// One reservation row. Shared with the history file, which uses the same layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ReservationRecord {
    code: String,
    start_date: String,
    nights: u32,
    accommodation_code: String,
    guest_document: String,
    payment_method: String,
    payment_date: String,
    amount: f64,
    note: String,
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = anyhow::Error;

    fn try_from(record: ReservationRecord) -> Result<Self> {
        let code = record.code.clone();
        let start_date = CalendarDate::parse(&record.start_date)
            .map_err(|e| anyhow!("Reservation {}: bad start date: {}", code, e))?;
        let payment_date = CalendarDate::parse(&record.payment_date)
            .map_err(|e| anyhow!("Reservation {}: bad payment date: {}", code, e))?;
        let payment_method = PaymentMethod::from_code(&record.payment_method)
            .map_err(|e| anyhow!("Reservation {}: {}", code, e))?;

        Reservation::new(
            record.code,
            start_date,
            record.nights,
            record.accommodation_code,
            record.guest_document,
            payment_method,
            payment_date,
            record.amount,
            &record.note,
        )
        .map_err(|e| anyhow!("Invalid reservation {}: {}", code, e))
    }
}

impl From<&Reservation> for ReservationRecord {
    fn from(reservation: &Reservation) -> Self {
        Self {
            code: reservation.code.clone(),
            start_date: reservation.start_date.to_string(),
            nights: reservation.nights,
            accommodation_code: reservation.accommodation_code.clone(),
            guest_document: reservation.guest_document.clone(),
            payment_method: reservation.payment_method.code().to_string(),
            payment_date: reservation.payment_date.to_string(),
            amount: reservation.amount,
            note: reservation.note.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CsvReservationRepository {
    connection: CsvConnection,
}

impl CsvReservationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

impl ReservationStorage for CsvReservationRepository {
    fn load_ledger(&self) -> Result<Vec<Reservation>> {
        let path = self.connection.file_path(RESERVATIONS_FILE);
        let ledger = read_records::<ReservationRecord>(&path)?
            .into_iter()
            .map(Reservation::try_from)
            .collect::<Result<Vec<_>>>()?;
        debug!("Loaded {} reservations from {}", ledger.len(), path.display());
        Ok(ledger)
    }

    fn persist_reservation(&self, reservation: &Reservation) -> Result<()> {
        let path = self.connection.ensure_file_exists(RESERVATIONS_FILE, &RESERVATION_HEADER)?;
        append_records(&path, &[ReservationRecord::from(reservation)])?;
        debug!("Appended reservation {} to {}", reservation.code, path.display());
        Ok(())
    }

    fn persist_ledger(&self, ledger: &[Reservation]) -> Result<()> {
        let path = self.connection.file_path(RESERVATIONS_FILE);
        let records: Vec<ReservationRecord> = ledger.iter().map(Into::into).collect();
        write_records_atomic(&path, &RESERVATION_HEADER, &records)?;
        info!("Rewrote ledger with {} reservations", records.len());
        Ok(())
    }
}
