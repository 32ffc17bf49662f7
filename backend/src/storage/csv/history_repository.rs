//! # CSV History Repository
//!
//! Append-only archive in `reservation_history.csv`. Rows use the ledger
//! layout; each cutover batch is wrapped in comment lines:
//!
//! ```text
//! code|start_date|nights|accommodation_code|guest_document|payment_method|payment_date|amount|note
//! # === HISTORY UPDATE ===
//! # processed on: 16/06/2025
//! # cutoff date: 15/06/2025
//! # reservations moved: 2
//! RES-1-0412K|01/06/2025|3|ALJ001|2001|TC|20/05/2025|300000.0|
//! RES-4-7781B|05/06/2025|2|ALJ002|2002|PSE|21/05/2025|160000.0|
//! # === END HISTORY UPDATE ===
//! ```

use anyhow::Result;
use log::info;

use super::connection::{CsvConnection, HISTORY_FILE};
use super::file_io::{append_comment_lines, append_records, read_records};
use super::reservation_repository::{ReservationRecord, RESERVATION_HEADER};
use crate::domain::calendar::CalendarDate;
use crate::domain::models::reservation::Reservation;
use crate::storage::traits::HistoryStorage;

#[derive(Clone)]
pub struct CsvHistoryRepository {
    connection: CsvConnection,
}

impl CsvHistoryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

impl HistoryStorage for CsvHistoryRepository {
    fn persist_history(&self, batch: &[Reservation], cutoff: &CalendarDate, processed_on: &CalendarDate) -> Result<()> {
        let path = self.connection.ensure_file_exists(HISTORY_FILE, &RESERVATION_HEADER)?;

        append_comment_lines(
            &path,
            &[
                "=== HISTORY UPDATE ===".to_string(),
                format!("processed on: {}", processed_on),
                format!("cutoff date: {}", cutoff),
                format!("reservations moved: {}", batch.len()),
            ],
        )?;
        let records: Vec<ReservationRecord> = batch.iter().map(Into::into).collect();
        append_records(&path, &records)?;
        append_comment_lines(&path, &["=== END HISTORY UPDATE ===".to_string()])?;

        info!("Archived {} reservation(s) to {} (cutoff {})", batch.len(), path.display(), cutoff);
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<Reservation>> {
        let path = self.connection.file_path(HISTORY_FILE);
        read_records::<ReservationRecord>(&path)?
            .into_iter()
            .map(Reservation::try_from)
            .collect()
    }
}
