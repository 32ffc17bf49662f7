//! # Storage Traits
//!
//! Persistence seams used by the reservation lifecycle. The domain only sees
//! these traits; `storage::csv` is the flat-file implementation. Dates cross
//! this boundary as `CalendarDate` values and each backend decides how to
//! encode them.

use anyhow::Result;

use crate::domain::calendar::CalendarDate;
use crate::domain::models::accommodation::Accommodation;
use crate::domain::models::catalog::Catalog;
use crate::domain::models::party::{Guest, Host};
use crate::domain::models::reservation::Reservation;

/// Accommodations, hosts and guests
pub trait CatalogStorage: Send + Sync {
    fn load_accommodations(&self) -> Result<Vec<Accommodation>>;

    fn load_hosts(&self) -> Result<Vec<Host>>;

    fn load_guests(&self) -> Result<Vec<Guest>>;

    /// Load the whole catalog in one go
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(Catalog {
            accommodations: self.load_accommodations()?,
            hosts: self.load_hosts()?,
            guests: self.load_guests()?,
        })
    }

    /// Replace the stored catalog (used when seeding a data directory)
    fn store_catalog(&self, catalog: &Catalog) -> Result<()>;
}

/// The active ledger
pub trait ReservationStorage: Send + Sync {
    fn load_ledger(&self) -> Result<Vec<Reservation>>;

    /// Append one reservation to the stored ledger
    fn persist_reservation(&self, reservation: &Reservation) -> Result<()>;

    /// Replace the stored ledger with `ledger`
    fn persist_ledger(&self, ledger: &[Reservation]) -> Result<()>;
}

/// Append-only archive of finished reservations
pub trait HistoryStorage: Send + Sync {
    /// Append one cutover batch. `processed_on` is the day the cutover ran.
    fn persist_history(&self, batch: &[Reservation], cutoff: &CalendarDate, processed_on: &CalendarDate) -> Result<()>;

    /// Every archived reservation, oldest batch first
    fn load_history(&self) -> Result<Vec<Reservation>>;
}

/// Scalars kept between runs: the last cutoff and the code sequence
pub trait LifecycleStateStorage: Send + Sync {
    fn load_last_cutoff(&self) -> Result<Option<CalendarDate>>;

    fn persist_last_cutoff(&self, cutoff: &CalendarDate) -> Result<()>;

    fn load_sequence_counter(&self) -> Result<u64>;

    fn persist_sequence_counter(&self, sequence: u64) -> Result<()>;
}

/// Factory for the repositories of one storage backend
pub trait Connection: Send + Sync + Clone {
    type CatalogRepository: CatalogStorage;
    type ReservationRepository: ReservationStorage;
    type HistoryRepository: HistoryStorage;
    type StateRepository: LifecycleStateStorage;

    fn create_catalog_repository(&self) -> Self::CatalogRepository;

    fn create_reservation_repository(&self) -> Self::ReservationRepository;

    fn create_history_repository(&self) -> Self::HistoryRepository;

    fn create_state_repository(&self) -> Self::StateRepository;
}
