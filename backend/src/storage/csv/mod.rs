//! # CSV Storage Module
//!
//! Flat-file implementation of the storage traits. One data directory holds
//! the whole system:
//!
//! ```text
//! data/
//! ├── accommodations.csv
//! ├── hosts.csv
//! ├── guests.csv
//! ├── reservations.csv          active ledger
//! ├── reservation_history.csv   append-only archive
//! └── lifecycle_state.yaml      last cutoff + code sequence
//! ```
//!
//! CSV files are `|`-delimited with a header row. Dates are `DD/MM/YYYY`.

pub mod catalog_repository;
pub mod connection;
mod file_io;
pub mod history_repository;
pub mod reservation_repository;
pub mod state_repository;

#[cfg(test)]
pub mod test_utils;

pub use catalog_repository::CsvCatalogRepository;
pub use connection::CsvConnection;
pub use history_repository::CsvHistoryRepository;
pub use reservation_repository::CsvReservationRepository;
pub use state_repository::{CsvStateRepository, LifecycleStateFile};
