//! # UdeAStay Backend
//!
//! Availability and reservation lifecycle engine for a lodging marketplace.
//! The library loads the catalog and active ledger from a data directory,
//! answers availability searches, books and cancels stays, and periodically
//! moves finished stays into an append-only history.
//!
//! Presentation layers talk to it through `io::handlers` using the DTOs in
//! the `shared` crate.

use anyhow::Result;
use log::info;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

pub use config::BackendConfig;
pub use storage::csv::CsvConnection;

use domain::ReservationService;
use shared::BackendStatusResponse;

/// Main backend struct holding the loaded services
pub struct Backend {
    pub config: BackendConfig,
    pub reservation_service: ReservationService<CsvConnection>,
}

impl Backend {
    /// Open the data directory and load catalog, ledger and lifecycle state
    pub fn new(config: BackendConfig) -> Result<Self> {
        info!("Opening data directory {}", config.data_directory.display());
        let csv_conn = Arc::new(CsvConnection::new(&config.data_directory)?);
        let reservation_service = ReservationService::load(csv_conn)?;

        Ok(Self {
            config,
            reservation_service,
        })
    }

    pub fn status(&self) -> Result<BackendStatusResponse> {
        let service = &self.reservation_service;
        let catalog = service.catalog();
        Ok(BackendStatusResponse {
            data_directory: self.config.data_directory.display().to_string(),
            accommodations: catalog.accommodations.len(),
            hosts: catalog.hosts.len(),
            guests: catalog.guests.len(),
            active_reservations: service.ledger().len(),
            archived_reservations: service.archived_reservations()?.len(),
            last_cutoff: service.last_cutoff().map(|d| d.to_string()),
            reservation_sequence: service.reservation_sequence(),
        })
    }
}
