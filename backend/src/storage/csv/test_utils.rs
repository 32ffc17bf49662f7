/// Test utilities for filesystem-backed tests.
///
/// Every `TestEnvironment` lives in its own temporary directory that is
/// removed when the environment is dropped, even if the test panics.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::catalog_repository::CsvCatalogRepository;
use super::connection::CsvConnection;
use super::reservation_repository::CsvReservationRepository;
use crate::domain::calendar::CalendarDate;
use crate::domain::models::accommodation::{Accommodation, NewAccommodation};
use crate::domain::models::catalog::Catalog;
use crate::domain::models::party::{Guest, Host};
use crate::domain::models::reservation::{PaymentMethod, Reservation};
use crate::domain::reservation_service::ReservationService;
use crate::storage::traits::{CatalogStorage, ReservationStorage};

pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// Two hosts, two guests and three accommodations.
    ///
    /// - A1: host H1 (rating 4.5), Medellin, 100 per night
    /// - A2: host H2 (rating 2.0), Medellin, 80 per night
    /// - A3: host H1, Bogota, 150 per night
    pub fn sample_catalog(&self) -> Catalog {
        let accommodation = |code: &str, host: &str, municipality: &str, price: f64, kind: &str| {
            Accommodation::new(NewAccommodation {
                code: code.to_string(),
                name: format!("Alojamiento {}", code),
                host_document: host.to_string(),
                department: "Antioquia".to_string(),
                municipality: municipality.to_string(),
                kind_code: kind.to_string(),
                address: format!("Calle {} # 1-2", code),
                nightly_price: price,
                amenities: "wifi,cocina".to_string(),
            })
            .expect("valid sample accommodation")
        };

        Catalog {
            accommodations: vec![
                accommodation("A1", "H1", "Medellin", 100.0, "C"),
                accommodation("A2", "H2", "Medellin", 80.0, "A"),
                accommodation("A3", "H1", "Bogota", 150.0, "A"),
            ],
            hosts: vec![
                Host::new("ANF1", "H1", 24, 4.5).expect("valid host"),
                Host::new("ANF2", "H2", 3, 2.0).expect("valid host"),
            ],
            guests: vec![
                Guest::new("Ana Lopez", "G1", 6, 4.0).expect("valid guest"),
                Guest::new("Luis Perez", "G2", 12, 3.5).expect("valid guest"),
            ],
        }
    }

    pub fn seed_catalog(&self) -> Result<()> {
        CsvCatalogRepository::new(self.connection.clone()).store_catalog(&self.sample_catalog())
    }

    pub fn seed_ledger(&self, ledger: &[Reservation]) -> Result<()> {
        CsvReservationRepository::new(self.connection.clone()).persist_ledger(ledger)
    }

    pub fn load_service(&self) -> Result<ReservationService<CsvConnection>> {
        ReservationService::load(Arc::new(self.connection.clone()))
    }
}

/// A PSE reservation paid on 01/06/2025 at 100 per night
pub fn sample_reservation(code: &str, accommodation: &str, guest: &str, start: &str, nights: u32) -> Reservation {
    Reservation::new(
        code.to_string(),
        CalendarDate::parse(start).expect("valid start date"),
        nights,
        accommodation.to_string(),
        guest.to_string(),
        PaymentMethod::Pse,
        CalendarDate::new(1, 6, 2025).expect("valid payment date"),
        100.0 * nights as f64,
        "",
    )
    .expect("valid sample reservation")
}
