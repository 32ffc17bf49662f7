//! # CSV Catalog Repository
//!
//! Loads accommodations, hosts and guests from the data directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── accommodations.csv        ← this module
//! ├── hosts.csv                 ← this module
//! ├── guests.csv                ← this module
//! ├── reservations.csv
//! ├── reservation_history.csv
//! └── lifecycle_state.yaml
//! ```
//!
//! ## CSV Format
//!
//! ```text
//! code|name|host_document|department|municipality|kind|address|nightly_price|amenities
//! ALJ001|Casa del Rio|1001|Antioquia|Medellin|C|Calle 10 # 5-20|100000|wifi,piscina
//!
//! code|document|tenure_months|rating
//! ANF01|1001|24|4.5
//!
//! name|document|tenure_months|rating
//! Ana Lopez|2001|6|4.0
//! ```
//!
//! Every row is validated through the domain constructors, so a bad rating or
//! an unknown kind code fails the load instead of producing a half-valid
//! catalog.

use anyhow::{anyhow, Result};
use log::info;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, ACCOMMODATIONS_FILE, GUESTS_FILE, HOSTS_FILE};
use super::file_io::{read_records, write_records_atomic};
use crate::domain::models::accommodation::{Accommodation, NewAccommodation};
use crate::domain::models::catalog::Catalog;
use crate::domain::models::party::{Guest, Host};
use crate::storage::traits::CatalogStorage;

const ACCOMMODATION_HEADER: [&str; 9] = [
    "code",
    "name",
    "host_document",
    "department",
    "municipality",
    "kind",
    "address",
    "nightly_price",
    "amenities",
];
const HOST_HEADER: [&str; 4] = ["code", "document", "tenure_months", "rating"];
const GUEST_HEADER: [&str; 4] = ["name", "document", "tenure_months", "rating"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccommodationRecord {
    code: String,
    name: String,
    host_document: String,
    department: String,
    municipality: String,
    kind: String,
    address: String,
    nightly_price: f64,
    amenities: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HostRecord {
    code: String,
    document: String,
    tenure_months: u32,
    rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GuestRecord {
    name: String,
    document: String,
    tenure_months: u32,
    rating: f64,
}

impl TryFrom<AccommodationRecord> for Accommodation {
    type Error = anyhow::Error;

    fn try_from(record: AccommodationRecord) -> Result<Self> {
        let code = record.code.clone();
        Accommodation::new(NewAccommodation {
            code: record.code,
            name: record.name,
            host_document: record.host_document,
            department: record.department,
            municipality: record.municipality,
            kind_code: record.kind,
            address: record.address,
            nightly_price: record.nightly_price,
            amenities: record.amenities,
        })
        .map_err(|e| anyhow!("Invalid accommodation {}: {}", code, e))
    }
}

impl From<&Accommodation> for AccommodationRecord {
    fn from(accommodation: &Accommodation) -> Self {
        Self {
            code: accommodation.code.clone(),
            name: accommodation.name.clone(),
            host_document: accommodation.host_document.clone(),
            department: accommodation.department.clone(),
            municipality: accommodation.municipality.clone(),
            kind: accommodation.kind.code().to_string(),
            address: accommodation.address.clone(),
            nightly_price: accommodation.nightly_price,
            amenities: accommodation.amenities_as_text(),
        }
    }
}

impl TryFrom<HostRecord> for Host {
    type Error = anyhow::Error;

    fn try_from(record: HostRecord) -> Result<Self> {
        Host::new(&record.code, &record.document, record.tenure_months, record.rating)
            .map_err(|e| anyhow!("Invalid host {}: {}", record.document, e))
    }
}

impl From<&Host> for HostRecord {
    fn from(host: &Host) -> Self {
        Self {
            code: host.code.clone(),
            document: host.document.clone(),
            tenure_months: host.tenure_months,
            rating: host.rating,
        }
    }
}

impl TryFrom<GuestRecord> for Guest {
    type Error = anyhow::Error;

    fn try_from(record: GuestRecord) -> Result<Self> {
        Guest::new(&record.name, &record.document, record.tenure_months, record.rating)
            .map_err(|e| anyhow!("Invalid guest {}: {}", record.document, e))
    }
}

impl From<&Guest> for GuestRecord {
    fn from(guest: &Guest) -> Self {
        Self {
            name: guest.name.clone(),
            document: guest.document.clone(),
            tenure_months: guest.tenure_months,
            rating: guest.rating,
        }
    }
}

#[derive(Clone)]
pub struct CsvCatalogRepository {
    connection: CsvConnection,
}

impl CsvCatalogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

impl CatalogStorage for CsvCatalogRepository {
    fn load_accommodations(&self) -> Result<Vec<Accommodation>> {
        let path = self.connection.file_path(ACCOMMODATIONS_FILE);
        read_records::<AccommodationRecord>(&path)?
            .into_iter()
            .map(Accommodation::try_from)
            .collect()
    }

    fn load_hosts(&self) -> Result<Vec<Host>> {
        let path = self.connection.file_path(HOSTS_FILE);
        read_records::<HostRecord>(&path)?.into_iter().map(Host::try_from).collect()
    }

    fn load_guests(&self) -> Result<Vec<Guest>> {
        let path = self.connection.file_path(GUESTS_FILE);
        read_records::<GuestRecord>(&path)?.into_iter().map(Guest::try_from).collect()
    }

    fn store_catalog(&self, catalog: &Catalog) -> Result<()> {
        let accommodations: Vec<AccommodationRecord> = catalog.accommodations.iter().map(Into::into).collect();
        let hosts: Vec<HostRecord> = catalog.hosts.iter().map(Into::into).collect();
        let guests: Vec<GuestRecord> = catalog.guests.iter().map(Into::into).collect();

        write_records_atomic(&self.connection.file_path(ACCOMMODATIONS_FILE), &ACCOMMODATION_HEADER, &accommodations)?;
        write_records_atomic(&self.connection.file_path(HOSTS_FILE), &HOST_HEADER, &hosts)?;
        write_records_atomic(&self.connection.file_path(GUESTS_FILE), &GUEST_HEADER, &guests)?;

        info!(
            "Stored catalog: {} accommodations, {} hosts, {} guests",
            accommodations.len(),
            hosts.len(),
            guests.len()
        );
        Ok(())
    }
}
