use anyhow::Result;
use log::{debug, info};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::catalog_repository::CsvCatalogRepository;
use super::history_repository::CsvHistoryRepository;
use super::reservation_repository::CsvReservationRepository;
use super::state_repository::CsvStateRepository;
use crate::storage::traits::Connection;

pub const ACCOMMODATIONS_FILE: &str = "accommodations.csv";
pub const HOSTS_FILE: &str = "hosts.csv";
pub const GUESTS_FILE: &str = "guests.csv";
pub const RESERVATIONS_FILE: &str = "reservations.csv";
pub const HISTORY_FILE: &str = "reservation_history.csv";
pub const STATE_FILE: &str = "lifecycle_state.yaml";

/// Field delimiter shared by every data file
pub const DELIMITER: u8 = b'|';

/// CsvConnection owns the data directory and knows where each file lives
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Open a data directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            info!("Creating data directory {}", base_path.display());
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Create `file_name` with just a header row if it does not exist yet
    pub fn ensure_file_exists(&self, file_name: &str, header: &[&str]) -> Result<PathBuf> {
        let path = self.file_path(file_name);
        if !path.exists() {
            let separator = (DELIMITER as char).to_string();
            let mut file = File::create(&path)?;
            writeln!(file, "{}", header.join(separator.as_str()))?;
            debug!("Created {} with header", path.display());
        }
        Ok(path)
    }
}

impl Connection for CsvConnection {
    type CatalogRepository = CsvCatalogRepository;
    type ReservationRepository = CsvReservationRepository;
    type HistoryRepository = CsvHistoryRepository;
    type StateRepository = CsvStateRepository;

    fn create_catalog_repository(&self) -> Self::CatalogRepository {
        CsvCatalogRepository::new(self.clone())
    }

    fn create_reservation_repository(&self) -> Self::ReservationRepository {
        CsvReservationRepository::new(self.clone())
    }

    fn create_history_repository(&self) -> Self::HistoryRepository {
        CsvHistoryRepository::new(self.clone())
    }

    fn create_state_repository(&self) -> Self::StateRepository {
        CsvStateRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let connection = CsvConnection::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(connection.file_path(HOSTS_FILE), nested.join("hosts.csv"));
    }

    #[test]
    fn test_ensure_file_exists_keeps_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let path = connection.ensure_file_exists(GUESTS_FILE, &["name", "document"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name|document\n");

        fs::write(&path, "name|document\nAna|1\n").unwrap();
        connection.ensure_file_exists(GUESTS_FILE, &["name", "document"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name|document\nAna|1\n");
    }
}
