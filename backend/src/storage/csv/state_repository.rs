//! # Lifecycle State Repository
//!
//! Keeps the scalars that must survive restarts in `lifecycle_state.yaml`.
//!
//! ## YAML Format
//!
//! ```yaml
//! last_cutoff: "15/06/2025"
//! reservation_sequence: 42
//! data_format_version: "1.0"
//! created_at: "2025-06-01T09:30:00Z"
//! updated_at: "2025-06-16T08:00:00Z"
//! ```
//!
//! `last_cutoff` is absent until the first cutover runs.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::{CsvConnection, STATE_FILE};
use crate::domain::calendar::CalendarDate;
use crate::storage::traits::LifecycleStateStorage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleStateFile {
    #[serde(default)]
    pub last_cutoff: Option<CalendarDate>,
    #[serde(default)]
    pub reservation_sequence: u64,
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for LifecycleStateFile {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            last_cutoff: None,
            reservation_sequence: 0,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Clone)]
pub struct CsvStateRepository {
    connection: CsvConnection,
}

impl CsvStateRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn state_path(&self) -> PathBuf {
        self.connection.file_path(STATE_FILE)
    }

    /// Load the state file, creating a default one if it does not exist
    pub fn load_or_create(&self) -> Result<LifecycleStateFile> {
        let path = self.state_path();

        if path.exists() {
            let yaml_content = fs::read_to_string(&path)?;
            let state: LifecycleStateFile = serde_yaml::from_str(&yaml_content)?;
            debug!("Loaded lifecycle state from {:?}", path);
            Ok(state)
        } else {
            let state = LifecycleStateFile::default();
            self.save(&state)?;
            info!("Created default lifecycle state at {:?}", path);
            Ok(state)
        }
    }

    fn save(&self, state: &LifecycleStateFile) -> Result<()> {
        let path = self.state_path();
        let yaml_content = serde_yaml::to_string(state)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved lifecycle state to {:?}", path);
        Ok(())
    }

    fn update<F: FnOnce(&mut LifecycleStateFile)>(&self, change: F) -> Result<()> {
        let mut state = self.load_or_create()?;
        change(&mut state);
        state.updated_at = Utc::now().to_rfc3339();
        self.save(&state)
    }
}

impl LifecycleStateStorage for CsvStateRepository {
    fn load_last_cutoff(&self) -> Result<Option<CalendarDate>> {
        Ok(self.load_or_create()?.last_cutoff)
    }

    fn persist_last_cutoff(&self, cutoff: &CalendarDate) -> Result<()> {
        let cutoff = *cutoff;
        self.update(|state| state.last_cutoff = Some(cutoff))?;
        info!("Recorded history cutoff {}", cutoff);
        Ok(())
    }

    fn load_sequence_counter(&self) -> Result<u64> {
        Ok(self.load_or_create()?.reservation_sequence)
    }

    fn persist_sequence_counter(&self, sequence: u64) -> Result<()> {
        self.update(|state| state.reservation_sequence = sequence)
    }
}
