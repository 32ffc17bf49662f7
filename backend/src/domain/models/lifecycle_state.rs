//! backend/src/domain/models/lifecycle_state.rs

use serde::{Deserialize, Serialize};

use crate::domain::calendar::CalendarDate;

/// Scalars that survive restarts alongside the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleState {
    /// Cutoff date of the most recent cutover, if any ran
    pub last_cutoff: Option<CalendarDate>,
    /// Highest sequence number handed out in a reservation code
    pub reservation_sequence: u64,
}

impl LifecycleState {
    /// Whether `cutoff` may be used for the next cutover
    pub fn accepts_cutoff(&self, cutoff: &CalendarDate) -> bool {
        match &self.last_cutoff {
            Some(last) => cutoff > last,
            None => true,
        }
    }
}
