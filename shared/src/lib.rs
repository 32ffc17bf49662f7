use serde::{Deserialize, Serialize};

/// Kind of lodging offered by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccommodationKind {
    House,
    Apartment,
}

/// How a reservation was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit card ("TC" on disk)
    Card,
    /// Bank transfer ("PSE" on disk)
    Pse,
}

/// Lifecycle status of a reservation that is still in the active ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Stay has not started yet
    Pending,
    /// Stay is in progress
    Active,
    /// Last night has elapsed but the entry has not been archived yet
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub code: String,
    pub name: String,
    /// Document number of the owning host
    pub host_document: String,
    pub department: String,
    pub municipality: String,
    pub kind: AccommodationKind,
    pub address: String,
    pub nightly_price: f64,
    /// Normalized amenity labels (lowercase, trimmed)
    pub amenities: Vec<String>,
    /// Rating of the owning host, if the host is known
    pub host_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reservation code in format "RES-<sequence>-<4 digits><letter>"
    pub code: String,
    /// First night of the stay (DD/MM/YYYY)
    pub start_date: String,
    pub nights: u32,
    /// Last occupied night (DD/MM/YYYY)
    pub last_night: String,
    /// Morning the guest leaves (DD/MM/YYYY)
    pub checkout_date: String,
    pub accommodation_code: String,
    pub guest_document: String,
    pub payment_method: PaymentMethod,
    /// Date the reservation was paid (DD/MM/YYYY)
    pub payment_date: String,
    /// nightly price * nights
    pub amount: f64,
    /// Free-text note (max 1000 characters)
    pub note: String,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAccommodationsRequest {
    /// Exact, case-sensitive municipality name
    pub municipality: String,
    /// Check-in date (DD/MM/YYYY)
    pub start_date: String,
    pub nights: u32,
    /// Maximum nightly price, no limit when absent
    pub max_price: Option<f64>,
    /// Minimum host rating, no limit when absent
    pub min_host_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAccommodationsResponse {
    pub accommodations: Vec<Accommodation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub accommodation_code: String,
    pub guest_document: String,
    /// Check-in date (DD/MM/YYYY)
    pub start_date: String,
    pub nights: u32,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationResponse {
    pub reservation: Reservation,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelReservationRequest {
    pub code: String,
    /// Document of the guest who owns the reservation
    pub guest_document: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCancelReservationRequest {
    pub code: String,
    /// Document of the host owning the reserved accommodation
    pub host_document: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelReservationResponse {
    /// False when no reservation matched the code and document
    pub cancelled: bool,
    pub reservation: Option<Reservation>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestReservationsResponse {
    pub upcoming: Vec<Reservation>,
    pub past: Vec<Reservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReservationsRequest {
    pub host_document: String,
    /// Inclusive window start (DD/MM/YYYY)
    pub from_date: String,
    /// Inclusive window end (DD/MM/YYYY)
    pub to_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReservationsResponse {
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoverRequest {
    /// New history cutoff (DD/MM/YYYY), must be later than the previous one
    pub cutoff_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoverResponse {
    pub cutoff_date: String,
    pub previous_cutoff: Option<String>,
    /// Number of finished reservations moved to history
    pub archived_count: usize,
    /// Number of reservations left in the active ledger
    pub remaining_count: usize,
    /// Remaining reservations whose stay is in progress
    pub in_progress_count: usize,
    /// Remaining reservations whose stay has not started
    pub upcoming_count: usize,
    pub success_message: String,
}

/// Summary printed by the status binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatusResponse {
    pub data_directory: String,
    pub accommodations: usize,
    pub hosts: usize,
    pub guests: usize,
    pub active_reservations: usize,
    pub archived_reservations: usize,
    pub last_cutoff: Option<String>,
    pub reservation_sequence: u64,
}
