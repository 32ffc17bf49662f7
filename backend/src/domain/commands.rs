//! Command, query and result types passed into and out of the domain services.

pub mod search {
    use crate::domain::calendar::CalendarDate;

    /// Catalog filter. `None` limits are not applied.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SearchCriteria {
        /// Exact, case-sensitive municipality name
        pub municipality: String,
        pub max_price: Option<f64>,
        pub min_host_rating: Option<f64>,
    }

    impl SearchCriteria {
        /// Build criteria from raw limits where a negative value means "no limit"
        pub fn from_raw_limits(municipality: &str, max_price: f64, min_host_rating: f64) -> Self {
            Self {
                municipality: municipality.to_string(),
                max_price: (max_price >= 0.0).then_some(max_price),
                min_host_rating: (min_host_rating >= 0.0).then_some(min_host_rating),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct AvailabilityQuery {
        pub criteria: SearchCriteria,
        pub start_date: CalendarDate,
        pub nights: u32,
    }
}

pub mod reservations {
    use crate::domain::calendar::CalendarDate;
    use crate::domain::models::reservation::{PaymentMethod, Reservation};

    #[derive(Debug, Clone, PartialEq)]
    pub struct CreateReservationCommand {
        pub accommodation_code: String,
        pub guest_document: String,
        pub start_date: CalendarDate,
        pub nights: u32,
        pub payment_method: PaymentMethod,
        pub note: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct HostReservationsQuery {
        pub host_document: String,
        pub from: CalendarDate,
        pub to: CalendarDate,
    }

    /// A guest's ledger entries, each list ordered by start date
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct GuestReservationsResult {
        /// Stays with at least one night not yet elapsed
        pub upcoming: Vec<Reservation>,
        /// Stays whose last night has elapsed but are not archived yet
        pub past: Vec<Reservation>,
    }
}

pub mod cutover {
    use crate::domain::calendar::CalendarDate;
    use crate::domain::models::reservation::Reservation;

    #[derive(Debug, Clone, PartialEq)]
    pub struct CutoverCommand {
        pub cutoff_date: CalendarDate,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct CutoverResult {
        pub cutoff_date: CalendarDate,
        pub previous_cutoff: Option<CalendarDate>,
        /// Entries moved to history by this run
        pub archived: Vec<Reservation>,
        pub remaining_count: usize,
        pub in_progress_count: usize,
        pub upcoming_count: usize,
    }
}
