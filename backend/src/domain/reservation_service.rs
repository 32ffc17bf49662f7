//! # Reservation Lifecycle
//!
//! `ReservationService` owns the loaded catalog, the active ledger and the
//! lifecycle state (last cutoff and code sequence), and is the only place
//! that mutates them.
//!
//! Every mutating operation writes to storage first and updates memory only
//! once the writes have succeeded:
//!
//! - **create**: bumps and persists the sequence, appends the reservation,
//!   then adds it to the ledger.
//! - **cancel**: rewrites the stored ledger without the entry, then drops it
//!   from memory. Cancellation is allowed while the start date has not passed.
//! - **cutover**: appends finished stays to history, rewrites the ledger with
//!   the rest and swaps the in-memory ledger, then persists the new cutoff.
//!
//! Operations that depend on the current day have an `*_as_of` variant
//! taking `today` explicitly; the plain variants use the local date.

use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::domain::availability_service::AvailabilityService;
use crate::domain::calendar::CalendarDate;
use crate::domain::commands::cutover::{CutoverCommand, CutoverResult};
use crate::domain::commands::reservations::{CreateReservationCommand, GuestReservationsResult, HostReservationsQuery};
use crate::domain::commands::search::AvailabilityQuery;
use crate::domain::models::accommodation::Accommodation;
use crate::domain::models::catalog::Catalog;
use crate::domain::models::lifecycle_state::LifecycleState;
use crate::domain::models::reservation::{
    validate_nights, Reservation, ReservationStatus, ReservationValidationError,
};
use crate::storage::traits::{
    CatalogStorage, Connection, HistoryStorage, LifecycleStateStorage, ReservationStorage,
};

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Invalid reservation: {0}")]
    Validation(#[from] ReservationValidationError),
    #[error("Accommodation {0} does not exist")]
    UnknownAccommodation(String),
    #[error("Guest {0} is not registered")]
    UnknownGuest(String),
    #[error("Accommodation {accommodation_code} is already booked for {nights} night(s) from {start_date}")]
    AccommodationUnavailable {
        accommodation_code: String,
        start_date: CalendarDate,
        nights: u32,
    },
    #[error("Guest {guest_document} already has a stay overlapping {nights} night(s) from {start_date}")]
    GuestUnavailable {
        guest_document: String,
        start_date: CalendarDate,
        nights: u32,
    },
    #[error("Cutoff {requested} must be later than the previous cutoff {last}")]
    StaleCutoff {
        requested: CalendarDate,
        last: CalendarDate,
    },
    #[error("Reservation {code} started on {start_date} and can no longer be cancelled")]
    AlreadyStarted { code: String, start_date: CalendarDate },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct ReservationService<C: Connection> {
    reservation_repository: C::ReservationRepository,
    history_repository: C::HistoryRepository,
    state_repository: C::StateRepository,
    availability_service: AvailabilityService,
    catalog: Catalog,
    ledger: Vec<Reservation>,
    state: LifecycleState,
}

impl<C: Connection> ReservationService<C> {
    /// Load catalog, ledger and lifecycle state from storage
    pub fn load(connection: Arc<C>) -> Result<Self> {
        let catalog = connection.create_catalog_repository().load_catalog()?;
        let reservation_repository = connection.create_reservation_repository();
        let history_repository = connection.create_history_repository();
        let state_repository = connection.create_state_repository();

        let ledger = reservation_repository.load_ledger()?;
        let last_cutoff = state_repository.load_last_cutoff()?;
        let stored_sequence = state_repository.load_sequence_counter()?;

        // Never hand out a sequence already present in the ledger or history
        let highest_used = ledger
            .iter()
            .chain(history_repository.load_history()?.iter())
            .filter_map(|r| Reservation::parse_code_sequence(&r.code).ok())
            .max()
            .unwrap_or(0);
        if highest_used > stored_sequence {
            warn!(
                "Stored reservation sequence {} is behind codes in use (highest {}), continuing from {}",
                stored_sequence, highest_used, highest_used
            );
        }

        info!(
            "📚 Loaded {} accommodations, {} hosts, {} guests and {} active reservations",
            catalog.accommodations.len(),
            catalog.hosts.len(),
            catalog.guests.len(),
            ledger.len()
        );

        Ok(Self {
            reservation_repository,
            history_repository,
            state_repository,
            availability_service: AvailabilityService::new(),
            catalog,
            ledger,
            state: LifecycleState {
                last_cutoff,
                reservation_sequence: stored_sequence.max(highest_used),
            },
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &[Reservation] {
        &self.ledger
    }

    pub fn last_cutoff(&self) -> Option<CalendarDate> {
        self.state.last_cutoff
    }

    pub fn reservation_sequence(&self) -> u64 {
        self.state.reservation_sequence
    }

    pub fn find_accommodation(&self, code: &str) -> Option<&Accommodation> {
        self.catalog.find_accommodation(code)
    }

    /// Archived reservations, read from history storage
    pub fn archived_reservations(&self) -> Result<Vec<Reservation>> {
        self.history_repository.load_history()
    }

    /// Accommodations matching the query criteria that are free for the whole stay
    pub fn search(&self, query: &AvailabilityQuery) -> Result<Vec<&Accommodation>, ReservationError> {
        validate_nights(query.nights)?;
        Ok(self
            .availability_service
            .search(&self.catalog.accommodations, &self.catalog.hosts, &self.ledger, query))
    }

    pub fn create_reservation(&mut self, command: CreateReservationCommand) -> Result<Reservation, ReservationError> {
        self.create_reservation_as_of(command, CalendarDate::today())
    }

    /// Book a stay. `today` is used as the payment date and to reject past check-ins.
    pub fn create_reservation_as_of(
        &mut self,
        command: CreateReservationCommand,
        today: CalendarDate,
    ) -> Result<Reservation, ReservationError> {
        info!(
            "Creating reservation of {} for guest {} from {} ({} night(s))",
            command.accommodation_code, command.guest_document, command.start_date, command.nights
        );

        validate_nights(command.nights)?;
        if command.start_date.has_elapsed_as_of(&today) {
            return Err(ReservationValidationError::StartInPast(command.start_date).into());
        }

        let accommodation = self
            .catalog
            .find_accommodation(&command.accommodation_code)
            .ok_or_else(|| ReservationError::UnknownAccommodation(command.accommodation_code.clone()))?;
        if self.catalog.find_guest(&command.guest_document).is_none() {
            return Err(ReservationError::UnknownGuest(command.guest_document.clone()));
        }

        if !self
            .availability_service
            .is_free(&accommodation.code, &command.start_date, command.nights, &self.ledger)
        {
            warn!("Accommodation {} is not available from {}", accommodation.code, command.start_date);
            return Err(ReservationError::AccommodationUnavailable {
                accommodation_code: accommodation.code.clone(),
                start_date: command.start_date,
                nights: command.nights,
            });
        }
        if !self
            .availability_service
            .is_guest_free(&command.guest_document, &command.start_date, command.nights, &self.ledger)
        {
            warn!("Guest {} already has a stay around {}", command.guest_document, command.start_date);
            return Err(ReservationError::GuestUnavailable {
                guest_document: command.guest_document.clone(),
                start_date: command.start_date,
                nights: command.nights,
            });
        }

        let amount = accommodation.price_for(command.nights);
        let accommodation_code = accommodation.code.clone();

        let sequence = self.state.reservation_sequence + 1;
        self.state_repository.persist_sequence_counter(sequence)?;
        self.state.reservation_sequence = sequence;

        let code = Reservation::generate_code(sequence, &mut rand::rng());
        let reservation = Reservation::new(
            code,
            command.start_date,
            command.nights,
            accommodation_code,
            command.guest_document,
            command.payment_method,
            today,
            amount,
            &command.note,
        )?;

        self.reservation_repository.persist_reservation(&reservation)?;
        self.ledger.push(reservation.clone());

        info!(
            "✅ Reservation {} created: {} to {}, amount {:.2}",
            reservation.code,
            reservation.start_date,
            reservation.end_of_stay(),
            reservation.amount
        );
        Ok(reservation)
    }

    pub fn cancel_reservation(&mut self, code: &str, guest_document: &str) -> Result<Option<Reservation>, ReservationError> {
        self.cancel_reservation_as_of(code, guest_document, &CalendarDate::today())
    }

    /// Cancel a reservation owned by `guest_document`.
    /// Returns `None` when no entry matches both the code and the guest.
    pub fn cancel_reservation_as_of(
        &mut self,
        code: &str,
        guest_document: &str,
        today: &CalendarDate,
    ) -> Result<Option<Reservation>, ReservationError> {
        let index = self
            .ledger
            .iter()
            .position(|r| r.code == code && r.guest_document == guest_document);

        match index {
            Some(index) => self.remove_reservation(index, today).map(Some),
            None => {
                warn!("No reservation {} found for guest {}", code, guest_document);
                Ok(None)
            }
        }
    }

    pub fn cancel_reservation_for_host(&mut self, code: &str, host_document: &str) -> Result<Option<Reservation>, ReservationError> {
        self.cancel_reservation_for_host_as_of(code, host_document, &CalendarDate::today())
    }

    /// Cancel a reservation on one of `host_document`'s accommodations
    pub fn cancel_reservation_for_host_as_of(
        &mut self,
        code: &str,
        host_document: &str,
        today: &CalendarDate,
    ) -> Result<Option<Reservation>, ReservationError> {
        let index = self
            .ledger
            .iter()
            .position(|r| r.code == code && self.is_hosted_by(r, host_document));

        match index {
            Some(index) => self.remove_reservation(index, today).map(Some),
            None => {
                warn!("No reservation {} found on accommodations of host {}", code, host_document);
                Ok(None)
            }
        }
    }

    fn remove_reservation(&mut self, index: usize, today: &CalendarDate) -> Result<Reservation, ReservationError> {
        let target = &self.ledger[index];
        if target.has_started_as_of(today) {
            warn!("Refusing to cancel {}: stay started on {}", target.code, target.start_date);
            return Err(ReservationError::AlreadyStarted {
                code: target.code.clone(),
                start_date: target.start_date,
            });
        }

        let remaining: Vec<Reservation> = self
            .ledger
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, r)| r.clone())
            .collect();
        self.reservation_repository.persist_ledger(&remaining)?;

        let removed = self.ledger.remove(index);
        info!("🗑️ Cancelled reservation {} for guest {}", removed.code, removed.guest_document);
        Ok(removed)
    }

    /// Reservations a host may still cancel, ordered by start date
    pub fn host_cancellable_reservations_as_of(&self, host_document: &str, today: &CalendarDate) -> Vec<&Reservation> {
        let mut result: Vec<&Reservation> = self
            .ledger
            .iter()
            .filter(|r| self.is_hosted_by(r, host_document))
            .filter(|r| !r.has_started_as_of(today))
            .collect();
        result.sort_by_key(|r| r.start_date);
        result
    }

    /// Host's reservations whose occupied nights intersect `[from, to]`
    pub fn host_reservations(&self, query: &HostReservationsQuery) -> Result<Vec<&Reservation>, ReservationError> {
        if query.to < query.from {
            return Err(ReservationValidationError::InvertedRange {
                from: query.from,
                to: query.to,
            }
            .into());
        }

        let (window_start, window_end) = (query.from.ordinal(), query.to.ordinal());
        let mut result: Vec<&Reservation> = self
            .ledger
            .iter()
            .filter(|r| self.is_hosted_by(r, &query.host_document))
            .filter(|r| {
                let (first, last) = r.occupied_ordinals();
                !(last < window_start || window_end < first)
            })
            .collect();
        result.sort_by_key(|r| r.start_date);
        debug!(
            "Host {} has {} reservation(s) between {} and {}",
            query.host_document,
            result.len(),
            query.from,
            query.to
        );
        Ok(result)
    }

    /// Split a guest's ledger entries into upcoming and past stays
    pub fn guest_reservations_as_of(&self, guest_document: &str, today: &CalendarDate) -> GuestReservationsResult {
        let mut own: Vec<Reservation> = self
            .ledger
            .iter()
            .filter(|r| r.guest_document == guest_document)
            .cloned()
            .collect();
        own.sort_by_key(|r| r.start_date);

        let (past, upcoming) = own.into_iter().partition(|r| r.has_finished_as_of(today));
        GuestReservationsResult { upcoming, past }
    }

    pub fn cutover(&mut self, command: CutoverCommand) -> Result<CutoverResult, ReservationError> {
        self.cutover_as_of(command, &CalendarDate::today())
    }

    /// Move every stay whose last night is before `today` into history and
    /// advance the cutoff marker. The cutoff must be later than the previous one.
    pub fn cutover_as_of(&mut self, command: CutoverCommand, today: &CalendarDate) -> Result<CutoverResult, ReservationError> {
        let cutoff = command.cutoff_date;
        let previous_cutoff = self.state.last_cutoff;

        if let Some(last) = previous_cutoff {
            if !self.state.accepts_cutoff(&cutoff) {
                warn!("Rejected cutover to {}: last cutoff was {}", cutoff, last);
                return Err(ReservationError::StaleCutoff { requested: cutoff, last });
            }
        }

        info!("Running history cutover to {} (today is {})", cutoff, today);

        let (finished, remaining): (Vec<Reservation>, Vec<Reservation>) = self
            .ledger
            .iter()
            .cloned()
            .partition(|r| r.has_finished_as_of(today));

        let in_progress_count = remaining
            .iter()
            .filter(|r| r.status_as_of(today) == ReservationStatus::Active)
            .count();
        let upcoming_count = remaining.len() - in_progress_count;

        if finished.is_empty() {
            info!("No finished reservations to archive");
        } else {
            self.history_repository.persist_history(&finished, &cutoff, today)?;
            if let Err(e) = self.reservation_repository.persist_ledger(&remaining) {
                error!(
                    "History batch for {} was written but the ledger rewrite failed; {} archived entries are still in the ledger: {}",
                    cutoff,
                    finished.len(),
                    e
                );
                return Err(e.into());
            }
            // Stored ledger no longer holds the archived entries
            self.ledger = remaining;
        }

        if let Err(e) = self.state_repository.persist_last_cutoff(&cutoff) {
            error!("Cutover to {} archived its entries but the cutoff marker was not saved: {}", cutoff, e);
            return Err(e.into());
        }
        self.state.last_cutoff = Some(cutoff);

        info!(
            "📦 Cutover to {} archived {} reservation(s); {} remain ({} in progress, {} upcoming)",
            cutoff,
            finished.len(),
            self.ledger.len(),
            in_progress_count,
            upcoming_count
        );

        Ok(CutoverResult {
            cutoff_date: cutoff,
            previous_cutoff,
            archived: finished,
            remaining_count: self.ledger.len(),
            in_progress_count,
            upcoming_count,
        })
    }

    fn is_hosted_by(&self, reservation: &Reservation, host_document: &str) -> bool {
        self.catalog
            .accommodations_of_host(host_document)
            .any(|a| a.code == reservation.accommodation_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::search::SearchCriteria;
    use crate::domain::models::reservation::{PaymentMethod, MAX_NIGHTS};
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::csv::CsvConnection;
    use std::fs;

    fn date(d: u32, m: u32, y: u32) -> CalendarDate {
        CalendarDate::new(d, m, y).unwrap()
    }

    fn today() -> CalendarDate {
        date(1, 6, 2025)
    }

    fn create_test_service() -> (TestEnvironment, ReservationService<CsvConnection>) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        env.seed_catalog().expect("Failed to seed catalog");
        let service = env.load_service().expect("Failed to load service");
        (env, service)
    }

    fn command(accommodation: &str, guest: &str, start: CalendarDate, nights: u32) -> CreateReservationCommand {
        CreateReservationCommand {
            accommodation_code: accommodation.to_string(),
            guest_document: guest.to_string(),
            start_date: start,
            nights,
            payment_method: PaymentMethod::Card,
            note: "Llegamos tarde".to_string(),
        }
    }

    fn ledger_entry(code: &str, accommodation: &str, guest: &str, start: CalendarDate, nights: u32) -> Reservation {
        Reservation::new(
            code.to_string(),
            start,
            nights,
            accommodation.to_string(),
            guest.to_string(),
            PaymentMethod::Pse,
            date(1, 1, 2025),
            100.0 * nights as f64,
            "",
        )
        .unwrap()
    }

    #[test]
    fn test_create_reservation() {
        let (env, mut service) = create_test_service();

        let reservation = service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();

        assert!(reservation.code.starts_with("RES-1-"));
        assert_eq!(reservation.amount, 300.0);
        assert_eq!(reservation.payment_date, today());
        assert_eq!(reservation.note, "Llegamos tarde");
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.reservation_sequence(), 1);

        // persisted before returning
        let reloaded = env.load_service().unwrap();
        assert_eq!(reloaded.ledger(), service.ledger());
        assert_eq!(reloaded.reservation_sequence(), 1);
    }

    #[test]
    fn test_create_reservation_boundary_scenarios() {
        let (_env, mut service) = create_test_service();
        service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();

        // first night equals the existing last night
        let overlapping = service.create_reservation_as_of(command("A1", "G2", date(12, 6, 2025), 2), today());
        assert!(matches!(overlapping, Err(ReservationError::AccommodationUnavailable { .. })));

        // starts on the checkout morning
        let back_to_back = service.create_reservation_as_of(command("A1", "G2", date(13, 6, 2025), 2), today());
        assert!(back_to_back.is_ok());
        assert_eq!(service.ledger().len(), 2);
    }

    #[test]
    fn test_create_reservation_rejects_guest_double_booking() {
        let (_env, mut service) = create_test_service();
        service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();

        let result = service.create_reservation_as_of(command("A2", "G1", date(11, 6, 2025), 1), today());
        assert!(matches!(result, Err(ReservationError::GuestUnavailable { .. })));
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.reservation_sequence(), 1);
    }

    #[test]
    fn test_create_reservation_validation() {
        let (_env, mut service) = create_test_service();

        let zero = service.create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 0), today());
        assert!(matches!(zero, Err(ReservationError::Validation(ReservationValidationError::NoNights))));

        let past = service.create_reservation_as_of(command("A1", "G1", date(31, 5, 2025), 1), today());
        assert!(matches!(past, Err(ReservationError::Validation(ReservationValidationError::StartInPast(_)))));

        let unknown = service.create_reservation_as_of(command("NOPE", "G1", date(10, 6, 2025), 1), today());
        assert!(matches!(unknown, Err(ReservationError::UnknownAccommodation(code)) if code == "NOPE"));

        let stranger = service.create_reservation_as_of(command("A1", "G404", date(10, 6, 2025), 1), today());
        assert!(matches!(stranger, Err(ReservationError::UnknownGuest(_))));

        assert!(service.ledger().is_empty());
        assert_eq!(service.reservation_sequence(), 0);
    }

    #[test]
    fn test_sequence_is_strictly_increasing() {
        let (_env, mut service) = create_test_service();
        let first = service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 1), today())
            .unwrap();
        let second = service
            .create_reservation_as_of(command("A2", "G2", date(10, 6, 2025), 1), today())
            .unwrap();

        let seq_a = Reservation::parse_code_sequence(&first.code).unwrap();
        let seq_b = Reservation::parse_code_sequence(&second.code).unwrap();
        assert_eq!(seq_a, 1);
        assert_eq!(seq_b, 2);
        assert_ne!(first.code, second.code);
    }

    #[test]
    fn test_load_raises_sequence_to_codes_in_use() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[ledger_entry("RES-41-1234A", "A1", "G1", date(10, 6, 2025), 2)])
            .unwrap();

        let mut service = env.load_service().unwrap();
        assert_eq!(service.reservation_sequence(), 41);

        let created = service
            .create_reservation_as_of(command("A2", "G2", date(10, 6, 2025), 1), today())
            .unwrap();
        assert!(created.code.starts_with("RES-42-"));
    }

    #[test]
    fn test_failed_append_leaves_ledger_unchanged() {
        let (env, mut service) = create_test_service();
        // a directory where the ledger file should be makes every write fail
        fs::create_dir(env.base_path.join("reservations.csv")).unwrap();

        let result = service.create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today());
        assert!(matches!(result, Err(ReservationError::Storage(_))));
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_search() {
        let (_env, mut service) = create_test_service();
        service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();

        let query = AvailabilityQuery {
            criteria: SearchCriteria::from_raw_limits("Medellin", -1.0, -1.0),
            start_date: date(11, 6, 2025),
            nights: 2,
        };
        let codes: Vec<&str> = service.search(&query).unwrap().iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["A2"]);
    }

    #[test]
    fn test_search_rejects_out_of_range_nights() {
        let (_env, service) = create_test_service();
        let query = |nights| AvailabilityQuery {
            criteria: SearchCriteria::from_raw_limits("Medellin", -1.0, -1.0),
            start_date: date(10, 6, 2025),
            nights,
        };

        assert!(matches!(
            service.search(&query(0)),
            Err(ReservationError::Validation(ReservationValidationError::NoNights))
        ));
        assert!(matches!(
            service.search(&query(MAX_NIGHTS + 1)),
            Err(ReservationError::Validation(ReservationValidationError::TooManyNights(_)))
        ));
        assert_eq!(service.search(&query(MAX_NIGHTS)).unwrap().len(), 2);
    }

    #[test]
    fn test_create_reservation_rejects_overlong_stay() {
        let (_env, mut service) = create_test_service();
        let result = service.create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), u32::MAX), today());
        assert!(matches!(
            result,
            Err(ReservationError::Validation(ReservationValidationError::TooManyNights(_)))
        ));
        assert_eq!(service.reservation_sequence(), 0);
    }

    #[test]
    fn test_cancel_reservation() {
        let (env, mut service) = create_test_service();
        let created = service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();

        // wrong guest is reported as not found
        assert!(service
            .cancel_reservation_as_of(&created.code, "G2", &today())
            .unwrap()
            .is_none());
        assert!(service
            .cancel_reservation_as_of("RES-999-0000A", "G1", &today())
            .unwrap()
            .is_none());
        assert_eq!(service.ledger().len(), 1);

        let cancelled = service
            .cancel_reservation_as_of(&created.code, "G1", &today())
            .unwrap()
            .unwrap();
        assert_eq!(cancelled.code, created.code);
        assert!(service.ledger().is_empty());
        assert!(env.load_service().unwrap().ledger().is_empty());

        // nights are free again
        assert!(service
            .create_reservation_as_of(command("A1", "G2", date(10, 6, 2025), 3), today())
            .is_ok());
    }

    #[test]
    fn test_cancel_rejects_started_stay() {
        let (_env, mut service) = create_test_service();
        let created = service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();

        // start date itself is still cancellable
        let on_start_day = date(10, 6, 2025);
        let later = date(11, 6, 2025);
        let result = service.cancel_reservation_as_of(&created.code, "G1", &later);
        assert!(matches!(result, Err(ReservationError::AlreadyStarted { .. })));
        assert_eq!(service.ledger().len(), 1);

        assert!(service
            .cancel_reservation_as_of(&created.code, "G1", &on_start_day)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_host_cancellation() {
        let (_env, mut service) = create_test_service();
        let on_h1 = service
            .create_reservation_as_of(command("A1", "G1", date(10, 6, 2025), 3), today())
            .unwrap();
        service
            .create_reservation_as_of(command("A2", "G2", date(10, 6, 2025), 3), today())
            .unwrap();

        let cancellable = service.host_cancellable_reservations_as_of("H1", &today());
        assert_eq!(cancellable.len(), 1);
        assert_eq!(cancellable[0].code, on_h1.code);

        // H2 does not own A1
        assert!(service
            .cancel_reservation_for_host_as_of(&on_h1.code, "H2", &today())
            .unwrap()
            .is_none());
        assert!(service
            .cancel_reservation_for_host_as_of(&on_h1.code, "H1", &today())
            .unwrap()
            .is_some());
        assert_eq!(service.ledger().len(), 1);
    }

    #[test]
    fn test_host_reservations_in_range() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[
            ledger_entry("RES-1-0001A", "A1", "G1", date(10, 6, 2025), 3),
            ledger_entry("RES-2-0002B", "A3", "G2", date(1, 7, 2025), 2),
            ledger_entry("RES-3-0003C", "A2", "G1", date(10, 6, 2025), 3),
        ])
        .unwrap();
        let service = env.load_service().unwrap();

        let query = |from, to| HostReservationsQuery {
            host_document: "H1".to_string(),
            from,
            to,
        };

        let june = service.host_reservations(&query(date(12, 6, 2025), date(30, 6, 2025))).unwrap();
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].code, "RES-1-0001A");

        let summer = service.host_reservations(&query(date(1, 6, 2025), date(31, 7, 2025))).unwrap();
        assert_eq!(summer.len(), 2);

        let gap = service.host_reservations(&query(date(13, 6, 2025), date(30, 6, 2025))).unwrap();
        assert!(gap.is_empty());

        let inverted = service.host_reservations(&query(date(30, 6, 2025), date(1, 6, 2025)));
        assert!(matches!(
            inverted,
            Err(ReservationError::Validation(ReservationValidationError::InvertedRange { .. }))
        ));
    }

    #[test]
    fn test_guest_reservations_split() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[
            ledger_entry("RES-2-0002B", "A2", "G1", date(20, 6, 2025), 2),
            ledger_entry("RES-1-0001A", "A1", "G1", date(1, 5, 2025), 3),
            ledger_entry("RES-3-0003C", "A1", "G2", date(20, 6, 2025), 3),
        ])
        .unwrap();
        let service = env.load_service().unwrap();

        let result = service.guest_reservations_as_of("G1", &today());
        assert_eq!(result.past.len(), 1);
        assert_eq!(result.past[0].code, "RES-1-0001A");
        assert_eq!(result.upcoming.len(), 1);
        assert_eq!(result.upcoming[0].code, "RES-2-0002B");
    }

    #[test]
    fn test_cutover_archives_finished_stays() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[
            ledger_entry("RES-1-0001A", "A1", "G1", date(1, 6, 2025), 3),
            ledger_entry("RES-2-0002B", "A2", "G2", date(10, 6, 2025), 3),
            ledger_entry("RES-3-0003C", "A1", "G2", date(20, 6, 2025), 2),
        ])
        .unwrap();
        let mut service = env.load_service().unwrap();
        let run_day = date(12, 6, 2025);

        let result = service
            .cutover_as_of(CutoverCommand { cutoff_date: date(15, 6, 2025) }, &run_day)
            .unwrap();

        assert_eq!(result.archived.len(), 1);
        assert_eq!(result.archived[0].code, "RES-1-0001A");
        assert_eq!(result.remaining_count, 2);
        assert_eq!(result.in_progress_count, 1);
        assert_eq!(result.upcoming_count, 1);
        assert_eq!(result.previous_cutoff, None);
        assert_eq!(service.last_cutoff(), Some(date(15, 6, 2025)));

        let reloaded = env.load_service().unwrap();
        assert_eq!(reloaded.ledger().len(), 2);
        assert_eq!(reloaded.last_cutoff(), Some(date(15, 6, 2025)));
        let archived = reloaded.archived_reservations().unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0], result.archived[0]);
    }

    #[test]
    fn test_cutover_rejects_stale_cutoff_without_mutation() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[ledger_entry("RES-1-0001A", "A1", "G1", date(1, 5, 2025), 3)])
            .unwrap();
        let mut service = env.load_service().unwrap();

        service
            .cutover_as_of(CutoverCommand { cutoff_date: date(15, 6, 2025) }, &date(1, 5, 2025))
            .unwrap();
        assert_eq!(service.ledger().len(), 1);

        for stale in [date(15, 6, 2025), date(1, 6, 2025)] {
            let result = service.cutover_as_of(CutoverCommand { cutoff_date: stale }, &today());
            assert!(matches!(result, Err(ReservationError::StaleCutoff { .. })));
        }
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.last_cutoff(), Some(date(15, 6, 2025)));
        assert!(service.archived_reservations().unwrap().is_empty());
    }

    #[test]
    fn test_cutover_is_idempotent_on_same_day() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[
            ledger_entry("RES-1-0001A", "A1", "G1", date(1, 5, 2025), 3),
            ledger_entry("RES-2-0002B", "A2", "G2", date(10, 6, 2025), 3),
        ])
        .unwrap();
        let mut service = env.load_service().unwrap();

        let first = service
            .cutover_as_of(CutoverCommand { cutoff_date: date(1, 6, 2025) }, &today())
            .unwrap();
        assert_eq!(first.archived.len(), 1);

        let second = service
            .cutover_as_of(CutoverCommand { cutoff_date: date(2, 6, 2025) }, &today())
            .unwrap();
        assert!(second.archived.is_empty());
        assert_eq!(second.previous_cutoff, Some(date(1, 6, 2025)));
        assert_eq!(service.last_cutoff(), Some(date(2, 6, 2025)));
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.archived_reservations().unwrap().len(), 1);
    }

    #[test]
    fn test_cutover_with_unsaved_cutoff_does_not_archive_twice() {
        let env = TestEnvironment::new().unwrap();
        env.seed_catalog().unwrap();
        env.seed_ledger(&[ledger_entry("RES-1-0001A", "A1", "G1", date(1, 5, 2025), 3)])
            .unwrap();
        let mut service = env.load_service().unwrap();

        // a directory at the temp path makes the state file write fail
        let blocker = env.base_path.join("lifecycle_state.tmp");
        fs::create_dir(&blocker).unwrap();
        let failed = service.cutover_as_of(CutoverCommand { cutoff_date: date(1, 6, 2025) }, &today());
        assert!(matches!(failed, Err(ReservationError::Storage(_))));

        // archived entries left the ledger even though the cutoff was not recorded
        assert!(service.ledger().is_empty());
        assert_eq!(service.last_cutoff(), None);
        assert!(env.load_service().unwrap().ledger().is_empty());

        fs::remove_dir(&blocker).unwrap();
        let retried = service
            .cutover_as_of(CutoverCommand { cutoff_date: date(1, 6, 2025) }, &today())
            .unwrap();
        assert!(retried.archived.is_empty());
        assert_eq!(service.last_cutoff(), Some(date(1, 6, 2025)));

        let archived = service.archived_reservations().unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].code, "RES-1-0001A");
    }
}
