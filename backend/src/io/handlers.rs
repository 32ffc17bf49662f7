//! Entry points for the presentation layer.
//!
//! Each handler takes a `shared` request, maps it into domain commands, calls
//! the reservation service and maps the outcome back. Failures come back as
//! user-facing strings.

use log::{info, warn};

use shared::{
    CancelReservationRequest, CancelReservationResponse, CreateReservationRequest, CreateReservationResponse,
    CutoverRequest, CutoverResponse, GuestReservationsResponse, HostCancelReservationRequest,
    HostReservationsRequest, HostReservationsResponse, SearchAccommodationsRequest,
    SearchAccommodationsResponse,
};

use super::mappers::{AccommodationMapper, ReservationMapper};
use crate::domain::calendar::CalendarDate;
use crate::domain::commands::cutover::CutoverCommand;
use crate::domain::commands::reservations::HostReservationsQuery;
use crate::domain::models::reservation::Reservation;
use crate::Backend;

pub fn search_accommodations(
    backend: &Backend,
    request: SearchAccommodationsRequest,
) -> Result<SearchAccommodationsResponse, String> {
    let query = ReservationMapper::search_request_to_query(request).map_err(|e| e.to_string())?;
    let service = &backend.reservation_service;
    let found = service
        .search(&query)
        .map_err(|e| format!("Search failed: {}", e))?;
    info!("Search returned {} accommodation(s)", found.len());

    Ok(SearchAccommodationsResponse {
        accommodations: AccommodationMapper::to_dto_list(&found, service.catalog()),
    })
}

pub fn get_accommodation(backend: &Backend, code: &str) -> Option<shared::Accommodation> {
    let service = &backend.reservation_service;
    service
        .find_accommodation(code)
        .map(|a| AccommodationMapper::to_dto(a, service.catalog()))
}

pub fn create_reservation(
    backend: &mut Backend,
    request: CreateReservationRequest,
) -> Result<CreateReservationResponse, String> {
    let command = ReservationMapper::create_request_to_command(request).map_err(|e| e.to_string())?;
    let reservation = backend
        .reservation_service
        .create_reservation(command)
        .map_err(|e| format!("Failed to create reservation: {}", e))?;

    let today = CalendarDate::today();
    let success_message = format!(
        "Reservation {} confirmed from {} to {} ({:.2})",
        reservation.code,
        reservation.start_date.format_long(),
        reservation.end_of_stay().format_long(),
        reservation.amount
    );
    Ok(CreateReservationResponse {
        reservation: ReservationMapper::to_dto(&reservation, &today),
        success_message,
    })
}

pub fn cancel_reservation(
    backend: &mut Backend,
    request: CancelReservationRequest,
) -> Result<CancelReservationResponse, String> {
    let outcome = backend
        .reservation_service
        .cancel_reservation(&request.code, &request.guest_document)
        .map_err(|e| format!("Failed to cancel reservation: {}", e))?;
    Ok(cancel_response(&request.code, outcome))
}

pub fn cancel_reservation_as_host(
    backend: &mut Backend,
    request: HostCancelReservationRequest,
) -> Result<CancelReservationResponse, String> {
    let outcome = backend
        .reservation_service
        .cancel_reservation_for_host(&request.code, &request.host_document)
        .map_err(|e| format!("Failed to cancel reservation: {}", e))?;
    Ok(cancel_response(&request.code, outcome))
}

fn cancel_response(code: &str, outcome: Option<Reservation>) -> CancelReservationResponse {
    let today = CalendarDate::today();
    match outcome {
        Some(reservation) => CancelReservationResponse {
            cancelled: true,
            message: format!("Reservation {} cancelled", reservation.code),
            reservation: Some(ReservationMapper::to_dto(&reservation, &today)),
        },
        None => {
            warn!("Cancellation requested for unknown reservation {}", code);
            CancelReservationResponse {
                cancelled: false,
                message: format!("Reservation {} not found", code),
                reservation: None,
            }
        }
    }
}

pub fn guest_reservations(backend: &Backend, guest_document: &str) -> GuestReservationsResponse {
    let today = CalendarDate::today();
    let result = backend
        .reservation_service
        .guest_reservations_as_of(guest_document, &today);
    ReservationMapper::guest_result_to_dto(&result, &today)
}

pub fn host_reservations(
    backend: &Backend,
    request: HostReservationsRequest,
) -> Result<HostReservationsResponse, String> {
    let query = HostReservationsQuery {
        host_document: request.host_document,
        from: CalendarDate::parse(&request.from_date).map_err(|e| e.to_string())?,
        to: CalendarDate::parse(&request.to_date).map_err(|e| e.to_string())?,
    };
    let reservations = backend
        .reservation_service
        .host_reservations(&query)
        .map_err(|e| e.to_string())?;

    Ok(HostReservationsResponse {
        reservations: ReservationMapper::to_dto_list(reservations, &CalendarDate::today()),
    })
}

/// Reservations on the host's accommodations that can still be cancelled
pub fn host_cancellable_reservations(backend: &Backend, host_document: &str) -> HostReservationsResponse {
    let today = CalendarDate::today();
    let reservations = backend
        .reservation_service
        .host_cancellable_reservations_as_of(host_document, &today);
    HostReservationsResponse {
        reservations: ReservationMapper::to_dto_list(reservations, &today),
    }
}

pub fn run_cutover(backend: &mut Backend, request: CutoverRequest) -> Result<CutoverResponse, String> {
    let cutoff_date = CalendarDate::parse(&request.cutoff_date).map_err(|e| e.to_string())?;
    let result = backend
        .reservation_service
        .cutover(CutoverCommand { cutoff_date })
        .map_err(|e| format!("Cutover failed: {}", e))?;
    Ok(ReservationMapper::cutover_result_to_dto(&result))
}
