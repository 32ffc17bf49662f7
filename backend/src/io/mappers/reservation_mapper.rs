use shared::{
    CreateReservationRequest, CutoverResponse, GuestReservationsResponse, PaymentMethod as PaymentMethodDto,
    Reservation as ReservationDto, ReservationStatus as ReservationStatusDto, SearchAccommodationsRequest,
};

use crate::domain::calendar::{CalendarDate, DateParseError};
use crate::domain::commands::cutover::CutoverResult;
use crate::domain::commands::reservations::{CreateReservationCommand, GuestReservationsResult};
use crate::domain::commands::search::{AvailabilityQuery, SearchCriteria};
use crate::domain::models::reservation::{PaymentMethod, Reservation, ReservationStatus};

pub struct ReservationMapper;

impl ReservationMapper {
    pub fn payment_method_to_domain(dto: PaymentMethodDto) -> PaymentMethod {
        match dto {
            PaymentMethodDto::Card => PaymentMethod::Card,
            PaymentMethodDto::Pse => PaymentMethod::Pse,
        }
    }

    pub fn payment_method_to_dto(domain: PaymentMethod) -> PaymentMethodDto {
        match domain {
            PaymentMethod::Card => PaymentMethodDto::Card,
            PaymentMethod::Pse => PaymentMethodDto::Pse,
        }
    }

    pub fn status_to_dto(domain: ReservationStatus) -> ReservationStatusDto {
        match domain {
            ReservationStatus::Pending => ReservationStatusDto::Pending,
            ReservationStatus::Active => ReservationStatusDto::Active,
            ReservationStatus::Completed => ReservationStatusDto::Completed,
        }
    }

    /// Convert a ledger entry, deriving its status relative to `today`
    pub fn to_dto(domain: &Reservation, today: &CalendarDate) -> ReservationDto {
        ReservationDto {
            code: domain.code.clone(),
            start_date: domain.start_date.to_string(),
            nights: domain.nights,
            last_night: domain.end_of_stay().to_string(),
            checkout_date: domain.checkout_date().to_string(),
            accommodation_code: domain.accommodation_code.clone(),
            guest_document: domain.guest_document.clone(),
            payment_method: Self::payment_method_to_dto(domain.payment_method),
            payment_date: domain.payment_date.to_string(),
            amount: domain.amount,
            note: domain.note.clone(),
            status: Self::status_to_dto(domain.status_as_of(today)),
        }
    }

    pub fn to_dto_list<'a, I>(domain: I, today: &CalendarDate) -> Vec<ReservationDto>
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        domain.into_iter().map(|r| Self::to_dto(r, today)).collect()
    }

    pub fn create_request_to_command(request: CreateReservationRequest) -> Result<CreateReservationCommand, DateParseError> {
        Ok(CreateReservationCommand {
            accommodation_code: request.accommodation_code,
            guest_document: request.guest_document,
            start_date: CalendarDate::parse(&request.start_date)?,
            nights: request.nights,
            payment_method: Self::payment_method_to_domain(request.payment_method),
            note: request.note.unwrap_or_default(),
        })
    }

    pub fn search_request_to_query(request: SearchAccommodationsRequest) -> Result<AvailabilityQuery, DateParseError> {
        Ok(AvailabilityQuery {
            criteria: SearchCriteria {
                municipality: request.municipality,
                max_price: request.max_price.filter(|p| *p >= 0.0),
                min_host_rating: request.min_host_rating.filter(|r| *r >= 0.0),
            },
            start_date: CalendarDate::parse(&request.start_date)?,
            nights: request.nights,
        })
    }

    pub fn guest_result_to_dto(result: &GuestReservationsResult, today: &CalendarDate) -> GuestReservationsResponse {
        GuestReservationsResponse {
            upcoming: Self::to_dto_list(&result.upcoming, today),
            past: Self::to_dto_list(&result.past, today),
        }
    }

    pub fn cutover_result_to_dto(result: &CutoverResult) -> CutoverResponse {
        CutoverResponse {
            cutoff_date: result.cutoff_date.to_string(),
            previous_cutoff: result.previous_cutoff.map(|d| d.to_string()),
            archived_count: result.archived.len(),
            remaining_count: result.remaining_count,
            in_progress_count: result.in_progress_count,
            upcoming_count: result.upcoming_count,
            success_message: format!(
                "History updated to {}: {} reservation(s) archived",
                result.cutoff_date,
                result.archived.len()
            ),
        }
    }
}
