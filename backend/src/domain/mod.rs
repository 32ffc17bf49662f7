//! Domain layer: calendar math, models, availability rules and the
//! reservation lifecycle.

pub mod availability_service;
pub mod calendar;
pub mod commands;
pub mod models;
pub mod reservation_service;

pub use availability_service::AvailabilityService;
pub use calendar::{CalendarDate, DateParseError};
pub use reservation_service::{ReservationError, ReservationService};
