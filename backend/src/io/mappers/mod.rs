pub mod accommodation_mapper;
pub mod reservation_mapper;

pub use accommodation_mapper::AccommodationMapper;
pub use reservation_mapper::ReservationMapper;
