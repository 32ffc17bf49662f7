pub mod accommodation;
pub mod catalog;
pub mod lifecycle_state;
pub mod party;
pub mod reservation;
