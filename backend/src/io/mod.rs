//! Boundary between the engine and its callers: DTO mappers and handlers.

pub mod handlers;
pub mod mappers;
