//! backend/src/domain/models/catalog.rs

use serde::{Deserialize, Serialize};

use super::accommodation::Accommodation;
use super::party::{Guest, Host};

/// Everything that can be booked and everyone who can take part in a booking.
/// Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub accommodations: Vec<Accommodation>,
    pub hosts: Vec<Host>,
    pub guests: Vec<Guest>,
}

impl Catalog {
    pub fn find_accommodation(&self, code: &str) -> Option<&Accommodation> {
        self.accommodations.iter().find(|a| a.code == code)
    }

    pub fn find_host(&self, document: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.document == document)
    }

    pub fn find_guest(&self, document: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.document == document)
    }

    /// Rating of the host with this document, if registered
    pub fn host_rating(&self, document: &str) -> Option<f64> {
        self.find_host(document).map(|h| h.rating)
    }

    pub fn accommodations_of_host<'a>(&'a self, host_document: &'a str) -> impl Iterator<Item = &'a Accommodation> + 'a {
        self.accommodations
            .iter()
            .filter(move |a| a.host_document == host_document)
    }
}
