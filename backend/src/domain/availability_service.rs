//! Availability rules.
//!
//! Stays are closed intervals of nights: a stay starting on `s` for `n` nights
//! occupies `[s, s + n - 1]`. Two stays conflict iff their intervals share at
//! least one night, so a stay whose first night equals another's last night
//! conflicts, while one starting on the other's checkout morning does not.
//!
//! The service is stateless. It reads the catalog and the ledger it is given
//! and never mutates them.

use log::debug;

use crate::domain::calendar::CalendarDate;
use crate::domain::commands::search::{AvailabilityQuery, SearchCriteria};
use crate::domain::models::accommodation::Accommodation;
use crate::domain::models::party::Host;
use crate::domain::models::reservation::Reservation;

#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityService;

impl AvailabilityService {
    pub fn new() -> Self {
        Self
    }

    /// Whether two stays share at least one night
    pub fn stays_conflict(start_a: &CalendarDate, nights_a: u32, start_b: &CalendarDate, nights_b: u32) -> bool {
        let (first_a, last_a) = occupied(start_a, nights_a);
        let (first_b, last_b) = occupied(start_b, nights_b);
        !(last_a < first_b || last_b < first_a)
    }

    /// No ledger entry for this accommodation overlaps the candidate stay
    pub fn is_free(&self, accommodation_code: &str, start: &CalendarDate, nights: u32, ledger: &[Reservation]) -> bool {
        !ledger
            .iter()
            .filter(|r| r.accommodation_code == accommodation_code)
            .any(|r| Self::stays_conflict(&r.start_date, r.nights, start, nights))
    }

    /// No ledger entry for this guest overlaps the candidate stay
    pub fn is_guest_free(&self, guest_document: &str, start: &CalendarDate, nights: u32, ledger: &[Reservation]) -> bool {
        !ledger
            .iter()
            .filter(|r| r.guest_document == guest_document)
            .any(|r| Self::stays_conflict(&r.start_date, r.nights, start, nights))
    }

    /// Keep the candidates that are free for the whole stay, preserving order
    pub fn filter_by_overlap<'a>(
        &self,
        candidates: &[&'a Accommodation],
        start: &CalendarDate,
        nights: u32,
        ledger: &[Reservation],
    ) -> Vec<&'a Accommodation> {
        candidates
            .iter()
            .copied()
            .filter(|a| {
                let free = self.is_free(&a.code, start, nights, ledger);
                if !free {
                    debug!("Accommodation {} is booked around {}", a.code, start);
                }
                free
            })
            .collect()
    }

    /// Catalog entries matching municipality, price and host-rating limits, in catalog order.
    /// When a rating limit is set, accommodations whose host is unknown are excluded.
    pub fn filter_by_criteria<'a>(
        &self,
        catalog: &'a [Accommodation],
        criteria: &SearchCriteria,
        hosts: &[Host],
    ) -> Vec<&'a Accommodation> {
        catalog
            .iter()
            .filter(|a| a.municipality == criteria.municipality)
            .filter(|a| criteria.max_price.map_or(true, |max| a.nightly_price <= max))
            .filter(|a| match criteria.min_host_rating {
                None => true,
                Some(min) => hosts
                    .iter()
                    .find(|h| h.document == a.host_document)
                    .is_some_and(|h| h.rating >= min),
            })
            .collect()
    }

    /// Criteria filter followed by the availability filter
    pub fn search<'a>(
        &self,
        catalog: &'a [Accommodation],
        hosts: &[Host],
        ledger: &[Reservation],
        query: &AvailabilityQuery,
    ) -> Vec<&'a Accommodation> {
        let matching = self.filter_by_criteria(catalog, &query.criteria, hosts);
        let available = self.filter_by_overlap(&matching, &query.start_date, query.nights, ledger);
        debug!(
            "Search in {}: {} match criteria, {} available from {} for {} night(s)",
            query.criteria.municipality,
            matching.len(),
            available.len(),
            query.start_date,
            query.nights
        );
        available
    }
}

fn occupied(start: &CalendarDate, nights: u32) -> (i64, i64) {
    let first = start.ordinal();
    (first, first + nights.max(1) as i64 - 1)
}
