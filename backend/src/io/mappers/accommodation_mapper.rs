use shared::{Accommodation as AccommodationDto, AccommodationKind as AccommodationKindDto};

use crate::domain::models::accommodation::{Accommodation, AccommodationKind};
use crate::domain::models::catalog::Catalog;

pub struct AccommodationMapper;

impl AccommodationMapper {
    pub fn kind_to_dto(kind: AccommodationKind) -> AccommodationKindDto {
        match kind {
            AccommodationKind::House => AccommodationKindDto::House,
            AccommodationKind::Apartment => AccommodationKindDto::Apartment,
        }
    }

    /// Convert a domain accommodation, attaching the host rating from the catalog
    pub fn to_dto(domain: &Accommodation, catalog: &Catalog) -> AccommodationDto {
        AccommodationDto {
            code: domain.code.clone(),
            name: domain.name.clone(),
            host_document: domain.host_document.clone(),
            department: domain.department.clone(),
            municipality: domain.municipality.clone(),
            kind: Self::kind_to_dto(domain.kind),
            address: domain.address.clone(),
            nightly_price: domain.nightly_price,
            amenities: domain.amenities.clone(),
            host_rating: catalog.host_rating(&domain.host_document),
        }
    }

    pub fn to_dto_list(domain: &[&Accommodation], catalog: &Catalog) -> Vec<AccommodationDto> {
        domain.iter().map(|a| Self::to_dto(a, catalog)).collect()
    }
}
