//! HTTP response type definitions
//!
//! This module defines all HTTP response models for the REST API.
//! These types are created from domain results and sent to HTTP clients.
//!
//! # Architecture
//!
//! HTTP response types:
//! - Convert from domain types via `From` trait
//! - Use camelCase for JSON serialization
//! - Derive `Deserialize` as well so clients and tests can read them back

use chrono::NaiveDate;
use petclinic_core::{Owner, Page, Pet, PetType, Specialty, Vet, Visit};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Owner with pets and their visits.
///
/// # Example
///
/// ```json
/// {
///   "id": 1,
///   "firstName": "George",
///   "lastName": "Franklin",
///   "address": "110 W. Liberty St.",
///   "city": "Madison",
///   "telephone": "6085551023",
///   "pets": [
///     { "id": 1, "name": "Leo", "birthDate": "2010-09-07", "type": { "id": 1, "name": "cat" }, "visits": [] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<PetResponse>,
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name,
            last_name: owner.last_name,
            address: owner.address,
            city: owner.city,
            telephone: owner.telephone,
            pets: owner.pets.into_iter().map(PetResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(rename = "type")]
    pub pet_type: PetTypeResponse,
    pub visits: Vec<VisitResponse>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            birth_date: pet.birth_date,
            pet_type: pet.pet_type.into(),
            visits: pet.visits.into_iter().map(VisitResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetTypeResponse {
    pub id: i32,
    pub name: String,
}

impl From<PetType> for PetTypeResponse {
    fn from(pet_type: PetType) -> Self {
        Self {
            id: pet_type.id,
            name: pet_type.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitResponse {
    pub id: i32,
    pub date: NaiveDate,
    pub description: String,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            date: visit.date,
            description: visit.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyResponse {
    pub id: i32,
    pub name: String,
}

impl From<Specialty> for SpecialtyResponse {
    fn from(specialty: Specialty) -> Self {
        Self {
            id: specialty.id,
            name: specialty.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<SpecialtyResponse>,

    /// Number of specialties, zero renders as "none" in clients
    pub nr_of_specialties: usize,
}

impl From<Vet> for VetResponse {
    fn from(vet: Vet) -> Self {
        let nr_of_specialties = vet.nr_of_specialties();
        Self {
            id: vet.id,
            first_name: vet.first_name,
            last_name: vet.last_name,
            specialties: vet
                .specialties
                .into_iter()
                .map(SpecialtyResponse::from)
                .collect(),
            nr_of_specialties,
        }
    }
}

/// Response for `GET /vets`.
///
/// ```json
/// { "vetList": [ { "id": 1, "firstName": "James", "lastName": "Carter", "specialties": [], "nrOfSpecialties": 0 } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetsResponse {
    pub vet_list: Vec<VetResponse>,
}

impl From<Vec<Vet>> for VetsResponse {
    fn from(vets: Vec<Vet>) -> Self {
        Self {
            vet_list: vets.into_iter().map(VetResponse::from).collect(),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<D, T: From<D>> From<Page<D>> for PageResponse<T> {
    fn from(page: Page<D>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(T::from);
        Self {
            items: page.items,
            page: page.page,
            size: page.size,
            total_items: page.total_items,
            total_pages,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
