//! Pet Clinic domain layer
//!
//! This crate holds everything the clinic knows about owners, pets, visits
//! and veterinarians without knowing where they are stored:
//!
//! - Domain entities and write payloads ([`model`])
//! - Input validation rules ([`validation`])
//! - Repository interfaces ([`repository`])
//! - An in-memory store seeded with the reference data ([`memory`], [`seed`])
//! - An explicit cache in front of the vet repository ([`cache`])
//!
//! Storage back ends (MySQL) and the HTTP layer depend on this crate, never
//! the reverse.

pub mod cache;
pub mod errors;
pub mod memory;
pub mod model;
pub mod repository;
pub mod seed;
pub mod validation;

pub use cache::{CacheConfig, CacheStats, CachedVetRepository, VetQuery};
pub use errors::{Error, PetClinicResult};
pub use memory::InMemoryStore;
pub use model::{
    Owner, OwnerDetails, Page, PageRequest, Pet, PetDetails, PetType, Specialty, Vet, Visit,
    VisitDetails,
};
pub use repository::{OwnerRepository, VetRepository};

/// Number of owners returned per page by owner searches.
pub const OWNERS_PAGE_SIZE: u32 = 5;

/// Number of vets returned per page by paginated vet listings.
pub const VETS_PAGE_SIZE: u32 = 5;

/// Upper bound applied to any requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;
