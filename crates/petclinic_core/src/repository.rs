//! Repository interfaces.
//!
//! Storage back ends implement these traits; the HTTP layer and the vet
//! cache only ever see `dyn OwnerRepository` / `dyn VetRepository`.
//!
//! Write operations assume their payload has already passed
//! [`crate::validation`]. They report a missing owner or pet as
//! [`crate::Error::NotFound`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    Owner, OwnerDetails, Page, PageRequest, PetClinicResult, Pet, PetDetails, PetType, Vet, Visit,
    VisitDetails,
};

/// Read access to veterinarians.
#[async_trait]
pub trait VetRepository: Send + Sync {
    /// All vets ordered by id, each with specialties ordered by name.
    async fn find_all(&self) -> PetClinicResult<Vec<Vet>>;

    /// One page of vets in the same order as [`VetRepository::find_all`].
    async fn find_page(&self, request: PageRequest) -> PetClinicResult<Page<Vet>>;
}

#[async_trait]
impl<T: VetRepository + ?Sized> VetRepository for Arc<T> {
    async fn find_all(&self) -> PetClinicResult<Vec<Vet>> {
        (**self).find_all().await
    }

    async fn find_page(&self, request: PageRequest) -> PetClinicResult<Page<Vet>> {
        (**self).find_page(request).await
    }
}

/// Access to owners and everything they own.
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Load an owner with pets and visits.
    async fn find_by_id(&self, id: i32) -> PetClinicResult<Option<Owner>>;

    /// Owners whose last name starts with `last_name`, ordered by id.
    /// An empty prefix matches every owner.
    async fn find_by_last_name(
        &self,
        last_name: &str,
        request: PageRequest,
    ) -> PetClinicResult<Page<Owner>>;

    /// All pet types ordered by name.
    async fn find_pet_types(&self) -> PetClinicResult<Vec<PetType>>;

    async fn create(&self, details: &OwnerDetails) -> PetClinicResult<Owner>;

    async fn update(&self, id: i32, details: &OwnerDetails) -> PetClinicResult<Owner>;

    async fn add_pet(&self, owner_id: i32, details: &PetDetails) -> PetClinicResult<Pet>;

    async fn update_pet(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &PetDetails,
    ) -> PetClinicResult<Pet>;

    async fn add_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &VisitDetails,
    ) -> PetClinicResult<Visit>;
}
