//! In-memory storage.
//!
//! Backs the `memory` profile and the unit tests of the layers above. Owners
//! are kept as complete aggregates (pets and visits embedded) behind a
//! single async lock.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    seed, Error, Owner, OwnerDetails, OwnerRepository, Page, PageRequest, PetClinicResult, Pet,
    PetDetails, PetType, Vet, VetRepository, Visit, VisitDetails,
};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

#[derive(Debug, Default)]
struct Tables {
    owners: Vec<Owner>,
    vets: Vec<Vet>,
    pet_types: Vec<PetType>,
    next_owner_id: i32,
    next_pet_id: i32,
    next_visit_id: i32,
}

impl Tables {
    fn owner_mut(&mut self, owner_id: i32) -> PetClinicResult<&mut Owner> {
        self.owners
            .iter_mut()
            .find(|o| o.id == owner_id)
            .ok_or(Error::not_found("owner", owner_id))
    }
}

/// Owner and vet storage held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the reference data from [`seed`].
    pub fn seeded() -> Self {
        let owners = seed::owners();
        let max_pet_id = owners
            .iter()
            .flat_map(|o| o.pets.iter().map(|p| p.id))
            .max()
            .unwrap_or(0);
        let max_visit_id = owners
            .iter()
            .flat_map(|o| o.pets.iter().flat_map(|p| p.visits.iter().map(|v| v.id)))
            .max()
            .unwrap_or(0);

        let tables = Tables {
            next_owner_id: owners.iter().map(|o| o.id).max().unwrap_or(0) + 1,
            next_pet_id: max_pet_id + 1,
            next_visit_id: max_visit_id + 1,
            owners,
            vets: seed::vets(),
            pet_types: seed::pet_types(),
        };

        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl VetRepository for InMemoryStore {
    async fn find_all(&self) -> PetClinicResult<Vec<Vet>> {
        Ok(self.tables.read().await.vets.clone())
    }

    async fn find_page(&self, request: PageRequest) -> PetClinicResult<Page<Vet>> {
        Ok(request.slice(&self.tables.read().await.vets))
    }
}

#[async_trait]
impl OwnerRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> PetClinicResult<Option<Owner>> {
        let tables = self.tables.read().await;
        Ok(tables.owners.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
        request: PageRequest,
    ) -> PetClinicResult<Page<Owner>> {
        let tables = self.tables.read().await;
        let matching: Vec<Owner> = tables
            .owners
            .iter()
            .filter(|o| o.last_name.starts_with(last_name))
            .cloned()
            .collect();
        Ok(request.slice(&matching))
    }

    async fn find_pet_types(&self) -> PetClinicResult<Vec<PetType>> {
        let mut types = self.tables.read().await.pet_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn create(&self, details: &OwnerDetails) -> PetClinicResult<Owner> {
        let mut tables = self.tables.write().await;
        let details = details.trimmed();
        let owner = Owner {
            id: tables.next_owner_id,
            first_name: details.first_name,
            last_name: details.last_name,
            address: details.address,
            city: details.city,
            telephone: details.telephone,
            pets: Vec::new(),
        };
        tables.next_owner_id += 1;
        tables.owners.push(owner.clone());
        Ok(owner)
    }

    async fn update(&self, id: i32, details: &OwnerDetails) -> PetClinicResult<Owner> {
        let mut tables = self.tables.write().await;
        let details = details.trimmed();
        let owner = tables.owner_mut(id)?;
        owner.first_name = details.first_name;
        owner.last_name = details.last_name;
        owner.address = details.address;
        owner.city = details.city;
        owner.telephone = details.telephone;
        Ok(owner.clone())
    }

    async fn add_pet(&self, owner_id: i32, details: &PetDetails) -> PetClinicResult<Pet> {
        let mut tables = self.tables.write().await;
        let pet = Pet {
            id: tables.next_pet_id,
            name: details.name.trim().to_string(),
            birth_date: details.birth_date,
            pet_type: details.pet_type.clone(),
            visits: Vec::new(),
        };
        let owner = tables.owner_mut(owner_id)?;
        owner.pets.push(pet.clone());
        owner.sort_children();
        tables.next_pet_id += 1;
        Ok(pet)
    }

    async fn update_pet(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &PetDetails,
    ) -> PetClinicResult<Pet> {
        let mut tables = self.tables.write().await;
        let owner = tables.owner_mut(owner_id)?;
        let pet = owner
            .pets
            .iter_mut()
            .find(|p| p.id == pet_id)
            .ok_or(Error::not_found("pet", pet_id))?;
        pet.name = details.name.trim().to_string();
        pet.birth_date = details.birth_date;
        pet.pet_type = details.pet_type.clone();
        let updated = pet.clone();
        owner.sort_children();
        Ok(updated)
    }

    async fn add_visit(
        &self,
        owner_id: i32,
        pet_id: i32,
        details: &VisitDetails,
    ) -> PetClinicResult<Visit> {
        let mut tables = self.tables.write().await;
        let visit = Visit {
            id: tables.next_visit_id,
            date: details.date,
            description: details.description.trim().to_string(),
        };
        let owner = tables.owner_mut(owner_id)?;
        let pet = owner
            .pets
            .iter_mut()
            .find(|p| p.id == pet_id)
            .ok_or(Error::not_found("pet", pet_id))?;
        pet.visits.push(visit.clone());
        pet.sort_visits();
        tables.next_visit_id += 1;
        Ok(visit)
    }
}
