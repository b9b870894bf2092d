//! Domain entities and write payloads.
//!
//! Entities carry their database identifiers. Payloads (`*Details`) describe
//! what a client wants written and never carry identifiers; storage assigns
//! them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MAX_PAGE_SIZE;

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

/// Kind of animal a pet is (cat, dog, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetType {
    pub id: i32,
    pub name: String,
}

/// Veterinary specialty such as radiology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i32,
    pub name: String,
}

/// A single visit of a pet to the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: i32,
    pub date: NaiveDate,
    pub description: String,
}

/// A pet belonging to an owner, with its visit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: PetType,
    pub visits: Vec<Visit>,
}

impl Pet {
    /// Sort visits by date, oldest first. Visits on the same day keep id order.
    pub fn sort_visits(&mut self) {
        self.visits.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    }
}

/// A pet owner and their pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<Pet>,
}

impl Owner {
    /// Look up one of this owner's pets by id.
    pub fn pet(&self, pet_id: i32) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == pet_id)
    }

    /// Look up one of this owner's pets by name, ignoring case.
    pub fn pet_by_name(&self, name: &str) -> Option<&Pet> {
        let name = name.trim();
        self.pets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Put pets in name order and each pet's visits in date order.
    pub fn sort_children(&mut self) {
        self.pets.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        for pet in &mut self.pets {
            pet.sort_visits();
        }
    }
}

/// A veterinarian and their specialties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<Specialty>,
}

impl Vet {
    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    /// Put specialties in name order.
    pub fn sort_specialties(&mut self) {
        self.specialties.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// Fields of an owner supplied by a client on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetails {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerDetails {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            telephone: self.telephone.trim().to_string(),
        }
    }
}

/// Fields of a pet supplied by a client on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDetails {
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: PetType,
}

/// Fields of a visit supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitDetails {
    pub date: NaiveDate,
    pub description: String,
}

/// A request for one page of results. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Create a page request. `page` is raised to at least 1 and `size` is
    /// clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of items that precede this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Cut this page out of an already ordered, complete result set.
    pub fn slice<T: Clone>(&self, all: &[T]) -> Page<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let items = all
            .iter()
            .skip(start)
            .take(self.size as usize)
            .cloned()
            .collect();

        Page {
            items,
            page: self.page,
            size: self.size,
            total_items: all.len() as u64,
        }
    }
}

/// One page of results plus what is needed to render paging controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        let pages = self.total_items.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
        }
    }
}
