//! Reference data every fresh clinic starts with.
//!
//! Mirrors `crates/petclinic_db/sql/data.sql` row for row, so the in-memory
//! store and a freshly initialized MySQL schema answer queries identically.

use chrono::NaiveDate;

use crate::{Owner, Pet, PetType, Specialty, Vet, Visit};

const SPECIALTIES: &[(i32, &str)] = &[(1, "radiology"), (2, "surgery"), (3, "dentistry")];

const VETS: &[(i32, &str, &str)] = &[
    (1, "James", "Carter"),
    (2, "Helen", "Leary"),
    (3, "Linda", "Douglas"),
    (4, "Rafael", "Ortega"),
    (5, "Henry", "Stevens"),
    (6, "Sharon", "Jenkins"),
];

/// (vet_id, specialty_id)
const VET_SPECIALTIES: &[(i32, i32)] = &[(2, 1), (3, 2), (3, 3), (4, 2), (5, 1)];

const PET_TYPES: &[(i32, &str)] = &[
    (1, "cat"),
    (2, "dog"),
    (3, "lizard"),
    (4, "snake"),
    (5, "bird"),
    (6, "hamster"),
];

const OWNERS: &[(i32, &str, &str, &str, &str, &str)] = &[
    (1, "George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    (2, "Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    (3, "Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    (4, "Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    (5, "Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    (6, "Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    (7, "Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    (8, "Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    (9, "David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    (10, "Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

/// (id, name, birth_date, type_id, owner_id)
const PETS: &[(i32, &str, &str, i32, i32)] = &[
    (1, "Leo", "2000-09-07", 1, 1),
    (2, "Basil", "2002-08-06", 6, 2),
    (3, "Rosy", "2001-04-17", 2, 3),
    (4, "Jewel", "2000-03-07", 2, 3),
    (5, "Iggy", "2000-11-30", 3, 4),
    (6, "George", "2000-01-20", 4, 5),
    (7, "Samantha", "1995-09-04", 1, 6),
    (8, "Max", "1995-09-04", 1, 6),
    (9, "Lucky", "1999-08-06", 5, 7),
    (10, "Mulligan", "1997-02-24", 2, 8),
    (11, "Freddy", "2000-03-09", 5, 9),
    (12, "Lucky", "2000-06-24", 2, 10),
    (13, "Sly", "2002-06-08", 1, 10),
];

/// (id, pet_id, date, description)
const VISITS: &[(i32, i32, &str, &str)] = &[
    (1, 7, "2010-03-04", "rabies shot"),
    (2, 8, "2011-03-04", "rabies shot"),
    (3, 8, "2009-06-04", "neutered"),
    (4, 7, "2008-09-04", "spayed"),
];

fn date(value: &str) -> NaiveDate {
    // Seed dates are compile-time constants in ISO format.
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
}

pub fn specialties() -> Vec<Specialty> {
    SPECIALTIES
        .iter()
        .map(|&(id, name)| Specialty {
            id,
            name: name.to_string(),
        })
        .collect()
}

pub fn pet_types() -> Vec<PetType> {
    PET_TYPES
        .iter()
        .map(|&(id, name)| PetType {
            id,
            name: name.to_string(),
        })
        .collect()
}

/// Vets ordered by id with their specialties ordered by name.
pub fn vets() -> Vec<Vet> {
    let specialties = specialties();
    VETS.iter()
        .map(|&(id, first_name, last_name)| {
            let mut vet = Vet {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                specialties: VET_SPECIALTIES
                    .iter()
                    .filter(|(vet_id, _)| *vet_id == id)
                    .filter_map(|(_, specialty_id)| {
                        specialties.iter().find(|s| s.id == *specialty_id).cloned()
                    })
                    .collect(),
            };
            vet.sort_specialties();
            vet
        })
        .collect()
}

/// Owners ordered by id with pets and visits attached and sorted.
pub fn owners() -> Vec<Owner> {
    let types = pet_types();
    OWNERS
        .iter()
        .map(|&(id, first_name, last_name, address, city, telephone)| {
            let pets = PETS
                .iter()
                .filter(|pet| pet.4 == id)
                .filter_map(|&(pet_id, name, birth_date, type_id, _)| {
                    let pet_type = types.iter().find(|t| t.id == type_id)?.clone();
                    Some(Pet {
                        id: pet_id,
                        name: name.to_string(),
                        birth_date: date(birth_date),
                        pet_type,
                        visits: VISITS
                            .iter()
                            .filter(|visit| visit.1 == pet_id)
                            .map(|&(visit_id, _, visit_date, description)| Visit {
                                id: visit_id,
                                date: date(visit_date),
                                description: description.to_string(),
                            })
                            .collect(),
                    })
                })
                .collect();

            let mut owner = Owner {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                address: address.to_string(),
                city: city.to_string(),
                telephone: telephone.to_string(),
                pets,
            };
            owner.sort_children();
            owner
        })
        .collect()
}
