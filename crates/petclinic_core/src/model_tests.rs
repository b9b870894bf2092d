//! Tests for model module

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cat() -> PetType {
    PetType {
        id: 1,
        name: "cat".to_string(),
    }
}

fn pet(id: i32, name: &str) -> Pet {
    Pet {
        id,
        name: name.to_string(),
        birth_date: date(2010, 1, 1),
        pet_type: cat(),
        visits: Vec::new(),
    }
}

fn owner_with_pets(pets: Vec<Pet>) -> Owner {
    Owner {
        id: 1,
        first_name: "Jean".to_string(),
        last_name: "Coleman".to_string(),
        address: "105 N. Lake St.".to_string(),
        city: "Monona".to_string(),
        telephone: "6085552654".to_string(),
        pets,
    }
}

// ============================================================================
// Owner Tests
// ============================================================================

#[test]
fn test_pet_by_name_ignores_case_and_whitespace() {
    let owner = owner_with_pets(vec![pet(7, "Samantha"), pet(8, "Max")]);

    assert_eq!(owner.pet_by_name(" max ").map(|p| p.id), Some(8));
    assert_eq!(owner.pet_by_name("SAMANTHA").map(|p| p.id), Some(7));
    assert!(owner.pet_by_name("Leo").is_none());
}

#[test]
fn test_pet_by_id() {
    let owner = owner_with_pets(vec![pet(7, "Samantha"), pet(8, "Max")]);

    assert_eq!(owner.pet(8).map(|p| p.name.as_str()), Some("Max"));
    assert!(owner.pet(99).is_none());
}

#[test]
fn test_sort_children_orders_pets_by_name_and_visits_by_date() {
    let mut samantha = pet(7, "Samantha");
    samantha.visits = vec![
        Visit {
            id: 1,
            date: date(2010, 3, 4),
            description: "rabies shot".to_string(),
        },
        Visit {
            id: 4,
            date: date(2008, 9, 4),
            description: "spayed".to_string(),
        },
    ];
    let mut owner = owner_with_pets(vec![samantha, pet(8, "Max")]);

    owner.sort_children();

    let names: Vec<_> = owner.pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Max", "Samantha"]);
    let visit_ids: Vec<_> = owner.pets[1].visits.iter().map(|v| v.id).collect();
    assert_eq!(visit_ids, vec![4, 1]);
}

#[test]
fn test_owner_details_trimmed() {
    let details = OwnerDetails {
        first_name: "  George ".to_string(),
        last_name: "Franklin\t".to_string(),
        address: " 110 W. Liberty St.".to_string(),
        city: "Madison ".to_string(),
        telephone: " 6085551023 ".to_string(),
    };

    let trimmed = details.trimmed();

    assert_eq!(trimmed.first_name, "George");
    assert_eq!(trimmed.last_name, "Franklin");
    assert_eq!(trimmed.address, "110 W. Liberty St.");
    assert_eq!(trimmed.city, "Madison");
    assert_eq!(trimmed.telephone, "6085551023");
}

// ============================================================================
// Vet Tests
// ============================================================================

#[test]
fn test_vet_specialties_sorted_by_name() {
    let mut vet = Vet {
        id: 3,
        first_name: "Linda".to_string(),
        last_name: "Douglas".to_string(),
        specialties: vec![
            Specialty {
                id: 2,
                name: "surgery".to_string(),
            },
            Specialty {
                id: 3,
                name: "dentistry".to_string(),
            },
        ],
    };

    vet.sort_specialties();

    assert_eq!(vet.nr_of_specialties(), 2);
    assert_eq!(vet.specialties[0].name, "dentistry");
}

// ============================================================================
// Paging Tests
// ============================================================================

#[test]
fn test_page_request_clamps_page_and_size() {
    let request = PageRequest::new(0, 0);
    assert_eq!(request.page(), 1);
    assert_eq!(request.size(), 1);

    let request = PageRequest::new(3, 10_000);
    assert_eq!(request.page(), 3);
    assert_eq!(request.size(), MAX_PAGE_SIZE);
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::new(1, 5).offset(), 0);
    assert_eq!(PageRequest::new(3, 5).offset(), 10);
}

#[test]
fn test_slice_last_partial_page() {
    let all: Vec<i32> = (1..=12).collect();

    let page = PageRequest::new(3, 5).slice(&all);

    assert_eq!(page.items, vec![11, 12]);
    assert_eq!(page.total_items, 12);
    assert_eq!(page.total_pages(), 3);
}

#[test]
fn test_slice_past_the_end_is_empty() {
    let all: Vec<i32> = (1..=4).collect();

    let page = PageRequest::new(9, 5).slice(&all);

    assert!(page.items.is_empty());
    assert_eq!(page.page, 9);
    assert_eq!(page.total_pages(), 1);
}

#[test]
fn test_empty_page_has_no_pages() {
    let page: Page<i32> = PageRequest::new(1, 5).slice(&[]);
    assert_eq!(page.total_pages(), 0);
}

#[test]
fn test_page_map_keeps_paging_metadata() {
    let page = PageRequest::new(2, 2).slice(&[1, 2, 3]);

    let mapped = page.map(|n| n.to_string());

    assert_eq!(mapped.items, vec!["3".to_string()]);
    assert_eq!(mapped.page, 2);
    assert_eq!(mapped.size, 2);
    assert_eq!(mapped.total_items, 3);
}
