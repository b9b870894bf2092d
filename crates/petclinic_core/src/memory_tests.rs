//! Tests for memory module

use super::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_owner() -> OwnerDetails {
    OwnerDetails {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address: "12 St James's Square".to_string(),
        city: "London".to_string(),
        telephone: "0123456789".to_string(),
    }
}

fn dog() -> PetType {
    PetType {
        id: 2,
        name: "dog".to_string(),
    }
}

// ============================================================================
// Vet Tests
// ============================================================================

#[tokio::test]
async fn test_seeded_store_has_six_vets_in_id_order() {
    let store = InMemoryStore::seeded();

    let vets = store.find_all().await.unwrap();

    assert_eq!(vets.len(), 6);
    let ids: Vec<_> = vets.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(vets[2].last_name, "Douglas");
    assert_eq!(vets[2].nr_of_specialties(), 2);
}

#[tokio::test]
async fn test_vet_second_page() {
    let store = InMemoryStore::seeded();

    let page = store.find_page(PageRequest::new(2, 5)).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].first_name, "Sharon");
    assert_eq!(page.total_pages(), 2);
}

#[tokio::test]
async fn test_empty_store_has_no_vets() {
    let store = InMemoryStore::new();

    assert!(store.find_all().await.unwrap().is_empty());
}

// ============================================================================
// Owner Query Tests
// ============================================================================

#[tokio::test]
async fn test_find_owner_one_with_pets() {
    let store = InMemoryStore::seeded();

    let owner = store.find_by_id(1).await.unwrap().expect("owner 1 exists");

    assert_eq!(owner.first_name, "George");
    assert_eq!(owner.last_name, "Franklin");
    assert_eq!(owner.pets.len(), 1);
    assert_eq!(owner.pets[0].name, "Leo");
    assert_eq!(owner.pets[0].pet_type.name, "cat");
}

#[tokio::test]
async fn test_find_missing_owner_is_none() {
    let store = InMemoryStore::seeded();

    assert!(store.find_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_last_name_prefix() {
    let store = InMemoryStore::seeded();

    let page = store
        .find_by_last_name("Davis", PageRequest::new(1, 5))
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 4]);
    assert_eq!(page.total_items, 2);
}

#[tokio::test]
async fn test_find_by_empty_last_name_matches_everyone() {
    let store = InMemoryStore::seeded();

    let page = store
        .find_by_last_name("", PageRequest::new(1, 5))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_items, 10);
    assert_eq!(page.total_pages(), 2);
}

#[tokio::test]
async fn test_pet_types_sorted_by_name() {
    let store = InMemoryStore::seeded();

    let names: Vec<_> = store
        .find_pet_types()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

    assert_eq!(
        names,
        vec!["bird", "cat", "dog", "hamster", "lizard", "snake"]
    );
}

// ============================================================================
// Owner Write Tests
// ============================================================================

#[tokio::test]
async fn test_create_assigns_next_id() {
    let store = InMemoryStore::seeded();

    let owner = store.create(&new_owner()).await.unwrap();

    assert_eq!(owner.id, 11);
    assert!(owner.pets.is_empty());
    assert_eq!(store.find_by_id(11).await.unwrap(), Some(owner));
}

#[tokio::test]
async fn test_update_keeps_pets() {
    let store = InMemoryStore::seeded();

    let updated = store.update(6, &new_owner()).await.unwrap();

    assert_eq!(updated.id, 6);
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.pets.len(), 2);
}

#[tokio::test]
async fn test_update_missing_owner_is_not_found() {
    let store = InMemoryStore::seeded();

    let err = store.update(404, &new_owner()).await.unwrap_err();

    assert_eq!(err, Error::not_found("owner", 404));
}

#[tokio::test]
async fn test_add_pet_and_visit() {
    let store = InMemoryStore::seeded();
    let details = PetDetails {
        name: " Rex ".to_string(),
        birth_date: date(2020, 5, 1),
        pet_type: dog(),
    };

    let pet = store.add_pet(1, &details).await.unwrap();
    assert_eq!(pet.id, 14);
    assert_eq!(pet.name, "Rex");

    let visit = store
        .add_visit(
            1,
            pet.id,
            &VisitDetails {
                date: date(2021, 1, 2),
                description: "checkup".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(visit.id, 5);

    let owner = store.find_by_id(1).await.unwrap().unwrap();
    let names: Vec<_> = owner.pets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Leo", "Rex"]);
    assert_eq!(owner.pet(14).unwrap().visits, vec![visit]);
}

#[tokio::test]
async fn test_update_pet_of_another_owner_is_not_found() {
    let store = InMemoryStore::seeded();
    let details = PetDetails {
        name: "Leo".to_string(),
        birth_date: date(2000, 9, 7),
        pet_type: dog(),
    };

    // Pet 1 belongs to owner 1, not owner 2.
    let err = store.update_pet(2, 1, &details).await.unwrap_err();

    assert_eq!(err, Error::not_found("pet", 1));
}

#[tokio::test]
async fn test_add_visit_to_missing_owner_is_not_found() {
    let store = InMemoryStore::seeded();
    let details = VisitDetails {
        date: date(2021, 1, 2),
        description: "checkup".to_string(),
    };

    let err = store.add_visit(77, 1, &details).await.unwrap_err();

    assert!(err.is_not_found());
}
