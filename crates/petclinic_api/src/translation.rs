//! Translation between HTTP types and domain types
//!
//! This module provides conversions from HTTP API request types to the
//! validated write payloads of `petclinic_core`. Translation happens at the
//! API boundary and includes validation, so handlers only ever pass checked
//! payloads to repositories.

use chrono::NaiveDate;
use petclinic_core::{
    validation, Owner, OwnerDetails, PetDetails, PetType, VisitDetails,
};

use crate::{
    errors::ApiError,
    models::request::{OwnerRequest, PetRequest, VisitRequest},
};

#[cfg(test)]
#[path = "translation_tests.rs"]
mod tests;

/// Convert an HTTP owner request to validated [`OwnerDetails`].
///
/// Surrounding whitespace is removed from every field before validation.
///
/// # Errors
///
/// Returns a validation error naming the first field that is blank, or the
/// telephone field when it is not a 10 digit number.
pub fn http_owner_request_to_domain(request: OwnerRequest) -> Result<OwnerDetails, ApiError> {
    let details = OwnerDetails {
        first_name: request.first_name,
        last_name: request.last_name,
        address: request.address,
        city: request.city,
        telephone: request.telephone,
    }
    .trimmed();

    validation::validate_owner(&details)?;
    Ok(details)
}

/// Convert an HTTP pet request to validated [`PetDetails`].
///
/// The pet type is looked up by name (case-insensitive) in `pet_types`.
///
/// # Errors
///
/// Returns a validation error if:
/// - The name is blank
/// - The birth date is missing or later than `today`
/// - The type does not name a known pet type
pub fn http_pet_request_to_domain(
    request: PetRequest,
    pet_types: &[PetType],
    today: NaiveDate,
) -> Result<PetDetails, ApiError> {
    let birth_date = request
        .birth_date
        .ok_or_else(|| ApiError::validation_error("birthDate", "must not be blank"))?;

    let type_name = request.pet_type.trim();
    let pet_type = pet_types
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(type_name))
        .cloned()
        .ok_or_else(|| {
            ApiError::validation_error("type", format!("unknown pet type '{}'", type_name))
        })?;

    let details = PetDetails {
        name: request.name.trim().to_string(),
        birth_date,
        pet_type,
    };

    validation::validate_pet(&details, today)?;
    Ok(details)
}

/// Convert an HTTP visit request to validated [`VisitDetails`].
///
/// A missing date defaults to `today`.
pub fn http_visit_request_to_domain(
    request: VisitRequest,
    today: NaiveDate,
) -> Result<VisitDetails, ApiError> {
    let details = VisitDetails {
        date: request.date.unwrap_or(today),
        description: request.description.trim().to_string(),
    };

    validation::validate_visit(&details)?;
    Ok(details)
}

/// Reject a pet name the owner already uses for another pet.
///
/// `pet_id` is the pet being updated, which may keep its own name.
pub fn ensure_unique_pet_name(
    owner: &Owner,
    name: &str,
    pet_id: Option<i32>,
) -> Result<(), ApiError> {
    match owner.pet_by_name(name) {
        Some(existing) if Some(existing.id) != pet_id => Err(ApiError::validation_error(
            "name",
            format!("owner {} already has a pet named '{}'", owner.id, existing.name),
        )),
        _ => Ok(()),
    }
}
