//! Validation rules for client supplied payloads.
//!
//! Each function reports the first failing field. Field names are the
//! camelCase names clients send, so the HTTP layer can pass them through.

use chrono::NaiveDate;

use crate::{Error, OwnerDetails, PetClinicResult, PetDetails, VisitDetails};

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;

const REQUIRED: &str = "must not be blank";

/// Number of digits a telephone number must have.
pub const TELEPHONE_DIGITS: usize = 10;

/// Column widths of the storage schema, in characters.
pub const MAX_NAME_LENGTH: usize = 30;
pub const MAX_CITY_LENGTH: usize = 80;
pub const MAX_ADDRESS_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

fn require(field: &str, value: &str) -> PetClinicResult<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, REQUIRED));
    }
    Ok(())
}

/// Required, and at most `max` characters once trimmed.
fn require_bounded(field: &str, value: &str, max: usize) -> PetClinicResult<()> {
    require(field, value)?;
    if value.trim().chars().count() > max {
        return Err(Error::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Validate the fields of an owner.
pub fn validate_owner(owner: &OwnerDetails) -> PetClinicResult<()> {
    require_bounded("firstName", &owner.first_name, MAX_NAME_LENGTH)?;
    require_bounded("lastName", &owner.last_name, MAX_NAME_LENGTH)?;
    require_bounded("address", &owner.address, MAX_ADDRESS_LENGTH)?;
    require_bounded("city", &owner.city, MAX_CITY_LENGTH)?;
    require("telephone", &owner.telephone)?;

    let telephone = owner.telephone.trim();
    if telephone.len() != TELEPHONE_DIGITS || !telephone.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation(
            "telephone",
            format!("telephone must be a {TELEPHONE_DIGITS}-digit number"),
        ));
    }

    Ok(())
}

/// Validate the fields of a pet. `today` bounds the birth date.
pub fn validate_pet(pet: &PetDetails, today: NaiveDate) -> PetClinicResult<()> {
    require_bounded("name", &pet.name, MAX_NAME_LENGTH)?;

    if pet.birth_date > today {
        return Err(Error::validation(
            "birthDate",
            "birth date must not be in the future",
        ));
    }

    Ok(())
}

/// Validate the fields of a visit.
pub fn validate_visit(visit: &VisitDetails) -> PetClinicResult<()> {
    require_bounded("description", &visit.description, MAX_DESCRIPTION_LENGTH)
}
