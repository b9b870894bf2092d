//! HTTP request type definitions
//!
//! This module defines all HTTP request models for the REST API.
//! These types accept flexible input from HTTP clients and are translated
//! to domain types at the API boundary.
//!
//! # Architecture
//!
//! HTTP request types have:
//! - Optional fields for flexibility
//! - String types where the domain has richer ones (pet type by name)
//! - Relaxed validation (validated during translation)
//!
//! See [`crate::translation`] for the conversion into domain payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// HTTP request to create or update an owner.
///
/// # Example
///
/// ```json
/// {
///   "firstName": "George",
///   "lastName": "Franklin",
///   "address": "110 W. Liberty St.",
///   "city": "Madison",
///   "telephone": "6085551023"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub telephone: String,
}

/// HTTP request to add or update a pet.
///
/// The pet type is given by name and resolved against the known pet types.
///
/// # Example
///
/// ```json
/// {
///   "name": "Leo",
///   "birthDate": "2010-09-07",
///   "type": "cat"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    #[serde(default)]
    pub name: String,

    /// ISO 8601 date (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    /// Pet type name, e.g. "dog"
    #[serde(rename = "type", default)]
    pub pet_type: String,
}

/// HTTP request to record a visit.
///
/// When `date` is omitted the visit is recorded for today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub description: String,
}

/// Query parameters for `GET /owners`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSearchQuery {
    /// Last name prefix; missing or empty matches every owner
    pub last_name: Option<String>,

    /// 1-based page number
    pub page: Option<u32>,
}

/// Query parameters for `GET /vets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VetsQuery {
    /// Requesting a page switches the response to the paginated shape
    pub page: Option<u32>,
}
