//! HTTP request handlers
//!
//! This module contains all request handlers for the REST API endpoints.
//! Handlers translate HTTP requests to domain operations and domain results
//! to HTTP responses.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Extracts HTTP request data (path params, query params, body)
//! 2. Translates HTTP types to domain types
//! 3. Calls the repositories held in [`AppState`]
//! 4. Translates domain results to HTTP responses
//! 5. Returns `Result<_, ApiError>`

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use petclinic_core::{Owner, PageRequest, OWNERS_PAGE_SIZE, VETS_PAGE_SIZE};

use crate::{
    errors::ApiError,
    models::{
        request::{OwnerRequest, OwnerSearchQuery, PetRequest, VetsQuery, VisitRequest},
        response::{
            HealthCheckResponse, OwnerResponse, PageResponse, PetResponse, PetTypeResponse,
            VetResponse, VetsResponse, VisitResponse,
        },
    },
    translation, AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn load_owner(state: &AppState, owner_id: i32) -> Result<Owner, ApiError> {
    state
        .owners
        .find_by_id(owner_id)
        .await?
        .ok_or_else(|| ApiError::not_found("owner", owner_id))
}

/// GET /owners/:owner_id
///
/// Owner with pets and visits.
pub async fn show_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
) -> Result<Json<OwnerResponse>, ApiError> {
    let owner = load_owner(&state, owner_id).await?;
    Ok(Json(owner.into()))
}

/// GET /owners?lastName=&page=
///
/// Owners whose last name starts with `lastName`, five per page.
pub async fn find_owners(
    State(state): State<AppState>,
    Query(query): Query<OwnerSearchQuery>,
) -> Result<Json<PageResponse<OwnerResponse>>, ApiError> {
    let last_name = query.last_name.unwrap_or_default();
    let request = PageRequest::new(query.page.unwrap_or(1), OWNERS_PAGE_SIZE);

    let page = state
        .owners
        .find_by_last_name(last_name.trim(), request)
        .await?;

    tracing::debug!(
        last_name = %last_name,
        page = request.page(),
        total = page.total_items,
        "Owner search"
    );

    Ok(Json(page.into()))
}

/// POST /owners
pub async fn create_owner(
    State(state): State<AppState>,
    Json(request): Json<OwnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let details = translation::http_owner_request_to_domain(request)?;
    let owner = state.owners.create(&details).await?;

    tracing::info!(owner_id = owner.id, "Owner created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/owners/{}", owner.id))],
        Json(OwnerResponse::from(owner)),
    ))
}

/// PUT /owners/:owner_id
pub async fn update_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    Json(request): Json<OwnerRequest>,
) -> Result<Json<OwnerResponse>, ApiError> {
    let details = translation::http_owner_request_to_domain(request)?;
    let owner = state.owners.update(owner_id, &details).await?;

    tracing::info!(owner_id, "Owner updated");

    Ok(Json(owner.into()))
}

/// POST /owners/:owner_id/pets
pub async fn add_pet(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    Json(request): Json<PetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet_types = state.owners.find_pet_types().await?;

    let details = translation::http_pet_request_to_domain(request, &pet_types, today())?;
    translation::ensure_unique_pet_name(&owner, &details.name, None)?;

    let pet = state.owners.add_pet(owner_id, &details).await?;

    tracing::info!(owner_id, pet_id = pet.id, "Pet added");

    Ok((
        StatusCode::CREATED,
        [(
            header::LOCATION,
            format!("/owners/{}/pets/{}", owner_id, pet.id),
        )],
        Json(PetResponse::from(pet)),
    ))
}

/// PUT /owners/:owner_id/pets/:pet_id
pub async fn update_pet(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(request): Json<PetRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let owner = load_owner(&state, owner_id).await?;
    if owner.pet(pet_id).is_none() {
        return Err(ApiError::not_found("pet", pet_id));
    }

    let pet_types = state.owners.find_pet_types().await?;
    let details = translation::http_pet_request_to_domain(request, &pet_types, today())?;
    translation::ensure_unique_pet_name(&owner, &details.name, Some(pet_id))?;

    let pet = state.owners.update_pet(owner_id, pet_id, &details).await?;

    tracing::info!(owner_id, pet_id, "Pet updated");

    Ok(Json(pet.into()))
}

/// POST /owners/:owner_id/pets/:pet_id/visits
pub async fn add_visit(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(request): Json<VisitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let details = translation::http_visit_request_to_domain(request, today())?;
    let visit = state.owners.add_visit(owner_id, pet_id, &details).await?;

    tracing::info!(owner_id, pet_id, visit_id = visit.id, "Visit added");

    Ok((StatusCode::CREATED, Json(VisitResponse::from(visit))))
}

/// GET /pettypes
pub async fn list_pet_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<PetTypeResponse>>, ApiError> {
    let pet_types = state.owners.find_pet_types().await?;
    Ok(Json(pet_types.into_iter().map(Into::into).collect()))
}

/// GET /vets and GET /vets?page=N
///
/// Without `page` the full list is returned as `{ "vetList": [...] }`;
/// with it, one page of five vets. Both go through the vet cache.
pub async fn show_vets(
    State(state): State<AppState>,
    Query(query): Query<VetsQuery>,
) -> Result<Response, ApiError> {
    match query.page {
        Some(page) => {
            let page = state
                .vets
                .find_page(PageRequest::new(page, VETS_PAGE_SIZE))
                .await?;
            Ok(Json(PageResponse::<VetResponse>::from(page)).into_response())
        }
        None => {
            let vets = state.vets.find_all().await?;
            Ok(Json(VetsResponse::from(vets)).into_response())
        }
    }
}

/// GET /oups
///
/// Always fails, to show what clients receive when a handler errors.
pub async fn trigger_error() -> Result<Json<()>, ApiError> {
    Err(ApiError::internal(
        "Expected: handler used to showcase what happens when an error is raised",
    ))
}

/// GET /health
///
/// Health check endpoint (no authentication required).
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
