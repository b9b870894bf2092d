//! Pet Clinic REST API
//!
//! This crate exposes the clinic over HTTP: owners with their pets and
//! visits, pet types and the (cached) list of veterinarians.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - HTTP request/response translation
//! - Error mapping from domain to HTTP
//! - Routing and server configuration
//! - Assembling storage for the configured profile
//!
//! **CRITICAL**: This crate must never be imported by the domain or storage
//! crates. The dependency flows: HTTP API → storage → domain, never the reverse.

use std::sync::Arc;

use petclinic_core::{
    CacheConfig, CachedVetRepository, InMemoryStore, OwnerRepository, VetRepository,
};

pub mod application;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod translation;

// Re-export key types for convenience
pub use application::Application;
pub use config::{AppConfig, ConfigError, Profile};
pub use errors::{ApiError, ErrorResponse};
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer, RunningServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Owners, their pets and visits, and the pet type catalogue
    pub owners: Arc<dyn OwnerRepository>,

    /// Veterinarians, normally behind a [`CachedVetRepository`]
    pub vets: Arc<dyn VetRepository>,
}

impl AppState {
    /// Create application state from explicit repositories.
    pub fn new(owners: Arc<dyn OwnerRepository>, vets: Arc<dyn VetRepository>) -> Self {
        Self { owners, vets }
    }

    /// State backed by a seeded [`InMemoryStore`], with vets behind the cache.
    pub fn in_memory(cache: &CacheConfig) -> Self {
        let store = Arc::new(InMemoryStore::seeded());
        let vets = CachedVetRepository::new(Arc::clone(&store), cache);
        Self::new(store, Arc::new(vets))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(&CacheConfig::default())
    }
}
