//! Integration testing library for the Pet Clinic.
//!
//! Provides a MySQL container fixture, a call-counting vet repository and a
//! suite-scoped [`TestEnvironment`] that boots the API against the container
//! and guarantees the container is removed when the scenarios finish.

pub mod container;
pub mod counting;
pub mod environment;

// Re-export commonly used types for convenience
pub use container::{MySqlFixture, MYSQL_DATABASE, MYSQL_PASSWORD, MYSQL_TAG, MYSQL_USER};
pub use counting::CountingVetRepository;
pub use environment::{init_tracing, run_scoped, ObservedVets, TestEnvironment};
