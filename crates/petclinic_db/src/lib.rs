//! MySQL storage for the Pet Clinic
//!
//! This crate implements the repository traits from `petclinic_core` on top
//! of a `sqlx` MySQL connection pool, and owns the SQL scripts that create
//! and seed the schema.
//!
//! # Usage
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), petclinic_db::DbError> {
//! use petclinic_db::{DataSourceConfig, InitializationMode};
//!
//! let config = DataSourceConfig::new("mysql://localhost:3306/petclinic")
//!     .with_credentials("petclinic", "petclinic")
//!     .with_initialization_mode(InitializationMode::Always);
//!
//! let pool = petclinic_db::connect(&config).await?;
//! petclinic_db::initialize_schema(&pool, config.initialization_mode).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod owners;
pub mod pool;
pub mod schema;
pub mod vets;

pub use config::{DataSourceConfig, InitializationMode};
pub use errors::{DbError, DbResult};
pub use owners::MySqlOwnerRepository;
pub use pool::{connect, connect_options, ping};
pub use schema::{initialize_schema, split_statements};
pub use vets::MySqlVetRepository;

pub use sqlx::MySqlPool;
