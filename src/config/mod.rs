//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: CORS allowed-origins configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT secret and token lifetime

pub mod cors;
pub mod database;
pub mod jwt;
