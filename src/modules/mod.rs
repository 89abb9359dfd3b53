//! Feature modules. Each follows the same structure: `controller.rs` for
//! HTTP handlers, `service.rs` for business logic, `model.rs` for entities
//! and DTOs, `router.rs` for route wiring.

pub mod auth;
pub mod posts;
pub mod users;
