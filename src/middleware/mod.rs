//! Request middleware and extractors.
//!
//! # Authentication flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. The [`auth::AuthUser`] extractor validates the JWT and exposes claims
//! 3. The handler executes only if the token is valid

pub mod auth;
