//! # depot-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/api` (stores, boxes, equipment, items,
//!   faults, events, users) and a `/health` check
//! - Resolve the acting user from an `Authorization: Bearer` token
//!   (HS256 JWT) and hand it to the services as an [`Actor`]
//! - Hash and verify passwords with bcrypt behind the app's
//!   `PasswordHasher` port
//! - Map [`DepotError`] variants onto HTTP status codes
//!
//! ## Dependency rule
//! Depends on `depot-app` (for port traits and services) and `depot-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.
//!
//! [`Actor`]: depot_domain::rights::Actor
//! [`DepotError`]: depot_domain::error::DepotError

pub mod api;
pub mod auth;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
