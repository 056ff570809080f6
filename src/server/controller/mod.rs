//! HTTP controller endpoints for the storefront back-office API.
//!
//! Controllers translate HTTP requests into service calls and service results into DTOs.
//! Domain errors map to status codes through [`crate::server::error::Error`]'s
//! `IntoResponse` implementation; handlers never build error responses themselves.

pub mod customer;
pub mod entitlement;
pub mod identity;
pub mod order;
pub mod stats;
