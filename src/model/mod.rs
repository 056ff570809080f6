//! API data transfer objects shared by controllers and services.
//!
//! All timestamps are exposed as `DateTime<Utc>` so they serialize as RFC 3339 strings.

pub mod api;
pub mod customer;
pub mod entitlement;
pub mod order;
pub mod stats;
