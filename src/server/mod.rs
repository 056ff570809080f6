//! Server application core modules.
//!
//! This module contains all server-side functionality of the storefront back-office engine:
//! HTTP routing, database access, identity reconciliation, entitlement resolution, the order
//! state machine, dashboard statistics and the scheduled entitlement repair job.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
