//! Storefront back-office reconciliation engine.
//!
//! Unifies customer identities across account generations, relinks historical orders,
//! resolves course entitlements for purchased items, drives the order state machine and
//! aggregates dashboard metrics.

pub mod model;
pub mod server;
