//! Service layer for business logic.
//!
//! Services coordinate repositories into the engine's operations: identity reconciliation
//! and order linking, course entitlement resolution and repair, the order state machine and
//! dashboard statistics.

pub mod entitlement;
pub mod identity;
pub mod order;
pub mod retry;
pub mod stats;
