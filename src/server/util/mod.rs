//! Utility functions shared by repositories and services.
//!
//! Email normalization for identity lookups, text normalization for course title matching
//! and the time windows used by dashboard statistics.

pub mod email;
pub mod text;
pub mod time;
