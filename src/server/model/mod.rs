//! Server-side models shared between layers.

pub mod app;
pub mod db;
