//! mindwell-core
//!
//! Pure domain types. No HTTP, no database, no AWS dependency. This is the
//! shared vocabulary of the MindWell system.

pub mod error;
pub mod models;
