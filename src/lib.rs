//! Family financial profile backend.
//!
//! Users arrive from an external identity provider; after their first login
//! they create a family profile (household size, monthly income and
//! expenses, location, risk tolerance) which can then be read, merge-updated,
//! patched field by field, reassigned or deleted.

pub mod backend;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
