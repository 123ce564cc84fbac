//! GlueLedger Core - Shared types and domain constants.
//!
//! This crate provides the pieces used across all GlueLedger components:
//! - `server` - REST API for batches, inventory, sales and reporting
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs
//! - [`recipe`] - The fixed chemical recipe, baselined at 170 kg of latex
//! - [`stats`] - Closed-form descriptive statistics for reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod recipe;
pub mod stats;
pub mod types;

pub use types::*;
