//! GlueLedger server library.
//!
//! This crate provides the REST API as a library, allowing the router to be
//! driven directly in tests and the migrator and repositories to be reused
//! by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod state;
