//! Core domain values for the shopdesk repair-shop client.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod page;
pub mod query;
pub mod repair;
pub mod report;
pub mod resource;
pub mod types;
