//! HTTP list client, filter state and mutation coordination for the shopdesk backend.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod client;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod mutation;
pub mod view;
