//! Oleh's Garden storefront library.
//!
//! Holds the catalog, the client-side cart container and the order pipeline,
//! plus the HTTP surface the binary serves. Exposed as a library so the CLI
//! and the integration tests can use the same code.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod order;
pub mod routes;
pub mod services;
pub mod state;
