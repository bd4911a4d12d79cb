//! Shared types for the guidepay checkout backend.
//!
//! - [`objects`]: request / response bodies of the HTTP API.
//! - [`signature`]: the gateway's payment signature scheme.
//! - `client` (feature `client`): a typed HTTP client for the API.

#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod signature;
