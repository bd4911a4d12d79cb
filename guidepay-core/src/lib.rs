#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod gateway;
pub mod ledger;
pub mod notifier;
pub mod pipeline;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
pub(crate) mod stub_server;
