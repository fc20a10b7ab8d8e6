//! # cardgate-server
//!
//! actix-web surface of the gateway: environment configuration, logging
//! bootstrap, the `/block` and `/charge` routes and the channel-backed
//! telemetry sink.

pub mod config;
pub mod errors;
pub mod logging;
pub mod routes;
pub mod server;
pub mod telemetry;

#[cfg(test)]
mod endpoint_tests;
