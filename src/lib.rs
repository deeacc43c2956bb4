//! bioview - page-view analytics for link-in-bio pages
//!
//! Records deduplicated profile-page views and summarizes the trailing
//! week of activity by weekday and device type.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `analytics`: view recorder, aggregator, device classification
//! - `storage`: `EventStore` trait with in-memory and SeaORM backends
//! - `api`: HTTP services
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod analytics;
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
