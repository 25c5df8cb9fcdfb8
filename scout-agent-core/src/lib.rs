#![doc = "scout-agent-core: core discovery pipeline library for the askme scout agent."]

//! This crate contains all pipeline logic for one model-discovery run:
//! source connectors, rate limiting, deduplication, enrichment, report
//! assembly, local snapshot persistence, CSV export and backend delivery.
//! CLI glue (argument parsing, config files) lives in the `scout-agent`
//! binary crate.
//!
//! # Usage
//! Build a [`enrich::RunContext`], construct connectors (or mocks) and call
//! [`discover::run_pipeline`].

pub mod backend;
pub mod connectors;
pub mod contract;
pub mod dedup;
pub mod discover;
pub mod enrich;
pub mod error;
pub mod model;
pub mod rate_limit;
pub mod report;
pub mod store;

pub use error::ScoutError;
