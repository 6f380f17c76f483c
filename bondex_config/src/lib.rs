#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Configuration file for the `bondex` CLI.
//!
//! Lives at `~/bondex/config.json` and holds the log level plus named
//! extraction profiles.

mod schema;

pub use schema::{CONFIG_TEMPLATE, Config, ExtractionConfig, LoggingConfig};
