//! # Time Tool Core
//!
//! This module provides the zoned-time arithmetic behind the time tool.
//!
//! ## Features
//! - Current time queries for any IANA timezone
//! - Conversion of a wall-clock time between timezones
//! - DST detection and signed offset differences
//!
//! ## Modules
//! - `clock`: Injectable source of the current instant
//! - `converter`: The two tool operations and action dispatch
//! - `descriptor`: JSON descriptor of the tool input
//! - `error`: Custom error types and error handling
//! - `models`: Data structures for requests and responses
//! - `timezone`: Timezone resolution and zoned instant construction
//! - `utils`: Helper functions for parsing and formatting

pub mod clock;
pub mod converter;
pub mod descriptor;
pub mod error;
pub mod models;
pub mod timezone;
pub mod utils;
