//! Agent time tool: current time queries and wall-clock conversion between
//! IANA timezones, served as a single MCP tool.

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod server;
