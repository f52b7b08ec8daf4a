//! netscaff server: the HTTP API and command-line front end.
//!
//! The `netscaff` binary is a thin dispatcher over this library so the
//! router and command handlers can be driven from integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod output;
