//! Logging utilities.
//!
//! The crate itself only talks to the `log` facade. This module installs the
//! `env_logger` backend for applications that don't bring their own.

mod init;

pub use init::{init_logging, LoggingConfig};
