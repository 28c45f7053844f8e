//! Logger setup.
//!
//! Code everywhere logs through the `log` facade; only binaries call
//! [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
