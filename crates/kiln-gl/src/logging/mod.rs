//! Logging setup.
//!
//! The crate itself only emits through the `log` facade; this module offers
//! a one-call `env_logger` setup for binaries and examples.

mod init;

pub use init::{init_logging, LoggingConfig};
