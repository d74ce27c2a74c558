//! Logging utilities.
//!
//! Centralizes logger initialization. The engine only ever talks to the
//! `log` facade; `env_logger` is wired up here, once, early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
