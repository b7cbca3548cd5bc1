//! Logger setup.
//!
//! Everything else in the crate only talks to the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
