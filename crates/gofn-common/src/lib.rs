//! gofn Common Library
//!
//! Shared plumbing for the gofn binaries.
//!
//! Currently this is the logging setup: every binary in the workspace
//! configures `tracing` through [`logging::init_logging`] so that log
//! output, levels and file rotation behave the same everywhere.
//!
//! # Example
//!
//! ```no_run
//! use gofn_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod logging;

pub use logging::{init_logging, LogConfig, LogGuard};
