//! # ESR Shared Rust Library
//!
//! Infrastructure around the `esr-core` engine:
//! - **config**: JSON engine configuration and construction of engine objects
//! - **error**: Common error types
//! - **tracing**: Logging setup for binaries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use esr::config::EngineConfig;
//!
//! let config = EngineConfig::load("esr.json")?;
//! let tier = config.classifier().classify("I'm feeling overwhelmed");
//! ```

pub mod config;
pub mod error;
pub mod tracing;

pub use config::EngineConfig;
pub use error::{Error, Result};
