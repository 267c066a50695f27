//! # Nowcast Common
//!
//! Shared types, utilities, and common functionality for Nowcast Notice.
//!
//! This crate provides the data model decoded from the trigger event, the
//! error taxonomy, and the logging bootstrap used across the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{NowcastError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::*;
