//! # Nowcast Config
//!
//! Type-safe configuration management for Nowcast Notice.
//!
//! This crate provides the configuration schema, its defaults, loading from
//! YAML or TOML files with environment variable overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
