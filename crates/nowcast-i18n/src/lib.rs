//! # Nowcast I18n
//!
//! Message catalogs using the Fluent localization system.
//!
//! Catalogs are embedded at compile time; Japanese is the default language
//! and English is bundled as an alternative.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod messages;

pub use catalog::{supported_languages, Catalog, DEFAULT_LANGUAGE};
pub use error::{I18nError, I18nResult};
pub use messages::{MessageKey, Messages};
