//! # Nowcast Notice
//!
//! Turns a high-resolution precipitation nowcast event into charts and a
//! short summary, posts them to Twitter and archives the analysis in an
//! S3-compatible bucket.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod archiver;
pub mod error;
pub mod oauth;
pub mod pipeline;
pub mod publisher;
pub mod summary;

pub use archiver::Archiver;
pub use error::*;
pub use oauth::OAuthCredentials;
pub use pipeline::*;
pub use publisher::*;
pub use summary::*;
