//! # Nowcast Graphs
//!
//! Aggregation of nowcast runs and chart rendering with plotters.
//!
//! Each chart is drawn onto its own [`ChartCanvas`] and encoded to PNG; no
//! drawing state outlives a render.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod canvas;
pub mod color;
pub mod fonts;
pub mod manager;
pub mod traits;
pub mod utils;

pub mod area_rain;
pub mod histogram;
pub mod place_icons;
pub mod place_rain;

pub use aggregator::*;
pub use canvas::ChartCanvas;
pub use manager::*;
pub use traits::*;
