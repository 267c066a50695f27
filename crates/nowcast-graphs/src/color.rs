//! Color conversion and the fixed palettes.

use plotters::style::RGBColor;

/// Split a packed `0xRRGGBB` value into normalized channels in `[0, 1]`.
pub fn normalized_rgb(hex: u32) -> (f64, f64, f64) {
    let (r, g, b) = channels(hex);
    (
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    )
}

/// A packed `0xRRGGBB` value as a plotters color.
pub fn rgb(hex: u32) -> RGBColor {
    let (r, g, b) = channels(hex);
    RGBColor(r, g, b)
}

fn channels(hex: u32) -> (u8, u8, u8) {
    (
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// Line color of the density chart (cyan).
pub const DENSITY_LINE: u32 = 0x00BFBF;

/// Wedge color for probabilities of 50% and above.
pub const RAIN: u32 = 0x1E88E5;
/// Wedge color for probabilities from 10% up to 50%.
pub const CAUTION: u32 = 0xFFD54F;
/// Wedge color for dry and unreadable steps.
pub const CLEAR: u32 = 0xE0E0E0;

/// One precipitation-intensity bucket of the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityBucket {
    /// Bar color.
    pub color: u32,
    /// Range label in mm/h.
    pub label: &'static str,
}

/// The eight intensity buckets in drawing order.
pub const INTENSITY_BUCKETS: [IntensityBucket; 8] = [
    IntensityBucket { color: 0xf5f5ff, label: "0~1" },
    IntensityBucket { color: 0xb8ddff, label: "1~5" },
    IntensityBucket { color: 0x58a9ff, label: "5~10" },
    IntensityBucket { color: 0x4070ff, label: "10~20" },
    IntensityBucket { color: 0xfff740, label: "20~30" },
    IntensityBucket { color: 0xffb240, label: "30~50" },
    IntensityBucket { color: 0xff5e40, label: "50~80" },
    IntensityBucket { color: 0xc7408e, label: "80~" },
];
