//! Font registration for text rendering.
//!
//! plotters only draws text in families registered here, so a missing font
//! fails the render instead of silently falling back to one without the
//! needed glyphs.

use nowcast_common::{NowcastError, Result};
use plotters::style::{register_font, FontStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::{info, warn};

/// DejaVu Sans, used when no font file is configured. Latin glyphs only.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Family plotters falls back to for unstyled text.
const DEFAULT_FAMILY: &str = "sans-serif";

fn loaded_files() -> &'static Mutex<HashMap<PathBuf, &'static [u8]>> {
    static LOADED: OnceLock<Mutex<HashMap<PathBuf, &'static [u8]>>> = OnceLock::new();
    LOADED.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Read a font file once per process; the bytes live until exit.
fn load_file(path: &Path) -> Result<&'static [u8]> {
    let mut loaded = loaded_files()
        .lock()
        .map_err(|_| NowcastError::graph("font cache lock poisoned"))?;
    if let Some(bytes) = loaded.get(path) {
        return Ok(*bytes);
    }
    let data = std::fs::read(path).map_err(|e| {
        NowcastError::graph_with_source(format!("cannot read font file {}", path.display()), e)
    })?;
    let bytes: &'static [u8] = Box::leak(data.into_boxed_slice());
    loaded.insert(path.to_path_buf(), bytes);
    Ok(bytes)
}

/// Register the font for `family` and as the `sans-serif` fallback.
///
/// With `path` the font is read from that file; otherwise the bundled font
/// is used.
pub fn register_family(family: &str, path: Option<&Path>) -> Result<()> {
    let bytes = match path {
        Some(path) => load_file(path)?,
        None => BUNDLED_FONT,
    };
    for name in [family, DEFAULT_FAMILY] {
        register_font(name, FontStyle::Normal, bytes).map_err(|_| {
            NowcastError::graph(match path {
                Some(path) => format!("{} is not a usable font file", path.display()),
                None => "bundled font is not usable".to_string(),
            })
        })?;
    }

    match path {
        Some(path) => info!(family, path = %path.display(), "Registered chart font"),
        None => info!(family, "Registered bundled chart font"),
    }
    Ok(())
}

/// Whether labels in `language` need glyphs the bundled font lacks.
pub fn needs_cjk_font(language: &str) -> bool {
    let primary = language.split(['-', '_']).next().unwrap_or_default();
    matches!(primary.to_ascii_lowercase().as_str(), "ja" | "zh" | "ko")
}

/// Register the configured font, warning when CJK labels would lack glyphs.
pub fn prepare(family: &str, path: Option<&Path>, language: &str) -> Result<()> {
    if path.is_none() && needs_cjk_font(language) {
        warn!(
            language,
            "No font file configured; {} labels will render without CJK glyphs", language
        );
    }
    register_family(family, path)
}
