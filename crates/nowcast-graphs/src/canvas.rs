//! Owned pixel buffer that charts are drawn onto.

use nowcast_common::{NowcastError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// An RGB canvas owned by a single render.
///
/// Every chart gets a fresh canvas; nothing is shared between renders.
#[derive(Debug, Clone)]
pub struct ChartCanvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl ChartCanvas {
    /// A white canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![255; width as usize * height as usize * 3],
        }
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Drawing area covering the whole canvas.
    pub fn root(&mut self) -> DrawingArea<BitMapBackend<'_>, Shift> {
        BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height)).into_drawing_area()
    }

    /// Raw RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    /// Color at `(x, y)`, `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<RGBColor> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        let rgb = self.buffer.get(offset..offset + 3)?;
        Some(RGBColor(rgb[0], rgb[1], rgb[2]))
    }

    fn into_image(self) -> Result<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.buffer)
            .ok_or_else(|| NowcastError::graph("canvas buffer does not match its size"))
    }

    /// Encode the canvas as PNG bytes.
    pub fn encode_png(self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(self.into_image()?)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Write the canvas to a PNG file.
    pub fn save_png(self, path: &Path) -> Result<()> {
        self.into_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
