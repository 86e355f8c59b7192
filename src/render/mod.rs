//! Tray icon rendering.
//!
//! Produces the 64x64 icon: a dark red square with the remaining time (or
//! the ready glyph) in white, and one light green dot per completed focus
//! session along the bottom edge.

mod face;

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::warn;

pub use face::BitmapFace;

use crate::types::CYCLE_LENGTH;

// ============================================================================
// Constants
// ============================================================================

/// Width and height of the icon in pixels.
pub const ICON_SIZE: u32 = 64;

/// Bytes published when PNG encoding fails.
pub const FALLBACK_ICON: &[u8] = &[0x00];

const BACKGROUND: Rgba<u8> = Rgba([139, 0, 0, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DOT_COLOR: Rgba<u8> = Rgba([144, 238, 144, 255]);

const FACE_SCALE: u32 = 5;
/// Text sits this far above true centre to leave room for the dots.
const TEXT_LIFT: i32 = 5;

const DOT_RADIUS: i32 = 6;
const DOT_SPACING: i32 = 5;
const DOT_START_X: i32 = 5;
const DOT_Y: i32 = 56;

// ============================================================================
// IconRenderer
// ============================================================================

/// Renders icons from a prepared background and face.
#[derive(Debug, Clone)]
pub struct IconRenderer {
    base: RgbaImage,
    face: BitmapFace,
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl IconRenderer {
    /// Prepares the background canvas and the digit face.
    pub fn new() -> Self {
        Self {
            base: RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, BACKGROUND),
            face: BitmapFace::new(FACE_SCALE),
        }
    }

    /// Renders the icon as raw RGBA pixels.
    ///
    /// `dots` above the cycle length are drawn as a full cycle.
    pub fn render_image(&self, text: &str, dots: u32) -> RgbaImage {
        let mut img = self.base.clone();

        let (width, height) = self.face.measure(text);
        let x = (ICON_SIZE as i32 - width as i32) / 2;
        let y = (ICON_SIZE as i32 - height as i32) / 2 - TEXT_LIFT;
        self.face.draw(&mut img, text, x, y, TEXT_COLOR);

        for i in 0..dots.min(CYCLE_LENGTH) as i32 {
            let dot_x = DOT_START_X + i * (DOT_RADIUS * 2 + DOT_SPACING);
            fill_circle(&mut img, dot_x, DOT_Y, DOT_RADIUS, DOT_COLOR);
        }

        img
    }

    /// Renders the icon as PNG bytes.
    ///
    /// Never fails: an encoding error yields [`FALLBACK_ICON`].
    pub fn render(&self, text: &str, dots: u32) -> Vec<u8> {
        let img = self.render_image(text, dots);
        match encode_png(&img) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode icon: {}", e);
                FALLBACK_ICON.to_vec()
            }
        }
    }
}

/// Encodes an image as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
