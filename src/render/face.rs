//! Fixed-size bitmap face for the icon digits.
//!
//! Each glyph is a 5x7 cell grid drawn as solid squares of `scale` pixels.
//! The face covers the digits and the ready glyph; anything else advances
//! as a blank cell.

use image::{Rgba, RgbaImage};

const GLYPH_COLUMNS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
const GAP_COLUMNS: u32 = 1;

/// Rows of a glyph, most significant of the low five bits is the left column.
type Glyph = [u8; GLYPH_ROWS as usize];

#[rustfmt::skip]
const DIGITS: [Glyph; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

#[rustfmt::skip]
const PLAY: Glyph = [0b10000, 0b11000, 0b11100, 0b11110, 0b11100, 0b11000, 0b10000];

fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch {
        '0'..='9' => DIGITS.get(ch as usize - '0' as usize),
        '▶' => Some(&PLAY),
        _ => None,
    }
}

/// A bitmap face at a fixed pixel scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFace {
    scale: u32,
}

impl BitmapFace {
    /// Creates a face whose cells are `scale` pixels square.
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Returns true if the face has a glyph for `ch`.
    pub fn supports(&self, ch: char) -> bool {
        glyph(ch).is_some()
    }

    /// Returns the pixel width and height of `text`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let count = text.chars().count() as u32;
        if count == 0 {
            return (0, 0);
        }
        let columns = count * GLYPH_COLUMNS + (count - 1) * GAP_COLUMNS;
        (columns * self.scale, GLYPH_ROWS * self.scale)
    }

    /// Draws `text` with its top-left corner at (`x`, `y`), clipped to the image.
    pub fn draw(&self, img: &mut RgbaImage, text: &str, x: i32, y: i32, color: Rgba<u8>) {
        let advance = ((GLYPH_COLUMNS + GAP_COLUMNS) * self.scale) as i32;

        for (index, ch) in text.chars().enumerate() {
            let Some(rows) = glyph(ch) else {
                continue;
            };
            let origin_x = x + index as i32 * advance;

            for (row, bits) in rows.iter().enumerate() {
                for column in 0..GLYPH_COLUMNS {
                    if bits & (1 << (GLYPH_COLUMNS - 1 - column)) == 0 {
                        continue;
                    }
                    let cell_x = origin_x + (column * self.scale) as i32;
                    let cell_y = y + (row as u32 * self.scale) as i32;
                    fill_rect(img, cell_x, cell_y, self.scale, color);
                }
            }
        }
    }
}

fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, size: u32, color: Rgba<u8>) {
    for dy in 0..size as i32 {
        for dx in 0..size as i32 {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_supports() {
        let face = BitmapFace::new(1);
        for ch in "0123456789▶".chars() {
            assert!(face.supports(ch), "missing glyph for {ch}");
        }
        assert!(!face.supports('x'));
        assert!(!face.supports(':'));
    }

    #[test]
    fn test_measure() {
        let face = BitmapFace::new(5);
        assert_eq!(face.measure(""), (0, 0));
        assert_eq!(face.measure("8"), (25, 35));
        assert_eq!(face.measure("25"), (55, 35));
    }

    #[test]
    fn test_zero_scale_is_clamped() {
        assert_eq!(BitmapFace::new(0).measure("1"), (5, 7));
    }

    #[test]
    fn test_draw_one() {
        let face = BitmapFace::new(1);
        let mut img = RgbaImage::from_pixel(5, 7, BLACK);
        face.draw(&mut img, "1", 0, 0, WHITE);

        // top row of "1" is 00100
        assert_eq!(*img.get_pixel(2, 0), WHITE);
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        // bottom row is 01110
        assert_eq!(*img.get_pixel(1, 6), WHITE);
        assert_eq!(*img.get_pixel(4, 6), BLACK);
    }

    #[test]
    fn test_draw_is_clipped() {
        let face = BitmapFace::new(4);
        let mut img = RgbaImage::from_pixel(8, 8, BLACK);
        // would panic on out-of-bounds writes if not clipped
        face.draw(&mut img, "888", -3, -3, WHITE);
    }

    #[test]
    fn test_unknown_chars_advance_blank() {
        let face = BitmapFace::new(1);
        let mut img = RgbaImage::from_pixel(11, 7, BLACK);
        face.draw(&mut img, "?1", 0, 0, WHITE);

        assert!(img
            .enumerate_pixels()
            .filter(|(x, _, _)| *x < 6)
            .all(|(_, _, p)| *p == BLACK));
        assert_eq!(*img.get_pixel(8, 0), WHITE);
    }
}
