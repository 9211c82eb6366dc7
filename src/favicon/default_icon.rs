//! Placeholder icons for pages without a cached favicon
//!
//! A rounded square in one of four colors with the first character of the
//! page title drawn on top. Generation is pure; nothing here is cached.

use image::{Rgba, RgbaImage};

use super::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::bitmap::Bitmap;

/// Character used when the title is blank or absent
pub const FALLBACK_LETTER: char = '?';

const BLUE: [u8; 4] = [0x42, 0x85, 0xF4, 0xFF];
const GREEN: [u8; 4] = [0x0F, 0x9D, 0x58, 0xFF];
const RED: [u8; 4] = [0xDB, 0x44, 0x37, 0xFF];
const ORANGE: [u8; 4] = [0xF4, 0xB4, 0x00, 0xFF];
const LETTER: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// A generated placeholder icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultIcon {
    /// Character the icon was generated for
    pub letter: char,
    /// Background color
    pub color: [u8; 4],
    pub bitmap: Bitmap,
}

/// First non-blank character of `title`, or `?`
pub fn first_letter(title: Option<&str>) -> char {
    title
        .and_then(|t| t.trim_start().chars().next())
        .unwrap_or(FALLBACK_LETTER)
}

/// Background color for a character.
///
/// Digits and letters map to their base-36 value, everything else to -1;
/// `abs(value % 4)` picks the color.
pub fn letter_color(letter: char) -> [u8; 4] {
    let value = letter.to_digit(36).map(|d| d as i32).unwrap_or(-1);
    match (value % 4).abs() {
        0 => BLUE,
        1 => GREEN,
        2 => RED,
        _ => ORANGE,
    }
}

/// Render the placeholder for `title` at `size` x `size` pixels
pub fn render(title: Option<&str>, size: u32) -> DefaultIcon {
    let size = size.max(1);
    let letter = first_letter(title);
    let color = letter_color(letter);

    let radius = size as f32 / 8.0;
    let scale = ((size * 5 / 8) / GLYPH_HEIGHT).max(1);
    let glyph_x = (i64::from(size) - i64::from(GLYPH_WIDTH * scale)) / 2;
    let glyph_y = (i64::from(size) - i64::from(GLYPH_HEIGHT * scale)) / 2;

    let image = RgbaImage::from_fn(size, size, |x, y| {
        if !inside_rounded_square(x, y, size, radius) {
            return Rgba(TRANSPARENT);
        }
        let gx = i64::from(x) - glyph_x;
        let gy = i64::from(y) - glyph_y;
        if gx >= 0 && gy >= 0 {
            let col = (gx / i64::from(scale)) as u32;
            let row = (gy / i64::from(scale)) as u32;
            if glyphs::is_set(letter, col, row) {
                return Rgba(LETTER);
            }
        }
        Rgba(color)
    });

    DefaultIcon {
        letter,
        color,
        bitmap: Bitmap::from_image(image),
    }
}

fn inside_rounded_square(x: u32, y: u32, size: u32, radius: f32) -> bool {
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;
    let far = size as f32 - radius;
    let nx = px.clamp(radius, far);
    let ny = py.clamp(radius, far);
    let (dx, dy) = (px - nx, py - ny);
    dx * dx + dy * dy <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_letter() {
        assert_eq!(first_letter(Some("Hello")), 'H');
        assert_eq!(first_letter(Some("  \tworld")), 'w');
        assert_eq!(first_letter(Some("   ")), '?');
        assert_eq!(first_letter(Some("")), '?');
        assert_eq!(first_letter(None), '?');
    }

    #[test]
    fn test_letter_color_buckets() {
        // 'a' = 10, 'b' = 11, 'c' = 12, 'd' = 13
        assert_eq!(letter_color('c'), BLUE);
        assert_eq!(letter_color('d'), GREEN);
        assert_eq!(letter_color('a'), RED);
        assert_eq!(letter_color('b'), ORANGE);
        assert_eq!(letter_color('A'), letter_color('a'));
        // Non-alphanumerics are -1
        assert_eq!(letter_color('?'), GREEN);
    }

    #[test]
    fn test_render_shape() {
        let icon = render(Some("Hello"), 64);
        assert_eq!(icon.letter, 'H');
        assert_eq!(icon.bitmap.width(), 64);
        assert_eq!(icon.bitmap.height(), 64);

        // Rounded corner is cut out, top edge is background
        assert_eq!(icon.bitmap.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(icon.bitmap.pixel(32, 2), Some(icon.color));
        assert!(icon.bitmap.as_raw().chunks(4).any(|p| p == LETTER));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(Some("Rust"), 48), render(Some("Ruby"), 48));
        assert_eq!(
            render(Some("Rust"), 48).bitmap,
            render(Some("rocket"), 48).bitmap
        );
        assert_eq!(render(None, 32), render(Some(" "), 32));
    }

    #[test]
    fn test_tiny_icon_does_not_panic() {
        let icon = render(Some("x"), 1);
        assert_eq!(icon.bitmap.byte_size(), 4);
    }
}
