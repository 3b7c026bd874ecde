//! Text measurement and drawing for region numbers and legend indices.
//!
//! Renderers sit behind [`GlyphRenderer`] so the template and legend code never know which
//! font won. [`FontResolver`] tries an ordered list of [`FontSource`]s and falls back to the
//! embedded [`BuiltinFont`] when none of them loads.

use crate::error::{Error, Result};
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::{debug, info, warn};
use std::path::PathBuf;

pub trait GlyphRenderer: Send + Sync {
    /// Human readable name, used in logs.
    fn name(&self) -> &str;

    /// Width and height in pixels of the box covered by `text`.
    fn text_size(&self, text: &str) -> (u32, u32);

    /// Draws `text` with the top-left corner of its box at `(x, y)`. Pixels falling outside
    /// the canvas are dropped.
    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>);
}

/// TrueType/OpenType font rasterized with `ab_glyph`.
pub struct TrueTypeFont {
    name: String,
    font: FontVec,
    scale: PxScale,
}

impl TrueTypeFont {
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>, size: f32) -> Result<Self> {
        let name = name.into();
        let font = FontVec::try_from_vec(data).map_err(|e| Error::Font {
            path: PathBuf::from(&name),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            font,
            scale: PxScale::from(size),
        })
    }
}

impl GlyphRenderer for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_size(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

// 5x7 digits, one byte per row, bit 4 is the leftmost column.
const DIGITS: [[u8; GLYPH_H as usize]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
];

/// Embedded blocky digit font. Characters other than `0-9` are drawn as blanks.
pub struct BuiltinFont {
    scale: u32,
}

impl BuiltinFont {
    /// Picks an integer pixel scale close to the requested font size.
    pub fn new(size: f32) -> Self {
        Self {
            scale: ((size / 8.0) as u32).max(1),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn advance(&self) -> u32 {
        (GLYPH_W + 1) * self.scale
    }
}

impl GlyphRenderer for BuiltinFont {
    fn name(&self) -> &str {
        "builtin"
    }

    fn text_size(&self, text: &str) -> (u32, u32) {
        let n = text.chars().count() as u32;
        if n == 0 {
            return (0, 0);
        }
        (n * self.advance() - self.scale, GLYPH_H * self.scale)
    }

    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let (width, height) = (canvas.width() as i64, canvas.height() as i64);
        let s = self.scale as i64;
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = ch.to_digit(10).map(|d| &DIGITS[d as usize]) else {
                continue;
            };
            let origin_x = x as i64 + i as i64 * self.advance() as i64;
            for (gy, bits) in glyph.iter().enumerate() {
                for gx in 0..GLYPH_W as i64 {
                    if bits & (0x10 >> gx) == 0 {
                        continue;
                    }
                    for py in 0..s {
                        for px in 0..s {
                            let cx = origin_x + gx * s + px;
                            let cy = y as i64 + gy as i64 * s + py;
                            if (0..width).contains(&cx) && (0..height).contains(&cy) {
                                canvas.put_pixel(cx as u32, cy as u32, color);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Where to look for a font.
#[derive(Clone, Debug)]
pub enum FontSource {
    File(PathBuf),
    Memory { name: String, data: Vec<u8> },
}

impl FontSource {
    fn load(&self, size: f32) -> Result<TrueTypeFont> {
        match self {
            FontSource::File(path) => {
                let data = std::fs::read(path)?;
                TrueTypeFont::from_bytes(path.display().to_string(), data, size)
            }
            FontSource::Memory { name, data } => {
                TrueTypeFont::from_bytes(name.clone(), data.clone(), size)
            }
        }
    }
}

/// Platform font locations tried when no font is given explicitly.
pub const DEFAULT_FONT_PATHS: [&str; 5] = [
    "arial.ttf",
    "/System/Library/Fonts/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// Ordered font lookup. The first source that loads wins.
#[derive(Clone, Debug)]
pub struct FontResolver {
    pub sources: Vec<FontSource>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self {
            sources: DEFAULT_FONT_PATHS
                .iter()
                .map(|p| FontSource::File(PathBuf::from(p)))
                .collect(),
        }
    }
}

impl FontResolver {
    pub fn new(sources: Vec<FontSource>) -> Self {
        Self { sources }
    }

    /// Puts `source` in front of every other candidate.
    pub fn prefer(mut self, source: FontSource) -> Self {
        self.sources.insert(0, source);
        self
    }

    /// Loads the first usable font at `size` pixels, or the builtin font.
    pub fn resolve(&self, size: f32) -> Box<dyn GlyphRenderer> {
        for source in &self.sources {
            match source.load(size) {
                Ok(font) => {
                    info!("using font {} at {size}px", font.name());
                    return Box::new(font);
                }
                Err(Error::Io(e)) => debug!("font candidate {source:?} skipped: {e}"),
                Err(e) => warn!("{e}"),
            }
        }
        warn!("no font found, falling back to builtin digits");
        Box::new(BuiltinFont::new(size))
    }
}

#[cfg(test)]
mod tests {
    use super::{BuiltinFont, FontResolver, FontSource, GlyphRenderer};
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    // Ten identical block glyphs for 0-9: 1000 units per em, ascender 800, ink spanning
    // x 100..500 and y 0..700 of a 600 unit advance.
    const DIGITS_TTF: &[u8] = include_bytes!("../tests/fixtures/digits.ttf");

    fn digits_source() -> FontSource {
        FontSource::Memory {
            name: "digits".into(),
            data: DIGITS_TTF.to_vec(),
        }
    }

    #[test]
    fn memory_source_wins_over_fallback() {
        let resolver = FontResolver::new(vec![
            FontSource::File(PathBuf::from("/definitely/not/here.ttf")),
            digits_source(),
        ]);
        let font = resolver.resolve(20.0);
        assert_eq!(font.name(), "digits");
        assert_eq!(font.text_size("1"), (12, 20));
        assert_eq!(font.text_size("12"), (24, 20));
    }

    #[test]
    fn truetype_ink_stays_inside_measured_box() {
        let font = FontResolver::new(vec![digits_source()]).resolve(20.0);
        let mut canvas = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        let (x, y) = (7, 9);
        font.draw_text(&mut canvas, x, y, "42", Rgb([0, 0, 0]));
        let (w, h) = font.text_size("42");
        let mut inked = 0;
        for (px, py, p) in canvas.enumerate_pixels() {
            if p.0 != [255, 255, 255] {
                inked += 1;
                assert!(
                    (x as u32..x as u32 + w).contains(&px) && (y as u32..y as u32 + h).contains(&py),
                    "ink at ({px}, {py}) outside {w}x{h} box at ({x}, {y})"
                );
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn missing_and_broken_sources_fall_back_to_builtin() {
        let resolver = FontResolver::new(vec![
            FontSource::File(PathBuf::from("/definitely/not/here.ttf")),
            FontSource::Memory {
                name: "garbage".into(),
                data: vec![1, 2, 3, 4],
            },
        ]);
        let font = resolver.resolve(20.0);
        assert_eq!(font.name(), "builtin");
    }

    #[test]
    fn prefer_puts_source_first() {
        let resolver = FontResolver::default().prefer(FontSource::File("mine.ttf".into()));
        assert!(matches!(&resolver.sources[0], FontSource::File(p) if p.ends_with("mine.ttf")));
        assert_eq!(resolver.sources.len(), 6);
    }

    #[test]
    fn builtin_measures_digits() {
        let font = BuiltinFont::new(20.0);
        assert_eq!(font.scale(), 2);
        assert_eq!(font.text_size("7"), (10, 14));
        assert_eq!(font.text_size("12"), (22, 14));
        assert_eq!(font.text_size(""), (0, 0));
        assert_eq!(BuiltinFont::new(3.0).scale(), 1);
    }

    #[test]
    fn builtin_draws_inside_its_box() {
        let font = BuiltinFont::new(12.0);
        let mut canvas = RgbImage::from_pixel(20, 12, Rgb([255, 255, 255]));
        font.draw_text(&mut canvas, 2, 3, "1", Rgb([0, 0, 0]));
        let (w, h) = font.text_size("1");
        let mut inked = 0;
        for (x, y, p) in canvas.enumerate_pixels() {
            if p.0 == [0, 0, 0] {
                inked += 1;
                assert!((2..2 + w).contains(&x) && (3..3 + h).contains(&y));
            }
        }
        // the glyph for 1 has 10 set bits
        assert_eq!(inked, 10);
    }

    #[test]
    fn builtin_clips_at_canvas_border() {
        let font = BuiltinFont::new(16.0);
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        font.draw_text(&mut canvas, -3, -5, "8", Rgb([0, 0, 0]));
        font.draw_text(&mut canvas, 3, 3, "0", Rgb([0, 0, 0]));
    }
}
