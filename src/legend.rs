//! Color key: one swatch and its 1-based number per palette entry, in reading order.

use crate::common::LegendLayout;
use crate::font::GlyphRenderer;
use crate::template::{INK, PAPER};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

impl LegendLayout {
    /// `(row, column)` of palette entry `index`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    pub fn rows(&self, entries: usize) -> usize {
        entries.div_ceil(self.columns)
    }

    /// Width and height of a legend holding `entries` swatches.
    pub fn image_size(&self, entries: usize) -> (u32, u32) {
        (
            self.columns as u32 * self.cell_pitch_x,
            self.rows(entries) as u32 * self.cell_pitch_y,
        )
    }

    /// Top-left corner of the swatch of palette entry `index`.
    pub fn swatch_origin(&self, index: usize) -> (u32, u32) {
        let (row, col) = self.cell(index);
        (
            col as u32 * self.cell_pitch_x + self.swatch_offset.0,
            row as u32 * self.cell_pitch_y + self.swatch_offset.1,
        )
    }
}

/// Renders the color key. An empty palette gives a zero-height image.
pub fn render_legend(
    palette: &[Rgb<u8>],
    layout: &LegendLayout,
    font: &dyn GlyphRenderer,
) -> RgbImage {
    let (width, height) = layout.image_size(palette.len());
    let mut legend = RgbImage::from_pixel(width, height, PAPER);
    for (i, color) in palette.iter().enumerate() {
        let (x, y) = layout.swatch_origin(i);
        let side = layout.swatch_size + 1;
        draw_filled_rect_mut(
            &mut legend,
            Rect::at(x as i32, y as i32).of_size(side, side),
            *color,
        );
        font.draw_text(
            &mut legend,
            (x + layout.text_offset.0) as i32,
            (y + layout.text_offset.1) as i32,
            &(i + 1).to_string(),
            INK,
        );
    }
    legend
}
