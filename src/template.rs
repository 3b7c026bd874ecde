//! Outline image: white paper, black region boundaries and one number per large region.

use crate::arrays::Mask;
use crate::error::{Error, Result};
use crate::font::GlyphRenderer;
use crate::regions::RegionTable;
use image::{Rgb, RgbImage};
use log::debug;

pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// A region number and the top-left corner at which it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    pub label: usize,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Positions the 1-based number of every region with `area >= min_area` so that its text box
/// is centered on the region centroid. Regions below the threshold are left out.
pub fn place_labels(
    regions: &RegionTable,
    font: &dyn GlyphRenderer,
    min_area: usize,
) -> Vec<LabelPlacement> {
    regions
        .labeled(min_area)
        .filter_map(|region| {
            let (cy, cx) = region.centroid?;
            let text = region.display_number().to_string();
            let (w, h) = font.text_size(&text);
            Some(LabelPlacement {
                label: region.label,
                x: (cx - w as f64 / 2.0).round() as i32,
                y: (cy - h as f64 / 2.0).round() as i32,
                text,
            })
        })
        .collect()
}

/// Paints the boundary mask and then the region numbers.
///
/// Fails with [`Error::ShapeMismatch`] when `boundary` and `regions` come from grids of
/// different size.
pub fn render_template(
    boundary: &Mask,
    regions: &RegionTable,
    font: &dyn GlyphRenderer,
    min_area: usize,
) -> Result<RgbImage> {
    if boundary.shape() != (regions.width, regions.height) {
        return Err(Error::ShapeMismatch {
            expected_width: regions.width,
            expected_height: regions.height,
            width: boundary.width,
            height: boundary.height,
        });
    }
    let mut outline = RgbImage::from_pixel(boundary.width as u32, boundary.height as u32, PAPER);
    for (pixel, set) in outline.pixels_mut().zip(boundary.data.iter()) {
        if *set {
            *pixel = INK;
        }
    }
    let placements = place_labels(regions, font, min_area);
    debug!(
        "numbering {} of {} regions",
        placements.len(),
        regions.regions.len()
    );
    for p in &placements {
        font.draw_text(&mut outline, p.x, p.y, &p.text, INK);
    }
    Ok(outline)
}
