//! Paint-by-numbers template generator.
//!
//! This crate turns a photo into the two sheets of a paint-by-numbers kit: an outline drawing
//! with a number inside every sufficiently large color region, and a color key mapping each
//! number to its paint.
//!
//! The image is first reduced to a small palette ([`quantize`]), giving one label per pixel.
//! Everything else works on that label grid:
//!
//! - [`edges::extract_edges`] marks pixels whose 4-neighbors carry another label,
//! - [`morphology::dilate`] thickens those edges with a cross-shaped structuring element,
//! - [`regions::region_statistics`] computes area and centroid of every label,
//! - [`template::render_template`] paints the outline and centers the numbers,
//! - [`legend::render_legend`] lays out the swatches of the color key.
//!
//! The following example runs the whole pipeline on an in-memory image:
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use paint_by_numbers::common::Config;
//! use paint_by_numbers::font::FontResolver;
//! use paint_by_numbers::pipeline::generate;
//!
//! let img = RgbImage::from_fn(64, 48, |x, y| {
//!     if x < 32 { Rgb([200, 30, 30]) } else if y < 24 { Rgb([30, 30, 200]) } else { Rgb([240, 240, 240]) }
//! });
//! let mut config = Config::default();
//! config.num_colors = 3;
//! config.min_area = 50;
//! let template = generate(&img, &config, &FontResolver::default()).unwrap();
//! assert_eq!(template.outline.dimensions(), (64, 48));
//! assert_eq!(template.palette.len(), 3);
//! ```
//!
//! Region statistics are computed per label, not per connected region: a color used in two
//! separate places gets one number at the centroid of all its pixels.
//!
//! Edge extraction, dilation, statistics and the quantizer run their per-pixel work on the
//! rayon thread pool. Results do not depend on the number of threads.

pub mod arrays;
pub mod cielab;
pub mod common;
pub mod edges;
pub mod error;
pub mod font;
pub mod legend;
pub mod morphology;
pub mod pipeline;
pub mod quantize;
pub mod regions;
pub mod source;
pub mod template;

pub use error::{Error, Result};
