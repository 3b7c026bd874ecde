//! End-to-end template generation.
//!
//! ```text
//! image -> fit_to_max_side -> quantize -> extract_edges -> dilate ----> render_template
//!                                      \-> region_statistics ------/
//!                             palette ----------------------------> render_legend
//! ```

use crate::arrays::LabelGrid;
use crate::common::Config;
use crate::edges::extract_edges;
use crate::error::Result;
use crate::font::{FontResolver, GlyphRenderer};
use crate::legend::render_legend;
use crate::morphology::dilate;
use crate::quantize::quantize;
use crate::regions::{region_statistics, RegionTable};
use crate::source::{fit_to_max_side, load_rgb};
use crate::template::render_template;
use image::{ImageFormat, Rgb, RgbImage};
use log::info;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

/// Everything produced for one input image.
pub struct Template {
    pub outline: RgbImage,
    pub legend: RgbImage,
    pub palette: Vec<Rgb<u8>>,
    pub regions: RegionTable,
}

/// Renders outline and legend from an already quantized image.
pub fn render_from_labels(
    labels: &LabelGrid,
    palette: Vec<Rgb<u8>>,
    config: &Config,
    font: &dyn GlyphRenderer,
) -> Result<Template> {
    let start = Instant::now();
    let edges = extract_edges(labels);
    let boundary = dilate(&edges, config.dilation);
    labels.ensure_same_shape(&boundary)?;
    let regions = region_statistics(labels, palette.len())?;
    let outline = render_template(&boundary, &regions, font, config.min_area)?;
    let legend = render_legend(&palette, &config.legend, font);
    info!(
        "rendered template: {} boundary pixels, {} numbered regions in {:?}",
        boundary.count_set(),
        regions.labeled(config.min_area).count(),
        start.elapsed()
    );
    Ok(Template {
        outline,
        legend,
        palette,
        regions,
    })
}

/// Resizes, quantizes and renders `image`.
pub fn generate(image: &RgbImage, config: &Config, fonts: &FontResolver) -> Result<Template> {
    let working = fit_to_max_side(image, config.max_side)?;
    let quantized = quantize(
        &working,
        config.num_colors as usize,
        config.quantize_iterations,
    )?;
    let font = fonts.resolve(Config::font_size(quantized.labels.height));
    render_from_labels(&quantized.labels, quantized.palette, config, font.as_ref())
}

fn encode(img: &RgbImage, path: &Path) -> Result<Vec<u8>> {
    let format = ImageFormat::from_path(path)?;
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Reads `input` and writes the outline and color key images.
///
/// Both images are encoded in the format named by their path's extension before either file
/// is written, so an unsupported extension leaves no partial output behind.
pub fn run(
    input: &Path,
    outline_path: &Path,
    key_path: &Path,
    config: &Config,
    fonts: &FontResolver,
) -> Result<Template> {
    let image = load_rgb(input)?;
    let template = generate(&image, config, fonts)?;
    let outline = encode(&template.outline, outline_path)?;
    let key = encode(&template.legend, key_path)?;
    std::fs::write(outline_path, outline)?;
    info!("wrote {}", outline_path.display());
    std::fs::write(key_path, key)?;
    info!("wrote {}", key_path.display());
    Ok(template)
}
