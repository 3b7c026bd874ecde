use crate::error::{Error, Result};

/// Geometry of the color-key legend. All values are in pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendLayout {
    /// Swatches per legend row.
    pub columns: usize,
    /// Horizontal distance between the origins of neighboring cells.
    pub cell_pitch_x: u32,
    /// Vertical distance between the origins of neighboring cells.
    pub cell_pitch_y: u32,
    /// Offset of the swatch inside its cell.
    pub swatch_offset: (u32, u32),
    /// Swatch side length. The filled square covers `swatch_size + 1` pixels per side, the
    /// corner at `origin + swatch_size` included.
    pub swatch_size: u32,
    /// Offset of the index text relative to the swatch origin.
    pub text_offset: (u32, u32),
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            columns: 5,
            cell_pitch_x: 80,
            cell_pitch_y: 50,
            swatch_offset: (10, 5),
            swatch_size: 40,
            text_offset: (50, 8),
        }
    }
}

/// Main config for the processing.
///
/// Use [`Config::new`] when the values come from user input; it rejects out-of-range values
/// with [`Error::InvalidConfiguration`]. The processing stages themselves do no validation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of palette colors (_K_). Between 1 and 256, labels are stored as `u8`.
    pub num_colors: u16,
    /// Longest side of the working image after resizing. 0 disables resizing.
    pub max_side: u32,
    /// Regions (all pixels of one palette color) smaller than this get no number.
    pub min_area: usize,
    /// Rounds of cross-shaped dilation applied to the raw edges. 0 keeps 2 px wide edges.
    pub dilation: usize,
    /// Upper bound of k-means iterations in the quantizer. It exits early once no pixel
    /// changes its cluster.
    pub quantize_iterations: u16,
    pub legend: LegendLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_colors: 25,
            max_side: 400,
            min_area: 100,
            dilation: 2,
            quantize_iterations: 10,
            legend: LegendLayout::default(),
        }
    }
}

pub const MAX_COLORS: i64 = 256;

impl Config {
    /// Builds a config from raw (possibly negative) user values.
    pub fn new(
        num_colors: i64,
        max_side: i64,
        min_area: i64,
        dilation: i64,
        quantize_iterations: i64,
    ) -> Result<Self> {
        if !(1..=MAX_COLORS).contains(&num_colors) {
            return Err(Error::InvalidConfiguration(format!(
                "number of colors must be between 1 and {MAX_COLORS}, got {num_colors}"
            )));
        }
        if max_side < 0 || max_side > u32::MAX as i64 {
            return Err(Error::InvalidConfiguration(format!(
                "max side length must be non-negative, got {max_side}"
            )));
        }
        if min_area < 0 {
            return Err(Error::InvalidConfiguration(format!(
                "minimum area must be non-negative, got {min_area}"
            )));
        }
        if dilation < 0 {
            return Err(Error::InvalidConfiguration(format!(
                "dilation count must be non-negative, got {dilation}"
            )));
        }
        if !(1..=u16::MAX as i64).contains(&quantize_iterations) {
            return Err(Error::InvalidConfiguration(format!(
                "quantizer iterations must be positive, got {quantize_iterations}"
            )));
        }
        Ok(Self {
            num_colors: num_colors as u16,
            max_side: max_side as u32,
            min_area: min_area as usize,
            dilation: dilation as usize,
            quantize_iterations: quantize_iterations as u16,
            ..Self::default()
        })
    }

    /// Font pixel size for region numbers, scaled with the working image height.
    pub fn font_size(image_height: usize) -> f32 {
        (image_height / 20).clamp(12, 36) as f32
    }
}
