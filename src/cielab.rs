use tables::{C_B, LAB_SHIFT, LAB_TBL, OUTPUT_SHIFT, SRGB_GAMMA_TBL, SRGB_MAX, SRGB_SHIFT};

/// Fixed-point lookup tables of the 8-bit sRGB to Lab approximation.
pub(crate) mod tables {
    use static_init::dynamic;
    pub const SRGB_SHIFT: u8 = 13;
    pub const SRGB_MAX: usize = 1 << SRGB_SHIFT;
    pub const OUTPUT_SHIFT: u8 = 1;
    pub const LAB_SHIFT: u8 = 16;
    pub const C_B: [u32; 9] = [28440, 24656, 12442, 13938, 46868, 4730, 1164, 7175, 57202];
    #[dynamic]
    pub static SRGB_GAMMA_TBL: [u32; 256] =
        core::array::from_fn(|i| (calculate_xyz_nonlin(i as u8) * SRGB_MAX as f32) as u32);
    #[dynamic]
    pub static LAB_TBL: [i32; SRGB_MAX + 1] = core::array::from_fn(|i| {
        (calculate_lab_nonlin(i as f32 / SRGB_MAX as f32) * SRGB_MAX as f32).round() as i32
    });
    fn calculate_xyz_nonlin(a: u8) -> f32 {
        let v: f64 = a as f64 / 255.0;
        if v <= 0.04045 {
            return (v / 12.92) as f32;
        }
        ((v + 0.055) / 1.055).powf(2.4) as f32
    }

    fn calculate_lab_nonlin(a: f32) -> f32 {
        debug_assert!(a >= 0.0);
        if a < 0.008856 {
            return 7.787 * a + 0.137931;
        }
        a.powf(0.333333)
    }
}

/// Convert pixel in RGB24 to Lab24. This is an approximation.
///
/// The output range is for:
///  - L - from 0 to 200
///  - a - from 0 to 255 (some values are clamped)
///  - b - from 0 to 255 (some values are clamped)
#[inline(always)]
pub fn srgb_to_cielab_pixel(rgb: &[u8]) -> [u8; 3] {
    let sr = SRGB_GAMMA_TBL[rgb[0] as usize];
    let sg = SRGB_GAMMA_TBL[rgb[1] as usize];
    let sb = SRGB_GAMMA_TBL[rgb[2] as usize];
    let xr = ((C_B[0] * sr + C_B[1] * sg + C_B[2] * sb) >> LAB_SHIFT).min(SRGB_MAX as u32);
    let yr = ((C_B[3] * sr + C_B[4] * sg + C_B[5] * sb) >> LAB_SHIFT).min(SRGB_MAX as u32);
    let zr = ((C_B[6] * sr + C_B[7] * sg + C_B[8] * sb) >> LAB_SHIFT).min(SRGB_MAX as u32);
    let fx = LAB_TBL[xr as usize];
    let fy = LAB_TBL[yr as usize];
    let fz = LAB_TBL[zr as usize];
    let ciel = (116 * fy - (16 << SRGB_SHIFT)).max(0);
    let ciea = 500 * (fx - fy) + (128 << SRGB_SHIFT);
    let cieb = 200 * (fy - fz) + (128 << SRGB_SHIFT);
    let l: u8 = (ciel as u32 >> (SRGB_SHIFT - OUTPUT_SHIFT)).min(255) as u8;
    let a: u8 = ((ciea >> (SRGB_SHIFT - OUTPUT_SHIFT)) - (64 << OUTPUT_SHIFT)).clamp(0, 255) as u8;
    let b: u8 = ((cieb >> (SRGB_SHIFT - OUTPUT_SHIFT)) - (64 << OUTPUT_SHIFT)).clamp(0, 255) as u8;
    [l, a, b]
}

#[cfg(test)]
mod tests {
    use super::srgb_to_cielab_pixel;
    use super::tables::LAB_TBL;

    #[test]
    fn lab_table_test() {
        for i in LAB_TBL.iter() {
            assert!(*i > 0);
        }
    }

    #[test]
    fn lightness_is_monotone_on_grays() {
        let mut last = 0u8;
        for v in 0..=255u8 {
            let [l, _, _] = srgb_to_cielab_pixel(&[v, v, v]);
            assert!(l >= last, "L dropped at gray {v}: {l} < {last}");
            last = l;
        }
        assert_eq!(srgb_to_cielab_pixel(&[0, 0, 0])[0], 0);
        assert!(srgb_to_cielab_pixel(&[255, 255, 255])[0] >= 199);
    }

    #[test]
    fn grays_are_near_neutral() {
        for v in [0u8, 64, 128, 200, 255] {
            let [_, a, b] = srgb_to_cielab_pixel(&[v, v, v]);
            assert!((a as i32 - 128).abs() <= 2, "a={a} for gray {v}");
            assert!((b as i32 - 128).abs() <= 2, "b={b} for gray {v}");
        }
    }

    #[test]
    fn red_and_blue_separate_on_a_b() {
        let red = srgb_to_cielab_pixel(&[255, 0, 0]);
        let blue = srgb_to_cielab_pixel(&[0, 0, 255]);
        assert!(red[1] > 128);
        assert!(blue[2] < 128);
    }
}
