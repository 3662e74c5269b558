use crate::foundation::core::clamp_unit;

/// Visual intensity derived from smoothed progress, recomputed every tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStyle {
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Brightness multiplier (`1` is unchanged).
    pub brightness: f64,
    /// Saturation multiplier (`1` is unchanged, `0` is grayscale).
    pub saturation: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self::from_progress(0.0)
    }
}

impl FrameStyle {
    /// Style for `progress` in `[0, 1]`: the sequence fades in, brightens and saturates as it
    /// plays.
    pub fn from_progress(progress: f64) -> Self {
        let p = clamp_unit(progress);
        Self {
            opacity: 0.4 + p * 0.4,
            brightness: 0.8 + p * 0.4,
            saturation: 0.9 + p * 0.2,
        }
    }

    /// Paint this style into straight-alpha RGBA8 pixels.
    ///
    /// Applies `brightness` then `saturate` (in that order, clamping after each, matching CSS
    /// filter-function semantics) and multiplies alpha by `opacity`.
    pub fn apply_rgba8(&self, img: &mut image::RgbaImage) {
        let b = self.brightness.max(0.0) as f32;
        let s = self.saturation.max(0.0) as f32;
        let o = clamp_unit(self.opacity) as f32;

        // CSS `saturate()` color matrix.
        let m = [
            [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
        ];

        for px in img.pixels_mut() {
            let [r, g, bl, a] = px.0;
            let rgb = [r, g, bl].map(|c| (f32::from(c) / 255.0 * b).clamp(0.0, 1.0));
            let out = m.map(|row| {
                (row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]).clamp(0.0, 1.0)
            });
            px.0 = [
                to_u8(out[0]),
                to_u8(out[1]),
                to_u8(out[2]),
                to_u8(f32::from(a) / 255.0 * o),
            ];
        }
    }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/playback/style.rs"]
mod tests;
