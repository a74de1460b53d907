use crate::{
    foundation::core::Vec3,
    foundation::error::{GlyphfallError, GlyphfallResult},
    foundation::math::Rng64,
    text::raster::AlphaGrid,
};

/// World-space destination for one text particle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TargetPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn position(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Pixels between samples along both axes. Larger is sparser.
    pub stride: u32,
    /// A cell is emitted when its alpha is strictly greater than this.
    pub alpha_threshold: u8,
    /// World units per pixel.
    pub world_scale: f32,
    /// Depth of the emitted layer; 0 for the primary layer, negative behind it.
    pub z: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            stride: 8,
            alpha_threshold: 128,
            world_scale: 0.08,
            z: 0.0,
        }
    }
}

impl SamplingParams {
    pub fn validate(&self) -> GlyphfallResult<()> {
        if self.stride == 0 {
            return Err(GlyphfallError::validation("sampling stride must be >= 1"));
        }
        if !self.world_scale.is_finite() || self.world_scale <= 0.0 {
            return Err(GlyphfallError::validation(
                "sampling world_scale must be finite and > 0",
            ));
        }
        if !self.z.is_finite() {
            return Err(GlyphfallError::validation("sampling z must be finite"));
        }
        Ok(())
    }
}

/// Sample `grid` row-major at a fixed stride, emitting one target per bright cell.
///
/// Pixel `(px, py)` maps to `((px - w/2) * scale, (h/2 - py) * scale, z)`: recentered on the
/// origin with y pointing up.
pub fn sample_targets(
    grid: &AlphaGrid,
    params: &SamplingParams,
) -> GlyphfallResult<Vec<TargetPoint>> {
    params.validate()?;

    let half_w = grid.width() as f32 / 2.0;
    let half_h = grid.height() as f32 / 2.0;
    let step = params.stride as usize;

    let mut out = Vec::new();
    for y in (0..grid.height()).step_by(step) {
        for x in (0..grid.width()).step_by(step) {
            if grid.get(x, y) > params.alpha_threshold {
                out.push(TargetPoint {
                    x: (x as f32 - half_w) * params.world_scale,
                    y: (half_h - y as f32) * params.world_scale,
                    z: params.z,
                });
            }
        }
    }
    Ok(out)
}

pub const OUTLINE_STEP: usize = 3;
/// Default cap on outline particles.
pub const OUTLINE_MAX: usize = 500;
pub const OUTLINE_JITTER: f32 = 0.3;
pub const OUTLINE_Z_OFFSET: f32 = -0.5;

/// Glow layer drawn behind the text: every third target up to `max`, jittered in the xy plane
/// and pushed back in z.
pub fn outline_layer(targets: &[TargetPoint], max: usize, rng: &mut Rng64) -> Vec<TargetPoint> {
    targets
        .iter()
        .step_by(OUTLINE_STEP)
        .take(max)
        .map(|t| TargetPoint {
            x: t.x + rng.centered(OUTLINE_JITTER),
            y: t.y + rng.centered(OUTLINE_JITTER),
            z: t.z + OUTLINE_Z_OFFSET,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/sampler.rs"]
mod tests;
