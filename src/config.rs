use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::textures::AssetConfig,
    formation::director::FormationConfig,
    foundation::{
        core::Canvas,
        error::{GlyphfallError, GlyphfallResult},
    },
    scene::{
        camera::{AutoZoomConfig, CameraConfig, ZoomConfig},
        input::InputConfig,
        rings::{RingConfig, default_rings},
        starfield::StarfieldConfig,
    },
};

/// Environment variable overriding [`SceneConfig::seed`].
pub const SEED_ENV: &str = "GLYPHFALL_SEED";

/// Everything needed to build a [`crate::Scene`]. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u64,
    pub viewport: Canvas,
    pub camera: CameraConfig,
    pub zoom: ZoomConfig,
    pub auto_zoom: AutoZoomConfig,
    pub input: InputConfig,
    pub starfield: StarfieldConfig,
    pub rings: Vec<RingConfig>,
    pub assets: AssetConfig,
    pub formation: FormationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x6c79_7068,
            viewport: Canvas {
                width: 1280,
                height: 720,
            },
            camera: CameraConfig::default(),
            zoom: ZoomConfig::default(),
            auto_zoom: AutoZoomConfig::default(),
            input: InputConfig::default(),
            starfield: StarfieldConfig::default(),
            rings: default_rings(),
            assets: AssetConfig::default(),
            formation: FormationConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> GlyphfallResult<Self> {
        let cfg: Self = serde_json::from_str(json).context("parse scene config JSON")?;
        Ok(cfg)
    }

    /// Read a JSON config. Relative asset and font paths resolve against the file's directory.
    pub fn from_path(path: &Path) -> GlyphfallResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&text)?;
        if let Some(dir) = path.parent() {
            if cfg.assets.root.is_relative() {
                cfg.assets.root = dir.join(&cfg.assets.root);
            }
            for font_dir in &mut cfg.assets.font_dirs {
                if font_dir.is_relative() {
                    *font_dir = dir.join(&*font_dir);
                }
            }
        }
        Ok(cfg)
    }

    /// Apply `GLYPHFALL_SEED` when it is set and parses.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var(SEED_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            tracing::debug!(seed, "seed overridden from environment");
            self.seed = seed;
        }
    }

    pub fn validate(&self) -> GlyphfallResult<()> {
        self.viewport.validate()?;
        self.formation.canvas.validate()?;
        self.formation.sampling.validate()?;
        self.formation.style.validate()?;
        self.assets.ring_label.canvas.validate()?;

        let cam = &self.camera;
        if cam.fov_y_deg.is_nan() || cam.fov_y_deg <= 0.0 || cam.fov_y_deg >= 180.0 {
            return Err(GlyphfallError::validation(
                "camera.fov_y_deg must be in (0, 180)",
            ));
        }
        if cam.near.is_nan() || cam.near <= 0.0 || cam.far.is_nan() || cam.far <= cam.near {
            return Err(GlyphfallError::validation(
                "camera clip planes must satisfy 0 < near < far",
            ));
        }
        if self.zoom.min_z.is_nan() || self.zoom.min_z <= 0.0 || self.zoom.min_z > self.zoom.max_z {
            return Err(GlyphfallError::validation(
                "zoom bounds must satisfy 0 < min_z <= max_z",
            ));
        }
        if self.auto_zoom.lower_z > self.auto_zoom.upper_z {
            return Err(GlyphfallError::validation(
                "auto_zoom.lower_z must not exceed upper_z",
            ));
        }
        if !self.input.double_click_window_s.is_finite() || self.input.double_click_window_s < 0.0
        {
            return Err(GlyphfallError::validation(
                "input.double_click_window_s must be a non-negative number",
            ));
        }
        for ring in &self.rings {
            if ring.radius.is_nan() || ring.radius <= 0.0 {
                return Err(GlyphfallError::validation(format!(
                    "ring '{}' needs a positive radius",
                    ring.text
                )));
            }
        }
        for (i, stage) in self.formation.stages.iter().enumerate() {
            if !stage.duration_s.is_finite() || stage.duration_s < 0.0 {
                return Err(GlyphfallError::validation(format!(
                    "formation.stages[{i}].duration_s must be a non-negative number"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.formation.sprite_dim) {
            return Err(GlyphfallError::validation(
                "formation.sprite_dim must be in [0, 1]",
            ));
        }
        let f = &self.formation;
        let timings = [
            ("sprite_fade_s", f.sprite_fade_s),
            ("camera_return_s", f.camera_return_s),
            ("star_scatter_s", f.star_scatter_s),
            ("sprite_redistribute_s", f.sprite_redistribute_s),
            ("sprite_redistribute_stagger_s", f.sprite_redistribute_stagger_s),
        ];
        for (name, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(GlyphfallError::validation(format!(
                    "formation.{name} must be a non-negative number"
                )));
            }
        }
        f.dissolve.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
