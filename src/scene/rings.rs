use std::f32::consts::TAU;

use crate::foundation::core::{Rgb, Vec3};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingConfig {
    pub text: String,
    pub radius: f32,
    /// Number of label sprites around the ring.
    pub count: usize,
    /// Signed spin; radians per second is `speed * 0.6`.
    pub speed: f32,
}

pub fn default_rings() -> Vec<RingConfig> {
    vec![
        RingConfig {
            text: "I Love You \u{2665}".to_string(),
            radius: 12.0,
            count: 24,
            speed: 0.5,
        },
        RingConfig {
            text: "Happy Anniversary".to_string(),
            radius: 18.0,
            count: 32,
            speed: -0.3,
        },
    ]
}

/// Label sprite size in world units (width, height).
pub const LABEL_SCALE: (f32, f32) = (6.0, 1.6);

#[derive(Clone, Debug, PartialEq)]
pub struct TextRing {
    pub config: RingConfig,
    /// Index into the ring label textures.
    pub texture: usize,
    pub rotation: f32,
}

impl TextRing {
    pub fn new(config: RingConfig, texture: usize) -> Self {
        Self {
            config,
            texture,
            rotation: 0.0,
        }
    }

    pub fn angular_speed(&self) -> f32 {
        self.config.speed * 0.6
    }

    pub fn update(&mut self, dt_s: f32) {
        self.rotation = (self.rotation + self.angular_speed() * dt_s).rem_euclid(TAU);
    }

    /// Current label positions in the xz plane.
    pub fn label_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        let n = self.config.count.max(1) as f32;
        let r = self.config.radius;
        (0..self.config.count).map(move |i| {
            // Group rotation about +y turns the labels clockwise seen from above.
            let angle = i as f32 / n * TAU - self.rotation;
            Vec3::new(angle.cos() * r, 0.0, angle.sin() * r)
        })
    }
}

/// The central planet and its pulsing glow shell.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub radius: f32,
    pub color: Rgb,
    pub glow_radius: f32,
    pub glow_color: Rgb,
    pub rotation: f32,
    pub glow_scale: f32,
    pub glow_opacity: f32,
}

impl Default for Planet {
    fn default() -> Self {
        Self {
            radius: 4.0,
            color: Rgb::from_hex(0xff1694),
            glow_radius: 4.2,
            glow_color: Rgb::from_hex(0xff69b4),
            rotation: 0.0,
            glow_scale: 1.1,
            glow_opacity: 0.4,
        }
    }
}

impl Planet {
    pub fn update(&mut self, now_s: f64, dt_s: f32) {
        let t = now_s as f32;
        self.rotation = (self.rotation + 0.3 * dt_s).rem_euclid(TAU);
        self.glow_scale = 1.1 + (t * 1.5).sin() * 0.05;
        self.glow_opacity = 0.4 + (t * 2.0).sin() * 0.1;
    }

    pub fn glow_world_radius(&self) -> f32 {
        self.glow_radius * self.glow_scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rings.rs"]
mod tests;
