use glam::{EulerRot, Mat4, Quat};

use crate::{
    animation::tween::Lerp,
    foundation::{
        core::{Canvas, Vec3},
        error::GlyphfallResult,
    },
};

/// Position plus look-at point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }
}

impl Lerp for CameraPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            position: <Vec3 as Lerp>::lerp(&a.position, &b.position, t),
            look_at: <Vec3 as Lerp>::lerp(&a.look_at, &b.look_at, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub rest: CameraPose,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 65.0,
            near: 0.1,
            far: 1200.0,
            rest: CameraPose::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_z: f32,
    pub max_z: f32,
    /// World units per wheel delta unit.
    pub speed: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_z: 10.0,
            max_z: 100.0,
            speed: 0.05,
        }
    }
}

/// Perspective camera looking at a point, y up.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    viewport: Canvas,
}

/// A world point mapped onto the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: kurbo::Point,
    /// Distance along the view direction.
    pub depth: f32,
    /// Pixels per world unit at `depth`.
    pub pixels_per_unit: f32,
}

impl Camera {
    pub fn new(viewport: Canvas, config: &CameraConfig) -> Self {
        Self {
            position: config.rest.position,
            look_at: config.rest.look_at,
            fov_y_deg: config.fov_y_deg,
            near: config.near,
            far: config.far,
            viewport,
        }
    }

    pub fn viewport(&self) -> Canvas {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.look_at)
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.look_at = pose.look_at;
    }

    /// Track a new output size; aspect follows the viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> GlyphfallResult<()> {
        self.viewport = Canvas::new(width, height)?;
        Ok(())
    }

    /// Move along z by a wheel delta, clamped to `[min_z, max_z]`.
    pub fn apply_wheel(&mut self, delta_y: f32, zoom: &ZoomConfig) {
        self.position.z = (self.position.z + delta_y * zoom.speed).clamp(zoom.min_z, zoom.max_z);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_deg.to_radians(),
            self.aspect(),
            self.near,
            self.far,
        )
    }

    /// Project a world point after applying the scene's drag rotation. `None` when the point
    /// is outside the clip volume.
    pub fn project(&self, world: Vec3, scene_rotation: Quat) -> Option<Projected> {
        let view = self.view_matrix();
        let eye = view * (scene_rotation * world).extend(1.0);
        let depth = -eye.z;
        if depth <= self.near || depth >= self.far {
            return None;
        }

        let clip = self.projection_matrix() * eye;
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;

        let w = self.viewport.width as f64;
        let h = self.viewport.height as f64;
        let screen = kurbo::Point::new(
            (f64::from(ndc.x) + 1.0) * 0.5 * w,
            (1.0 - f64::from(ndc.y)) * 0.5 * h,
        );
        let half_fov = (self.fov_y_deg.to_radians() * 0.5).tan();
        let pixels_per_unit = self.viewport.height as f32 / (2.0 * half_fov * depth);

        Some(Projected {
            screen,
            depth,
            pixels_per_unit,
        })
    }
}

/// Scene-wide rotation accumulated from pointer drags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneRotation {
    pub pitch: f32,
    pub yaw: f32,
}

impl SceneRotation {
    pub fn quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AutoZoomConfig {
    pub lower_z: f32,
    pub upper_z: f32,
    /// World units per second.
    pub speed: f32,
}

impl Default for AutoZoomConfig {
    fn default() -> Self {
        Self {
            lower_z: 20.0,
            upper_z: 80.0,
            speed: 15.0,
        }
    }
}

/// Back-and-forth camera z oscillation toggled from the keyboard.
///
/// Bounds are clamped into the manual zoom range. While running it owns camera z; the wheel
/// still works but only shifts where the sweep currently is.
#[derive(Clone, Debug, PartialEq)]
pub struct AutoZoom {
    enabled: bool,
    direction: f32,
    lower: f32,
    upper: f32,
    speed: f32,
}

impl AutoZoom {
    pub fn new(config: &AutoZoomConfig, zoom: &ZoomConfig) -> Self {
        let lower = config.lower_z.clamp(zoom.min_z, zoom.max_z);
        let upper = config.upper_z.clamp(zoom.min_z, zoom.max_z).max(lower);
        Self {
            enabled: false,
            direction: 1.0,
            lower,
            upper,
            speed: config.speed.abs(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        tracing::debug!(enabled = self.enabled, "auto zoom toggled");
        self.enabled
    }

    /// Advance the sweep by `dt_s` seconds, bouncing at the bounds.
    pub fn step(&mut self, camera: &mut Camera, dt_s: f32) {
        if !self.enabled || dt_s <= 0.0 {
            return;
        }
        let span = self.upper - self.lower;
        if span <= 0.0 {
            camera.position.z = self.lower;
            return;
        }

        let mut z = camera.position.z.clamp(self.lower, self.upper);
        let mut remaining = self.speed * dt_s;
        // A long frame can cross several bounds; fold the travel back and forth.
        while remaining > 0.0 {
            let edge = if self.direction > 0.0 {
                self.upper
            } else {
                self.lower
            };
            let room = (edge - z).abs();
            if remaining < room {
                z += self.direction * remaining;
                remaining = 0.0;
            } else {
                z = edge;
                remaining -= room;
                self.direction = -self.direction;
                if remaining > span {
                    remaining %= 2.0 * span;
                }
            }
        }
        camera.position.z = z;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
