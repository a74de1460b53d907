use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat};

use crate::foundation::{
    core::{Rgb, Vec3},
    math::{Rng64, orbit, spherical},
};

/// Frame rate the per-frame motion constants were tuned at.
pub const REFERENCE_FPS: f32 = 60.0;

const CLUSTER_CENTERS: [Vec3; 4] = [
    Vec3::new(60.0, 40.0, 80.0),
    Vec3::new(-70.0, -30.0, 60.0),
    Vec3::new(90.0, -50.0, -90.0),
    Vec3::new(-50.0, 70.0, -60.0),
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub star_count: usize,
    pub square_star_count: usize,
    /// Shape sprites placed near the planet.
    pub close_sprite_count: usize,
    /// Sprites using the photo textures.
    pub photo_sprite_count: usize,
    /// Yaw of the main star layer, radians per second.
    pub rotation_speed: f32,
    pub background_star_count: usize,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 1200,
            square_star_count: 300,
            close_sprite_count: 80,
            photo_sprite_count: 300,
            rotation_speed: 0.0003 * REFERENCE_FPS,
            background_star_count: 800,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPoint {
    /// Position in the layer's local frame.
    pub position: Vec3,
    pub base_color: Rgb,
    pub color: Rgb,
    pub base_size: f32,
    pub size: f32,
    pub opacity: f32,
}

impl StarPoint {
    fn new(position: Vec3, color: Rgb, size: f32, opacity: f32) -> Self {
        Self {
            position,
            base_color: color,
            color,
            base_size: size,
            size,
            opacity,
        }
    }
}

/// A camera-facing textured quad floating in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSprite {
    pub position: Vec3,
    pub base_scale: f32,
    pub scale: f32,
    /// Height over width.
    pub aspect: f32,
    pub rotation: f32,
    /// The sprite's own twinkling opacity.
    pub opacity: f32,
    /// Multiplier applied on top of `opacity`; dimmed while text is shown.
    pub fade: f32,
    pub texture: usize,
    pub tint: Rgb,
    pub is_photo: bool,
}

impl SceneSprite {
    pub fn effective_opacity(&self) -> f32 {
        (self.opacity * self.fade).clamp(0.0, 1.0)
    }
}

/// Which textures the sprites may use: shape textures come first, then one slot per photo.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteTextures {
    pub shape_count: usize,
    /// Per photo slot, whether the photo itself loaded (false when it fell back to a shape).
    pub photo_loaded: Vec<bool>,
}

impl SpriteTextures {
    pub fn photo_texture(&self, slot: usize) -> usize {
        self.shape_count + slot
    }
}

/// Procedural star layers plus the image sprites scattered through them.
#[derive(Clone, Debug)]
pub struct Starfield {
    pub points: Vec<StarPoint>,
    pub square_points: Vec<StarPoint>,
    /// Far shell shown when the background panorama is missing.
    pub background: Vec<StarPoint>,
    pub sprites: Vec<SceneSprite>,
    pub yaw: f32,
    pub square_rotation: (f32, f32),
    rotation_speed: f32,
    rng: Rng64,
}

impl Starfield {
    #[tracing::instrument(skip(config, textures, rng), fields(stars = config.star_count))]
    pub fn generate(config: &StarfieldConfig, textures: &SpriteTextures, rng: &mut Rng64) -> Self {
        let points = (0..config.star_count)
            .map(|i| {
                let position = star_position(i, rng);
                let color = star_color(rng);
                let size = if rng.chance(0.05) {
                    rng.range(2.0, 4.0)
                } else {
                    rng.range(0.6, 2.0)
                };
                StarPoint::new(position, color, size, 0.8)
            })
            .collect();

        let square_points = (0..config.square_star_count)
            .map(|_| {
                let radius = rng.range(20.0, 270.0);
                let position = orbit(radius, rng.range(0.0, TAU), rng.centered(PI / 2.0));
                let color = Rgb::new(1.0, rng.range(0.4, 0.8), rng.range(0.7, 1.0));
                StarPoint::new(position, color, rng.range(1.0, 3.0), 1.0)
            })
            .collect();

        let mut sprites = Vec::with_capacity(config.close_sprite_count + config.photo_sprite_count);
        for i in 0..config.close_sprite_count {
            let angle = i as f32 / config.close_sprite_count as f32 * TAU;
            let radius = rng.range(15.0, 35.0);
            let elevation = rng.centered(PI * 0.4);
            let scale = rng.range(2.0, 5.0);
            sprites.push(SceneSprite {
                position: orbit(radius, angle, elevation),
                base_scale: scale,
                scale,
                aspect: 1.0,
                rotation: 0.0,
                opacity: 0.8,
                fade: 1.0,
                texture: if textures.shape_count > 0 {
                    i % textures.shape_count
                } else {
                    0
                },
                tint: Rgb::WHITE,
                is_photo: false,
            });
        }

        let slots = photo_slot_order(config.photo_sprite_count, textures.photo_loaded.len(), rng);
        for (i, slot) in slots.into_iter().enumerate() {
            let is_photo = textures.photo_loaded[slot];
            let mut position = sprite_layout(i, config.photo_sprite_count, rng);
            let scale = if is_photo {
                position.z += rng.centered(5.0);
                rng.range(4.0, 7.0)
            } else {
                rng.range(2.0, 4.0)
            };
            sprites.push(SceneSprite {
                position,
                base_scale: scale,
                scale,
                aspect: 0.75,
                rotation: rng.range(0.0, TAU),
                opacity: if is_photo { 0.9 } else { 0.7 },
                fade: 1.0,
                texture: textures.photo_texture(slot),
                tint: Rgb::WHITE,
                is_photo,
            });
        }

        tracing::debug!(
            square = config.square_star_count,
            sprites = sprites.len(),
            "starfield generated"
        );

        Self {
            points,
            square_points,
            background: Vec::new(),
            sprites,
            yaw: 0.0,
            square_rotation: (0.0, 0.0),
            rotation_speed: config.rotation_speed,
            rng: rng.fork(0x5747_4152),
        }
    }

    /// Fill the far background shell, used when no panorama is available.
    pub fn add_background_stars(&mut self, count: usize) {
        self.background = background_stars(count, &mut self.rng);
    }

    /// World position of main-layer star `i`, including the layer's slow yaw.
    pub fn world_position(&self, i: usize) -> Option<Vec3> {
        let p = self.points.get(i)?;
        Some(Quat::from_rotation_y(self.yaw) * p.position)
    }

    pub fn world_positions(&self) -> Vec<Vec3> {
        let rot = Quat::from_rotation_y(self.yaw);
        self.points.iter().map(|p| rot * p.position).collect()
    }

    pub fn square_layer_rotation(&self) -> Quat {
        let (pitch, yaw) = self.square_rotation;
        Quat::from_euler(EulerRot::XYZ, pitch, yaw, 0.0)
    }

    /// Advance rotation, twinkle and sprite drift by one frame ending at `now_s`.
    pub fn update(&mut self, now_s: f64, dt_s: f32) {
        let frames = dt_s.max(0.0) * REFERENCE_FPS;
        let t = now_s as f32;

        self.yaw += self.rotation_speed * dt_s;
        self.square_rotation.0 += 0.0001 * frames;
        self.square_rotation.1 -= 0.0002 * frames;

        let flash = frame_chance(0.002, frames);
        for (i, star) in self.points.iter_mut().enumerate() {
            let fi = i as f32;
            star.size = 1.2 + (t * 3.0 + fi).sin() * 0.6 + self.rng.range(0.0, 0.3);
            star.color = star.base_color;
            if star.base_color.g < 0.8 {
                star.color.g = 0.4 + (t * 2.0 + fi).sin() * 0.2 + self.rng.range(0.0, 0.1);
                star.color.b = 0.7 + (t * 1.5 + fi).sin() * 0.15 + self.rng.range(0.0, 0.1);
            }
            if self.rng.chance(flash) {
                star.size *= 3.0;
                star.color = Rgb::WHITE;
            }
        }

        let flash = frame_chance(0.001, frames);
        for (i, star) in self.square_points.iter_mut().enumerate() {
            let fi = i as f32;
            star.size = 1.0 + (t * 2.0 + fi * 0.2).sin() * 0.7 + self.rng.range(0.0, 0.2);
            star.color = star.base_color;
            star.color.g = 0.4 + (t * 1.3 + fi * 0.1).sin() * 0.3;
            if self.rng.chance(flash) {
                star.size *= 3.0;
                star.color = Rgb::WHITE;
            }
        }

        let twinkle = frame_chance(0.03, frames);
        let retint = frame_chance(0.005, frames);
        for (i, sprite) in self.sprites.iter_mut().enumerate() {
            let fi = i as f32;
            if sprite.is_photo {
                let speed = 0.1 + (i % 7) as f32 * 0.02;
                let radius = 0.01 + (i % 5) as f32 * 0.005;
                sprite.position += Vec3::new(
                    (t * speed + fi).sin() * radius,
                    (t * 0.3 + fi * 0.2).sin() * 0.01,
                    (t * speed + fi * 0.7).cos() * radius,
                ) * frames;
                sprite.rotation += 0.001 * frames;
                sprite.scale = sprite.base_scale + (t * 0.5 + fi * 0.1).sin() * 0.1;
            } else {
                let speed = 0.3 + (i % 5) as f32 * 0.08;
                let radius = 0.04 + (i % 4) as f32 * 0.02;
                sprite.position += Vec3::new(
                    (t * speed + fi).sin() * radius,
                    (t * 0.7 + fi * 0.4).sin() * 0.03,
                    (t * speed + fi).cos() * radius,
                ) * frames;
                sprite.rotation += (0.005 + (i % 10) as f32 * 0.001) * frames;
                let pulse_speed = 1.5 + (i % 4) as f32;
                let pulse = 0.4 + (i % 5) as f32 * 0.15;
                sprite.scale = (sprite.base_scale + (t * pulse_speed + fi).sin() * pulse).max(0.0);
                if self.rng.chance(twinkle) {
                    sprite.opacity = self.rng.range(0.5, 1.0);
                }
                if self.rng.chance(retint) {
                    sprite.tint = SPRITE_TINTS[self.rng.index(SPRITE_TINTS.len())];
                }
            }
        }
    }

    /// Fresh main-layer positions for the post-dissolve re-scatter.
    pub fn scatter_targets(&mut self) -> Vec<Vec3> {
        (0..self.points.len())
            .map(|_| spherical_shell_point(&mut self.rng))
            .collect()
    }

    /// Fresh sprite positions laid out with the same patterns as at startup.
    pub fn redistribution_targets(&mut self) -> Vec<Vec3> {
        let n = self.sprites.len();
        (0..n).map(|i| sprite_layout(i, n, &mut self.rng)).collect()
    }
}

const SPRITE_TINTS: [Rgb; 5] = [
    Rgb::new(1.0, 0.412, 0.706),
    Rgb::new(1.0, 0.271, 0.635),
    Rgb::new(1.0, 0.616, 0.859),
    Rgb::new(1.0, 0.714, 0.902),
    Rgb::new(1.0, 0.0, 0.498),
];

/// Probability that an event with per-reference-frame chance `p` fires at least once in `frames`.
pub fn frame_chance(p: f32, frames: f32) -> f32 {
    if frames <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - p).powf(frames)
}

fn spherical_shell_point(rng: &mut Rng64) -> Vec3 {
    let radius = rng.range(30.0, 230.0);
    orbit(radius, rng.range(0.0, TAU), rng.centered(PI * 0.25))
}

/// Five interleaved distributions: shell, flat disk, spiral arm, clusters, cube.
fn star_position(i: usize, rng: &mut Rng64) -> Vec3 {
    match i % 5 {
        0 => spherical_shell_point(rng),
        1 => {
            let radius = rng.range(30.0, 230.0);
            let p = orbit(radius, rng.range(0.0, TAU), rng.centered(PI * 0.1));
            Vec3::new(p.x, p.y * 0.3, p.z)
        }
        2 => {
            let arm = rng.range(0.0, PI * 8.0);
            let radius = 30.0 + arm * 3.0;
            Vec3::new(arm.cos() * radius, rng.centered(10.0), arm.sin() * radius)
        }
        3 => {
            let center = CLUSTER_CENTERS[rng.index(CLUSTER_CENTERS.len())];
            center + Vec3::new(rng.centered(17.5), rng.centered(17.5), rng.centered(17.5))
        }
        _ => {
            let half = rng.range(40.0, 200.0) * 0.5;
            Vec3::new(rng.centered(half), rng.centered(half), rng.centered(half))
        }
    }
}

fn star_color(rng: &mut Rng64) -> Rgb {
    let kind = rng.next_f32();
    if kind < 0.5 {
        Rgb::new(1.0, rng.range(0.3, 0.6), rng.range(0.6, 0.8))
    } else if kind < 0.7 {
        Rgb::new(1.0, rng.range(0.7, 1.0), rng.range(0.8, 1.0))
    } else if kind < 0.85 {
        Rgb::new(1.0, rng.range(0.9, 1.0), rng.range(0.95, 1.0))
    } else if kind < 0.95 {
        Rgb::WHITE
    } else {
        Rgb::new(rng.range(0.8, 1.0), rng.range(0.9, 1.0), 1.0)
    }
}

/// Position of sprite `i` of `count`: spiral arms, rings, clusters and a loose shell in turn.
pub fn sprite_layout(i: usize, count: usize, rng: &mut Rng64) -> Vec3 {
    let count = count.max(1) as f32;
    let fi = i as f32;
    match i % 4 {
        0 => {
            const ARMS: usize = 5;
            let arm_offset = TAU / ARMS as f32 * (i % ARMS) as f32;
            let distance = 20.0 + fi / count * 170.0;
            let angle = fi / count * 12.0 * PI + arm_offset + distance * 0.3;
            Vec3::new(angle.cos() * distance, rng.centered(20.0), angle.sin() * distance)
        }
        1 => {
            let ring_radius = 40.0 + (i % 4) as f32 * 30.0;
            let angle = fi / (count / 4.0) * TAU;
            let rx = ring_radius + rng.centered(2.5);
            let rz = ring_radius + rng.centered(2.5);
            Vec3::new(angle.cos() * rx, rng.centered(15.0), angle.sin() * rz)
        }
        2 => {
            const CLUSTERS: usize = 8;
            let cluster = i % CLUSTERS;
            let angle = cluster as f32 / CLUSTERS as f32 * TAU;
            let distance = 60.0 + (cluster % 3) as f32 * 40.0;
            let center = Vec3::new(
                angle.cos() * distance,
                ((cluster % 3) as f32 - 1.0) * 30.0,
                angle.sin() * distance,
            );
            center + Vec3::new(rng.centered(10.0), rng.centered(10.0), rng.centered(10.0))
        }
        _ => {
            let radius = rng.range(30.0, 180.0);
            orbit(radius, rng.range(0.0, TAU), rng.centered(PI * 0.3))
        }
    }
}

/// Photo slot per sprite: every slot once in shuffled order, then round-robin.
fn photo_slot_order(sprites: usize, slots: usize, rng: &mut Rng64) -> Vec<usize> {
    if slots == 0 {
        return Vec::new();
    }
    let mut first: Vec<usize> = (0..slots).collect();
    for i in (1..first.len()).rev() {
        let j = rng.index(i + 1);
        first.swap(i, j);
    }
    (0..sprites)
        .map(|i| if i < slots { first[i] } else { i % slots })
        .collect()
}

/// White points on a far shell of radius 700..900.
pub fn background_stars(count: usize, rng: &mut Rng64) -> Vec<StarPoint> {
    (0..count)
        .map(|_| {
            let radius = rng.range(700.0, 900.0);
            let p = spherical(radius, rng.range(0.0, TAU), rng.range(0.0, PI));
            StarPoint::new(p, Rgb::WHITE, 1.0, 0.6)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/starfield.rs"]
mod tests;
