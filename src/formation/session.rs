use std::f32::consts::{PI, TAU};

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Rgb, SessionId, Vec3},
        math::{Rng64, spherical},
    },
    scene::particle::{AnimatedParticle, ParticleKind},
    text::sampler::{OUTLINE_MAX, TargetPoint, outline_layer},
};

/// How particles are matched to sampled targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignStrategy {
    /// Particle `i` takes target `i`.
    #[default]
    Sequential,
    /// Each particle, in order, takes the nearest target not yet taken.
    Nearest,
}

/// Target index for each particle. Never longer than either input, and no target is used twice.
pub fn assign_targets(
    origins: &[Vec3],
    targets: &[TargetPoint],
    strategy: AssignStrategy,
) -> Vec<usize> {
    let n = origins.len().min(targets.len());
    match strategy {
        AssignStrategy::Sequential => (0..n).collect(),
        AssignStrategy::Nearest => {
            let mut taken = vec![false; targets.len()];
            let mut out = Vec::with_capacity(n);
            for origin in &origins[..n] {
                let mut best: Option<(usize, f32)> = None;
                for (j, t) in targets.iter().enumerate() {
                    if taken[j] {
                        continue;
                    }
                    let d = origin.distance_squared(t.position());
                    // Strict comparison keeps the lowest index on ties.
                    if best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((j, d));
                    }
                }
                let Some((j, _)) = best else { break };
                taken[j] = true;
                out.push(j);
            }
            out
        }
    }
}

/// Sizes and colors of the three particle layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub point_size: f32,
    pub point_color: Rgb,
    pub outline_max: usize,
    pub outline_size: (f32, f32),
    pub outline_opacity: f32,
    pub sprite_cap: usize,
    /// Radius range of the shell sprite particles start from.
    pub sprite_shell: (f32, f32),
    pub sprite_scale: (f32, f32),
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            point_size: 5.0,
            point_color: Rgb::new(1.0, 0.6, 0.85),
            outline_max: OUTLINE_MAX,
            outline_size: (10.0, 14.0),
            outline_opacity: 0.8,
            sprite_cap: 300,
            sprite_shell: (60.0, 100.0),
            sprite_scale: (5.0, 8.0),
        }
    }
}

/// Scene state a formation starts from.
#[derive(Clone, Copy, Debug)]
pub struct FormationSources<'a> {
    /// Current world positions of the main star layer.
    pub star_positions: &'a [Vec3],
    /// Texture of every scene sprite, in scene order.
    pub sprite_textures: &'a [usize],
}

/// Everything animated for one message.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    pub id: SessionId,
    pub message: String,
    pub started_at_s: f64,
    pub duration_s: f64,
    pub targets: Vec<TargetPoint>,
    particles: Vec<AnimatedParticle>,
    point_count: usize,
    outline_count: usize,
}

impl AnimationSession {
    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(skip_all, fields(id = id.0, targets = targets.len()))]
    pub fn build(
        id: SessionId,
        message: impl Into<String>,
        started_at_s: f64,
        duration_s: f64,
        targets: Vec<TargetPoint>,
        sources: FormationSources<'_>,
        layers: &LayerConfig,
        strategy: AssignStrategy,
        rng: &mut Rng64,
    ) -> Self {
        let stars = sources.star_positions;
        let star_at = |i: usize, fallback: Vec3| -> Vec3 {
            if stars.is_empty() {
                fallback
            } else {
                stars[i % stars.len()]
            }
        };

        let mut particles = Vec::new();

        let point_origins: Vec<Vec3> = targets
            .iter()
            .enumerate()
            .map(|(i, t)| star_at(i, t.position()))
            .collect();
        for (i, j) in assign_targets(&point_origins, &targets, strategy)
            .into_iter()
            .enumerate()
        {
            particles.push(AnimatedParticle::new(
                ParticleKind::Point,
                point_origins[i],
                targets[j].position(),
                layers.point_size,
                layers.point_color,
                1.0,
            ));
        }
        let point_count = particles.len();

        let outline = outline_layer(&targets, layers.outline_max, rng);
        let outline_origins: Vec<Vec3> = outline
            .iter()
            .enumerate()
            .map(|(i, t)| star_at(i * 3 + 1, t.position()))
            .collect();
        for (i, j) in assign_targets(&outline_origins, &outline, strategy)
            .into_iter()
            .enumerate()
        {
            let color = Rgb::new(1.0, rng.range(0.1, 0.3), rng.range(0.5, 0.7));
            particles.push(AnimatedParticle::new(
                ParticleKind::Outline,
                outline_origins[i],
                outline[j].position(),
                rng.range(layers.outline_size.0, layers.outline_size.1),
                color,
                layers.outline_opacity,
            ));
        }
        let outline_count = particles.len() - point_count;

        let textures = sources.sprite_textures;
        let sprite_count = layers
            .sprite_cap
            .min(textures.len() / 2)
            .min(targets.len());
        let sprite_origins: Vec<Vec3> = (0..sprite_count)
            .map(|_| {
                let radius = rng.range(layers.sprite_shell.0, layers.sprite_shell.1);
                spherical(radius, rng.range(0.0, TAU), rng.range(0.0, PI))
            })
            .collect();
        for (i, j) in assign_targets(&sprite_origins, &targets, strategy)
            .into_iter()
            .enumerate()
        {
            particles.push(AnimatedParticle::new(
                ParticleKind::Sprite {
                    texture: textures[i % textures.len()],
                },
                sprite_origins[i],
                targets[j].position(),
                rng.range(layers.sprite_scale.0, layers.sprite_scale.1),
                Rgb::WHITE,
                1.0,
            ));
        }

        tracing::debug!(
            points = point_count,
            outline = outline_count,
            sprites = particles.len() - point_count - outline_count,
            "formation session built"
        );

        Self {
            id,
            message: message.into(),
            started_at_s,
            duration_s,
            targets,
            particles,
            point_count,
            outline_count,
        }
    }

    pub fn particles(&self) -> &[AnimatedParticle] {
        &self.particles
    }

    pub fn into_particles(self) -> Vec<AnimatedParticle> {
        self.particles
    }

    pub fn points(&self) -> &[AnimatedParticle] {
        &self.particles[..self.point_count]
    }

    pub fn outline(&self) -> &[AnimatedParticle] {
        &self.particles[self.point_count..self.point_count + self.outline_count]
    }

    pub fn sprites(&self) -> &[AnimatedParticle] {
        &self.particles[self.point_count + self.outline_count..]
    }

    /// Raw formation progress at `now_s`, in `[0, 1]`.
    pub fn progress(&self, now_s: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        ((now_s - self.started_at_s) / self.duration_s).clamp(0.0, 1.0)
    }

    /// Move every particle along its eased path and apply the closing glow.
    /// Returns true once the formation is complete.
    pub fn advance_formation(&mut self, now_s: f64) -> bool {
        let progress = self.progress(now_s);
        for p in &mut self.particles {
            p.advance(progress, Ease::OutBack);
        }

        if progress > 0.7 {
            let glow = ((progress - 0.7) / 0.3) as f32;
            let t = now_s as f32;
            let (points, rest) = self.particles.split_at_mut(self.point_count);
            for p in points {
                p.size = p.base_size * (1.0 + glow * 0.5);
            }
            for (i, p) in rest[..self.outline_count].iter_mut().enumerate() {
                p.size = p.base_size * (1.0 + (t * 10.0 + i as f32).sin() * 0.3 * glow);
            }
        }
        progress >= 1.0
    }

    /// Idle pulse of the text points while the message is held.
    pub fn pulse(&mut self, now_s: f64) {
        let t = now_s as f32;
        for (i, p) in self.particles[..self.point_count].iter_mut().enumerate() {
            let fi = i as f32;
            p.size = p.base_size * (1.0 + (t * 2.0 + fi * 0.1).sin() * 0.15);
            p.color = Rgb::new(
                1.0,
                0.9 + (t * 3.0 + fi * 0.2).sin() * 0.1,
                0.95 + (t * 2.5 + fi * 0.15).sin() * 0.05,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/formation/session.rs"]
mod tests;
