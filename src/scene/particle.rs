use crate::{
    animation::{ease::Ease, tween::Lerp},
    foundation::core::{Rgb, Vec3},
};

/// What a particle is drawn as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Plain point of the main text layer.
    Point,
    /// Larger, dimmer point of the glow layer behind the text.
    Outline,
    /// Camera-facing textured quad cloned from a scene sprite.
    Sprite { texture: usize },
}

/// One visual element taking part in a formation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedParticle {
    pub kind: ParticleKind,
    pub position: Vec3,
    /// Where the particle was when the formation started.
    pub origin: Vec3,
    pub target: Vec3,
    pub base_size: f32,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
    progress: f64,
}

impl AnimatedParticle {
    pub fn new(
        kind: ParticleKind,
        origin: Vec3,
        target: Vec3,
        size: f32,
        color: Rgb,
        opacity: f32,
    ) -> Self {
        Self {
            kind,
            position: origin,
            origin,
            target,
            base_size: size,
            size,
            color,
            opacity,
            progress: 0.0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Move to `progress` along the eased origin→target path. Progress never decreases.
    pub fn advance(&mut self, progress: f64, ease: Ease) {
        self.progress = progress.clamp(0.0, 1.0).max(self.progress);
        self.position = interpolate(self.origin, self.target, ease.apply(self.progress));
    }

    pub fn is_sprite(&self) -> bool {
        matches!(self.kind, ParticleKind::Sprite { .. })
    }
}

/// `origin + eased * (target - origin)`, component-wise.
pub fn interpolate(origin: Vec3, target: Vec3, eased: f64) -> Vec3 {
    <Vec3 as Lerp>::lerp(&origin, &target, eased)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particle.rs"]
mod tests;
