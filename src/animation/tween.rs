use crate::{
    animation::ease::Ease,
    foundation::core::{Rgb, Vec3},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        *a + (*b - *a) * (t as f32)
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: <f32 as Lerp>::lerp(&a.r, &b.r, t),
            g: <f32 as Lerp>::lerp(&a.g, &b.g, t),
            b: <f32 as Lerp>::lerp(&a.b, &b.b, t),
        }
    }
}

/// Wall-clock tween between two values.
///
/// Progress is derived from elapsed time rather than frame count, so the animation lasts
/// `duration_s` regardless of how irregular the caller's frame intervals are.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start_s: f64,
    pub duration_s: f64,
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp,
{
    pub fn new(from: T, to: T, start_s: f64, duration_s: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_s,
            duration_s,
            ease,
        }
    }

    /// Raw (un-eased) progress in `[0, 1]`.
    pub fn progress(&self, now_s: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        ((now_s - self.start_s) / self.duration_s).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_s: f64) -> T {
        T::lerp(&self.from, &self.to, self.ease.apply(self.progress(now_s)))
    }

    pub fn is_finished(&self, now_s: f64) -> bool {
        self.progress(now_s) >= 1.0
    }
}

/// Handle binding a per-frame task to the scene state that spawned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LivenessToken(u64);

/// Generation counter handing out [`LivenessToken`]s.
///
/// Every [`Liveness::supersede`] invalidates all tokens issued before it, so a task that checks
/// its token each frame stops on its own once a newer state owns the particles.
#[derive(Debug, Default)]
pub struct Liveness {
    current: u64,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supersede(&mut self) -> LivenessToken {
        self.current += 1;
        LivenessToken(self.current)
    }

    pub fn current(&self) -> LivenessToken {
        LivenessToken(self.current)
    }

    pub fn is_live(&self, token: LivenessToken) -> bool {
        token.0 == self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
