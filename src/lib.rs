#![forbid(unsafe_code)]

//! Glyphfall: a frame-driven 3D starfield scene whose particles gather into rasterized text and
//! scatter back out again.
//!
//! The host owns the loop: build a [`Scene`], feed it [`InputEvent`]s, and call
//! [`Scene::tick`] once per frame with wall-clock seconds. [`PreviewRenderer`] draws the scene
//! on the CPU for inspection and PNG dumps. See [`guide`] for the moving parts.

pub mod animation;
pub mod assets;
pub mod config;
pub mod formation;
pub mod foundation;
pub mod guide;
pub mod render;
pub mod scene;
pub mod text;

pub use animation::{
    ease::Ease,
    tween::{Lerp, Liveness, LivenessToken, Tween},
};
pub use assets::{
    TextureImage,
    textures::{AssetConfig, Background, TextureSet},
};
pub use config::SceneConfig;
pub use formation::{
    director::{FormationConfig, FormationDirector, FormationPhase, TriggerOutcome},
    session::{AnimationSession, AssignStrategy},
};
pub use foundation::{
    core::{Canvas, Rgb, SessionId, Vec3},
    error::{GlyphfallError, GlyphfallResult},
    math::Rng64,
};
pub use render::{FrameRGBA, PreviewRenderer, PreviewSettings, write_png};
pub use scene::{
    Scene,
    camera::{Camera, CameraPose},
    input::InputEvent,
    particle::{AnimatedParticle, ParticleKind},
};
pub use text::{
    raster::{AlphaGrid, MessageRasterizer, SvgTextRasterizer, TextStyle},
    sampler::{SamplingParams, TargetPoint, sample_targets},
};
