//! # Glyphfall guide
//!
//! A walkthrough of how a frame comes together and which type owns what. For command-line usage
//! start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Scene`](crate::Scene): the one context object. Owns the camera, starfield, text rings,
//!   planet, textures and the formation director. There are no globals.
//! - [`SceneConfig`](crate::SceneConfig): every tunable, serde-backed, all fields defaulted
//! - [`FormationDirector`](crate::FormationDirector): the text effect's state machine
//! - [`AnimationSession`](crate::AnimationSession): the particles of one message
//! - [`MessageRasterizer`](crate::MessageRasterizer): text to [`AlphaGrid`](crate::AlphaGrid)
//! - [`sample_targets`](crate::sample_targets): alpha grid to [`TargetPoint`](crate::TargetPoint)s
//! - [`PreviewRenderer`](crate::PreviewRenderer): CPU drawing of a scene into a
//!   [`FrameRGBA`](crate::FrameRGBA)
//!
//! ---
//!
//! ## The frame loop
//!
//! The host calls [`Scene::tick`](crate::Scene::tick) once per displayed frame with a monotonic
//! time in seconds. Everything that moves is a function of elapsed wall-clock time, so frame
//! rate only changes smoothness, never durations. Per-frame constants tuned for a 60 fps loop
//! are converted to per-second rates ([`REFERENCE_FPS`](crate::scene::starfield::REFERENCE_FPS)),
//! and per-frame random chances are converted with
//! [`frame_chance`](crate::scene::starfield::frame_chance).
//!
//! Within one tick:
//!
//! 1. a pending click gesture is resolved; a double-click triggers the director
//! 2. the starfield twinkles, drifts and rotates
//! 3. the director runs its frame tasks (formation, pulse, dissolve, camera and sprite tweens)
//! 4. auto-zoom steps, unless a formation tween owns the camera
//! 5. rings and planet spin
//!
//! Input arrives between ticks through [`Scene::handle_input`](crate::Scene::handle_input).
//!
//! ---
//!
//! ## Formation lifecycle
//!
//! ```text
//! Idle --double-click--> Forming --progress 1--> Held --double-click--> Dissolving --empty--> Idle
//!                           ^                      |
//!                           +--- next stage due ---+
//! ```
//!
//! - Forming: the message is rasterized, sampled and matched to particles. Points start at the
//!   current star positions, sprites on a distant shell. All move with `OutBack` while the camera
//!   glides to the close-up with `OutCubic`.
//! - Held: the text pulses. When the configured sequence has another stage, it replaces the
//!   current session after its delay.
//! - Dissolving: every particle fades on its own clock; sprites also shrink and drift. The camera
//!   returns, stars re-scatter and scene sprites regroup.
//!
//! Gestures during Forming or Dissolving are ignored.
//!
//! ### Liveness tokens
//!
//! Session-bound frame tasks carry a [`LivenessToken`](crate::LivenessToken). Starting a new
//! session or a dissolve supersedes the previous token, and the director drops any task whose
//! token is stale before it runs. A held message's pulse therefore can never touch the particles
//! of the message that replaced it.
//!
//! ---
//!
//! ## Assets and fallbacks
//!
//! All file IO happens in [`Scene::new`](crate::Scene::new): photos are decoded in parallel,
//! the background panorama is loaded, and ring labels are rendered through `resvg`. A missing or
//! broken file is logged and replaced by a deterministic procedural texture, never surfaced as an
//! error. [`Scene::with_parts`](crate::Scene::with_parts) builds a scene from prepared textures
//! without touching the filesystem.
//!
//! ---
//!
//! ## Premultiplied alpha
//!
//! Textures and rendered frames are premultiplied RGBA8. [`write_png`](crate::write_png)
//! converts to straight alpha on the way out.
//!
//! ---
//!
//! ## Example
//!
//! ```rust,no_run
//! use glyphfall::{InputEvent, PreviewRenderer, Scene, SceneConfig, write_png};
//!
//! # fn main() -> glyphfall::GlyphfallResult<()> {
//! let mut scene = Scene::new(SceneConfig::default())?;
//! let mut renderer = PreviewRenderer::new(&scene, Default::default())?;
//!
//! scene.tick(0.0)?;
//! scene.handle_input(InputEvent::Click, 0.0)?;
//! scene.handle_input(InputEvent::Click, 0.1)?;
//! for frame in 1..=240 {
//!     scene.tick(frame as f64 / 60.0)?;
//! }
//!
//! let frame = renderer.render(&scene)?;
//! write_png(&frame, std::path::Path::new("formed.png"))?;
//! # Ok(())
//! # }
//! ```
