//! The scene context: camera, starfield, rings, textures and the formation director, advanced
//! together once per display frame.

pub mod camera;
pub mod input;
pub mod particle;
pub mod rings;
pub mod starfield;

use crate::{
    assets::textures::{Background, TextureSet, load_background},
    config::SceneConfig,
    formation::director::{FormationDirector, SceneParts, TriggerOutcome},
    foundation::{error::GlyphfallResult, math::Rng64},
    scene::{
        camera::{AutoZoom, Camera, SceneRotation},
        input::{ClickDebouncer, DragRotate, InputEvent},
        particle::AnimatedParticle,
        rings::{Planet, TextRing},
        starfield::Starfield,
    },
    text::raster::{MessageRasterizer, SvgTextRasterizer},
};

/// Frames longer than this are treated as a stall and advance continuous motion by this much.
const MAX_FRAME_DT_S: f32 = 0.25;

pub struct Scene {
    config: SceneConfig,
    camera: Camera,
    rotation: SceneRotation,
    drag: DragRotate,
    debouncer: ClickDebouncer,
    auto_zoom: AutoZoom,
    starfield: Starfield,
    rings: Vec<TextRing>,
    planet: Planet,
    textures: TextureSet,
    background: Background,
    director: FormationDirector,
    last_tick_s: Option<f64>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("seed", &self.config.seed)
            .field("camera", &self.camera)
            .field("rotation", &self.rotation)
            .field("director", &self.director)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Build the scene, loading photos, background and fonts from disk. Missing assets fall back
    /// to procedural ones; only an invalid config is an error.
    #[tracing::instrument(skip(config), fields(seed = config.seed))]
    pub fn new(config: SceneConfig) -> GlyphfallResult<Self> {
        config.validate()?;
        let rasterizer = SvgTextRasterizer::with_font_dirs(&config.assets.font_dirs);
        let textures = TextureSet::load(&config.assets, &config.rings, &rasterizer);
        let background = load_background(
            &config.assets.root,
            config.assets.background.as_deref(),
            config.assets.max_background_side,
        );
        tracing::info!(
            photos = textures.sprites.iter().filter(|t| t.is_photo()).count(),
            fallback_background = background.is_fallback(),
            "assets loaded"
        );
        Self::with_parts(config, textures, background, Box::new(rasterizer))
    }

    /// Build the scene from already prepared textures and a message rasterizer. Touches no files.
    pub fn with_parts(
        config: SceneConfig,
        textures: TextureSet,
        background: Background,
        rasterizer: Box<dyn MessageRasterizer>,
    ) -> GlyphfallResult<Self> {
        config.validate()?;
        let rng = Rng64::new(config.seed);

        let mut starfield =
            Starfield::generate(&config.starfield, &textures.layout(), &mut rng.fork(1));
        if background.is_fallback() {
            starfield.add_background_stars(config.starfield.background_star_count);
        }

        let rings = config
            .rings
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, ring)| TextRing::new(ring, i))
            .collect();

        let director =
            FormationDirector::new(config.formation.clone(), rasterizer, rng.fork(2).next_u64());

        Ok(Self {
            camera: Camera::new(config.viewport, &config.camera),
            rotation: SceneRotation::default(),
            drag: DragRotate::default(),
            debouncer: ClickDebouncer::new(config.input.double_click_window_s),
            auto_zoom: AutoZoom::new(&config.auto_zoom, &config.zoom),
            starfield,
            rings,
            planet: Planet::default(),
            textures,
            background,
            director,
            last_tick_s: None,
            config,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation(&self) -> SceneRotation {
        self.rotation
    }

    pub fn auto_zoom(&self) -> &AutoZoom {
        &self.auto_zoom
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn rings(&self) -> &[TextRing] {
        &self.rings
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn director(&self) -> &FormationDirector {
        &self.director
    }

    /// Text particles currently on screen.
    pub fn formation_particles(&self) -> &[AnimatedParticle] {
        self.director.particles()
    }

    pub fn handle_input(&mut self, event: InputEvent, now_s: f64) -> GlyphfallResult<()> {
        match event {
            InputEvent::PointerDown { x, y } => self.drag.begin(x, y),
            InputEvent::PointerMove { x, y } => {
                self.drag
                    .drag_to(x, y, self.config.input.drag_speed, &mut self.rotation);
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => self.drag.end(),
            InputEvent::Click => self.debouncer.click(now_s),
            InputEvent::Wheel { delta_y } => self.camera.apply_wheel(delta_y, &self.config.zoom),
            InputEvent::Key(key) => {
                if self.config.input.is_auto_zoom_key(key) {
                    self.auto_zoom.toggle();
                }
            }
            InputEvent::Resize { width, height } => {
                self.camera.resize(width, height)?;
                tracing::debug!(width, height, "viewport resized");
            }
        }
        Ok(())
    }

    /// The double-click action, bypassing click debouncing.
    pub fn trigger_formation(&mut self, now_s: f64) -> GlyphfallResult<TriggerOutcome> {
        let mut parts = SceneParts {
            camera: &mut self.camera,
            starfield: &mut self.starfield,
        };
        self.director.trigger(now_s, &mut parts)
    }

    /// Advance everything to `now_s`. Returns the outcome of a double-click resolved this frame.
    pub fn tick(&mut self, now_s: f64) -> GlyphfallResult<Option<TriggerOutcome>> {
        let dt_s = self
            .last_tick_s
            .map_or(0.0, |last| ((now_s - last).max(0.0) as f32).min(MAX_FRAME_DT_S));
        self.last_tick_s = Some(now_s);

        let outcome = if self.debouncer.poll_double(now_s) {
            Some(self.trigger_formation(now_s)?)
        } else {
            None
        };

        self.starfield.update(now_s, dt_s);
        let mut parts = SceneParts {
            camera: &mut self.camera,
            starfield: &mut self.starfield,
        };
        self.director.tick(now_s, &mut parts)?;

        // Formation camera moves win over the zoom sweep.
        if !self.director.camera_busy() {
            self.auto_zoom.step(&mut self.camera, dt_s);
        }
        for ring in &mut self.rings {
            ring.update(dt_s);
        }
        self.planet.update(now_s, dt_s);
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene/scene.rs"]
mod tests;
