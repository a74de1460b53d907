use chrono::{Local, NaiveDate};

use crate::{
    animation::{
        ease::Ease,
        tween::{Lerp, Liveness, LivenessToken, Tween},
    },
    foundation::{
        core::{Canvas, SessionId, Vec3},
        error::{GlyphfallError, GlyphfallResult},
        math::Rng64,
    },
    formation::session::{AnimationSession, AssignStrategy, FormationSources, LayerConfig},
    scene::{
        camera::{Camera, CameraPose},
        particle::{AnimatedParticle, ParticleKind},
        starfield::Starfield,
    },
    text::{
        raster::{MessageRasterizer, TextStyle},
        sampler::{SamplingParams, sample_targets},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormationPhase {
    Idle,
    Forming,
    Held,
    Dissolving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Started(SessionId),
    Dissolving(SessionId),
    /// The gesture arrived in a phase that does not accept it.
    Ignored(FormationPhase),
}

/// One message of the formation sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageStage {
    /// Text with `{anniversary}` and `{days}` placeholders.
    pub template: String,
    pub duration_s: f64,
    /// Offset from the previous stage's start. Ignored for the first stage.
    pub delay_s: f64,
}

/// Decay rates of the dissolve, per second.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DissolveRates {
    pub sprite_scale: f32,
    pub sprite_opacity: f32,
    /// Top speed of a sprite's random drift, world units.
    pub sprite_drift: f32,
    pub sprite_stagger_s: f64,
    pub point_fade: f32,
    pub outline_fade: f32,
    /// Top speed of a point or outline particle's drift, world units.
    pub point_drift: f32,
    /// Fraction of its size a point or outline particle loses per second.
    pub point_shrink: f32,
    /// Fraction of its size a point or outline particle never shrinks below.
    pub point_size_floor: f32,
}

impl Default for DissolveRates {
    fn default() -> Self {
        Self {
            sprite_scale: 6.0,
            sprite_opacity: 3.0,
            sprite_drift: 60.0,
            sprite_stagger_s: 0.02,
            point_fade: 3.0,
            outline_fade: 4.2,
            point_drift: 6.0,
            point_shrink: 1.5,
            point_size_floor: 0.25,
        }
    }
}

impl DissolveRates {
    /// Every particle must reach zero opacity or size in finite time.
    pub fn validate(&self) -> GlyphfallResult<()> {
        let decays = [
            ("sprite_scale", self.sprite_scale),
            ("sprite_opacity", self.sprite_opacity),
            ("point_fade", self.point_fade),
            ("outline_fade", self.outline_fade),
        ];
        for (name, rate) in decays {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(GlyphfallError::validation(format!(
                    "formation.dissolve.{name} must be a positive number"
                )));
            }
        }
        let extras = [
            ("sprite_drift", f64::from(self.sprite_drift)),
            ("sprite_stagger_s", self.sprite_stagger_s),
            ("point_drift", f64::from(self.point_drift)),
            ("point_shrink", f64::from(self.point_shrink)),
        ];
        for (name, value) in extras {
            if !value.is_finite() || value < 0.0 {
                return Err(GlyphfallError::validation(format!(
                    "formation.dissolve.{name} must be a non-negative number"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.point_size_floor) {
            return Err(GlyphfallError::validation(
                "formation.dissolve.point_size_floor must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    pub canvas: Canvas,
    pub style: TextStyle,
    pub sampling: SamplingParams,
    pub assign: AssignStrategy,
    pub layers: LayerConfig,
    pub close_up: CameraPose,
    pub rest: CameraPose,
    pub stages: Vec<MessageStage>,
    pub anniversary: NaiveDate,
    /// Pins "today" for the day count; the local date when unset.
    pub today: Option<NaiveDate>,
    /// Fraction of their opacity scene sprites keep while text is shown.
    pub sprite_dim: f32,
    pub sprite_fade_s: f64,
    pub camera_return_s: f64,
    pub star_scatter_s: f64,
    pub sprite_redistribute_s: f64,
    pub sprite_redistribute_stagger_s: f64,
    pub dissolve: DissolveRates,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1000,
                height: 400,
            },
            style: TextStyle::default(),
            sampling: SamplingParams::default(),
            assign: AssignStrategy::Sequential,
            layers: LayerConfig::default(),
            close_up: CameraPose::new(Vec3::new(0.0, 5.0, 25.0), Vec3::new(0.0, 5.0, 0.0)),
            rest: CameraPose::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO),
            stages: vec![
                MessageStage {
                    template: "{anniversary}".to_string(),
                    duration_s: 3.0,
                    delay_s: 0.0,
                },
                MessageStage {
                    template: "{days} ngày yêu nhau".to_string(),
                    duration_s: 4.0,
                    delay_s: 3.0,
                },
            ],
            anniversary: NaiveDate::from_ymd_opt(2022, 2, 14).unwrap_or_default(),
            today: None,
            sprite_dim: 0.3,
            sprite_fade_s: 1.0 / 3.0,
            camera_return_s: 1.0 / (0.015 * 60.0),
            star_scatter_s: 1.0 / (0.02 * 60.0),
            sprite_redistribute_s: 1.0 / (0.03 * 60.0),
            sprite_redistribute_stagger_s: 0.01,
            dissolve: DissolveRates::default(),
        }
    }
}

/// Fill the `{anniversary}` (dd-mm-yyyy) and `{days}` placeholders.
pub fn render_message(template: &str, anniversary: NaiveDate, today: NaiveDate) -> String {
    let days = (today - anniversary).num_days();
    template
        .replace("{anniversary}", &anniversary.format("%d-%m-%Y").to_string())
        .replace("{days}", &days.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Formation,
    Pulse,
    Dissolve,
    CameraMove,
    SpriteFade,
    StarScatter,
    SpriteRedistribute,
}

/// Per-frame work. Session-bound tasks carry the token of the state that spawned them and stop
/// as soon as that token is superseded.
#[derive(Clone, Debug)]
enum FrameTask {
    Formation {
        token: LivenessToken,
    },
    Pulse {
        token: LivenessToken,
    },
    Dissolve {
        token: LivenessToken,
    },
    CameraMove {
        tween: Tween<CameraPose>,
    },
    SpriteFade {
        from: Vec<f32>,
        to: f32,
        start_s: f64,
        duration_s: f64,
    },
    StarScatter {
        from: Vec<Vec3>,
        to: Vec<Vec3>,
        start_s: f64,
        duration_s: f64,
    },
    SpriteRedistribute {
        from: Vec<Vec3>,
        to: Vec<Vec3>,
        start_s: f64,
        duration_s: f64,
        stagger_s: f64,
    },
}

impl FrameTask {
    fn kind(&self) -> TaskKind {
        match self {
            Self::Formation { .. } => TaskKind::Formation,
            Self::Pulse { .. } => TaskKind::Pulse,
            Self::Dissolve { .. } => TaskKind::Dissolve,
            Self::CameraMove { .. } => TaskKind::CameraMove,
            Self::SpriteFade { .. } => TaskKind::SpriteFade,
            Self::StarScatter { .. } => TaskKind::StarScatter,
            Self::SpriteRedistribute { .. } => TaskKind::SpriteRedistribute,
        }
    }

    fn token(&self) -> Option<LivenessToken> {
        match self {
            Self::Formation { token } | Self::Pulse { token } | Self::Dissolve { token } => {
                Some(*token)
            }
            _ => None,
        }
    }
}

fn linear_progress(now_s: f64, start_s: f64, duration_s: f64) -> f64 {
    if duration_s <= 0.0 {
        return 1.0;
    }
    ((now_s - start_s) / duration_s).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
struct DissolveTrack {
    start_position: Vec3,
    start_size: f32,
    start_opacity: f32,
    drift: Vec3,
    /// Per-particle multiplier on the decay rates.
    pace: f32,
    delay_s: f64,
}

const DISSOLVE_PACE_JITTER: f32 = 0.25;

/// Teardown of a formed message. Every particle decays on its own clock and is removed when it
/// has shrunk or faded away.
#[derive(Clone, Debug)]
pub struct Dissolve {
    pub session: SessionId,
    started_at_s: f64,
    rates: DissolveRates,
    particles: Vec<AnimatedParticle>,
    tracks: Vec<DissolveTrack>,
}

impl Dissolve {
    pub fn new(
        session: AnimationSession,
        started_at_s: f64,
        rates: &DissolveRates,
        rng: &mut Rng64,
    ) -> Self {
        let id = session.id;
        let particles = session.into_particles();
        let mut sprite_index = 0usize;
        let tracks = particles
            .iter()
            .map(|p| {
                let drift = Vec3::new(rng.centered(1.0), rng.centered(1.0), rng.centered(1.0));
                let pace = 1.0 + rng.centered(DISSOLVE_PACE_JITTER);
                let delay_s = if p.is_sprite() {
                    let delay = sprite_index as f64 * rates.sprite_stagger_s;
                    sprite_index += 1;
                    delay
                } else {
                    0.0
                };
                DissolveTrack {
                    start_position: p.position,
                    start_size: p.size,
                    start_opacity: p.opacity,
                    drift,
                    pace,
                    delay_s,
                }
            })
            .collect();
        Self {
            session: id,
            started_at_s,
            rates: rates.clone(),
            particles,
            tracks,
        }
    }

    pub fn particles(&self) -> &[AnimatedParticle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Latest time at which any particle can still be alive.
    pub fn deadline_s(&self) -> f64 {
        let r = &self.rates;
        self.particles
            .iter()
            .zip(&self.tracks)
            .map(|(p, t)| {
                let life = match p.kind {
                    ParticleKind::Point => t.start_opacity / (r.point_fade * t.pace),
                    ParticleKind::Outline => t.start_opacity / (r.outline_fade * t.pace),
                    ParticleKind::Sprite { .. } => (t.start_opacity / (r.sprite_opacity * t.pace))
                        .min(t.start_size / (r.sprite_scale * t.pace)),
                };
                self.started_at_s + t.delay_s + f64::from(life.max(0.0))
            })
            .fold(self.started_at_s, f64::max)
    }

    /// Decay every particle to `now_s` and drop the finished ones. Returns how many remain.
    pub fn step(&mut self, now_s: f64) -> usize {
        let r = &self.rates;
        let started = self.started_at_s;
        let mut keep = Vec::with_capacity(self.particles.len());
        for (p, t) in self.particles.iter_mut().zip(&self.tracks) {
            let elapsed = (now_s - started - t.delay_s).max(0.0) as f32;
            let paced = elapsed * t.pace;
            let alive = match p.kind {
                ParticleKind::Point | ParticleKind::Outline => {
                    let fade = if p.kind == ParticleKind::Point {
                        r.point_fade
                    } else {
                        r.outline_fade
                    };
                    let shrink = (1.0 - r.point_shrink * paced).max(r.point_size_floor);
                    p.size = t.start_size * shrink;
                    p.opacity = t.start_opacity - fade * paced;
                    p.position = t.start_position + t.drift * (r.point_drift * elapsed);
                    p.opacity > 0.0
                }
                ParticleKind::Sprite { .. } => {
                    p.size = t.start_size - r.sprite_scale * paced;
                    p.opacity = t.start_opacity - r.sprite_opacity * paced;
                    p.position = t.start_position + t.drift * (r.sprite_drift * elapsed);
                    p.size > 0.1 && p.opacity > 0.0
                }
            };
            keep.push(alive);
        }

        let mut it = keep.iter();
        self.particles.retain(|_| *it.next().unwrap_or(&false));
        let mut it = keep.iter();
        self.tracks.retain(|_| *it.next().unwrap_or(&false));
        self.particles.len()
    }
}

/// Mutable scene pieces the director animates alongside the text.
pub struct SceneParts<'a> {
    pub camera: &'a mut Camera,
    pub starfield: &'a mut Starfield,
}

/// State machine `Idle → Forming → Held → Dissolving → Idle` that owns the active session.
pub struct FormationDirector {
    config: FormationConfig,
    rasterizer: Box<dyn MessageRasterizer>,
    phase: FormationPhase,
    session: Option<AnimationSession>,
    dissolve: Option<Dissolve>,
    stage: usize,
    next_stage_at_s: Option<f64>,
    sprites_dimmed: bool,
    liveness: Liveness,
    tasks: Vec<FrameTask>,
    next_id: u64,
    rng: Rng64,
}

impl std::fmt::Debug for FormationDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormationDirector")
            .field("phase", &self.phase)
            .field("stage", &self.stage)
            .field("tasks", &self.task_kinds())
            .finish()
    }
}

impl FormationDirector {
    pub fn new(config: FormationConfig, rasterizer: Box<dyn MessageRasterizer>, seed: u64) -> Self {
        Self {
            config,
            rasterizer,
            phase: FormationPhase::Idle,
            session: None,
            dissolve: None,
            stage: 0,
            next_stage_at_s: None,
            sprites_dimmed: false,
            liveness: Liveness::new(),
            tasks: Vec::new(),
            next_id: 0,
            rng: Rng64::new(seed),
        }
    }

    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    pub fn phase(&self) -> FormationPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn dissolve(&self) -> Option<&Dissolve> {
        self.dissolve.as_ref()
    }

    /// Particles currently on screen, whichever phase owns them.
    pub fn particles(&self) -> &[AnimatedParticle] {
        if let Some(d) = &self.dissolve {
            return d.particles();
        }
        self.session
            .as_ref()
            .map(AnimationSession::particles)
            .unwrap_or(&[])
    }

    pub fn task_kinds(&self) -> Vec<TaskKind> {
        self.tasks.iter().map(FrameTask::kind).collect()
    }

    /// Whether a tween currently drives the camera.
    pub fn camera_busy(&self) -> bool {
        self.tasks
            .iter()
            .any(|t| matches!(t, FrameTask::CameraMove { .. }))
    }

    /// Time the next sequence stage is due, if one is pending.
    pub fn next_stage_at(&self) -> Option<f64> {
        self.next_stage_at_s
    }

    fn today(&self) -> NaiveDate {
        self.config
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn stage_message(&self, stage: usize) -> Option<String> {
        let s = self.config.stages.get(stage)?;
        Some(render_message(
            &s.template,
            self.config.anniversary,
            self.today(),
        ))
    }

    /// Double-click gesture. Starts a formation from `Idle`, dissolves a `Held` message, and is
    /// ignored while anything is still moving.
    #[tracing::instrument(skip(self, parts), fields(phase = ?self.phase))]
    pub fn trigger(
        &mut self,
        now_s: f64,
        parts: &mut SceneParts<'_>,
    ) -> GlyphfallResult<TriggerOutcome> {
        match self.phase {
            FormationPhase::Idle => {
                if self.config.stages.is_empty() {
                    tracing::warn!("no message stages configured");
                    return Ok(TriggerOutcome::Ignored(self.phase));
                }
                let id = self.start_stage(0, now_s, parts)?;
                Ok(TriggerOutcome::Started(id))
            }
            FormationPhase::Held => {
                let id = self.begin_dissolve(now_s, parts);
                Ok(TriggerOutcome::Dissolving(id))
            }
            FormationPhase::Forming | FormationPhase::Dissolving => {
                tracing::debug!("trigger ignored");
                Ok(TriggerOutcome::Ignored(self.phase))
            }
        }
    }

    fn start_stage(
        &mut self,
        stage: usize,
        now_s: f64,
        parts: &mut SceneParts<'_>,
    ) -> GlyphfallResult<SessionId> {
        let Some(entry) = self.config.stages.get(stage).cloned() else {
            return Err(GlyphfallError::validation(format!(
                "no message stage {stage}"
            )));
        };
        let message = render_message(&entry.template, self.config.anniversary, self.today());

        let grid = self
            .rasterizer
            .rasterize(&message, self.config.canvas, &self.config.style)?;
        let targets = sample_targets(&grid, &self.config.sampling)?;

        self.next_id += 1;
        let id = SessionId(self.next_id);
        let stars = parts.starfield.world_positions();
        let sprite_textures: Vec<usize> =
            parts.starfield.sprites.iter().map(|s| s.texture).collect();
        let mut rng = self.rng.fork(id.0);
        let session = AnimationSession::build(
            id,
            message,
            now_s,
            entry.duration_s,
            targets,
            FormationSources {
                star_positions: &stars,
                sprite_textures: &sprite_textures,
            },
            &self.config.layers,
            self.config.assign,
            &mut rng,
        );
        tracing::info!(
            id = id.0,
            stage,
            message = %session.message,
            particles = session.particles().len(),
            "formation started"
        );

        // Replacing a held session drops its particles and stops its pulse.
        self.session = Some(session);
        let token = self.liveness.supersede();
        self.tasks.push(FrameTask::Formation { token });

        self.retarget_camera(parts.camera, self.config.close_up, now_s, entry.duration_s);
        if !self.sprites_dimmed {
            self.sprites_dimmed = true;
            self.push_sprite_fade(parts.starfield, self.config.sprite_dim, now_s);
        }

        self.stage = stage;
        self.next_stage_at_s = self
            .config
            .stages
            .get(stage + 1)
            .map(|next| now_s + next.delay_s.max(0.0));
        self.phase = FormationPhase::Forming;
        Ok(id)
    }

    fn begin_dissolve(&mut self, now_s: f64, parts: &mut SceneParts<'_>) -> SessionId {
        let token = self.liveness.supersede();
        let mut id = SessionId(0);
        if let Some(session) = self.session.take() {
            id = session.id;
            let mut rng = self.rng.fork(id.0 ^ 0xD155_01E5);
            let dissolve = Dissolve::new(session, now_s, &self.config.dissolve, &mut rng);
            tracing::info!(
                id = id.0,
                particles = dissolve.particles().len(),
                "dissolve started"
            );
            self.dissolve = Some(dissolve);
        }
        self.tasks.push(FrameTask::Dissolve { token });

        let rest = self.config.rest;
        self.retarget_camera(parts.camera, rest, now_s, self.config.camera_return_s);
        self.sprites_dimmed = false;
        self.push_sprite_fade(parts.starfield, 1.0, now_s);

        let from: Vec<Vec3> = parts.starfield.points.iter().map(|p| p.position).collect();
        let to = parts.starfield.scatter_targets();
        self.tasks.retain(|t| {
            !matches!(
                t,
                FrameTask::StarScatter { .. } | FrameTask::SpriteRedistribute { .. }
            )
        });
        self.tasks.push(FrameTask::StarScatter {
            from,
            to,
            start_s: now_s,
            duration_s: self.config.star_scatter_s,
        });

        let from: Vec<Vec3> = parts.starfield.sprites.iter().map(|s| s.position).collect();
        let to = parts.starfield.redistribution_targets();
        self.tasks.push(FrameTask::SpriteRedistribute {
            from,
            to,
            start_s: now_s,
            duration_s: self.config.sprite_redistribute_s,
            stagger_s: self.config.sprite_redistribute_stagger_s,
        });

        self.next_stage_at_s = None;
        self.phase = FormationPhase::Dissolving;
        id
    }

    fn retarget_camera(&mut self, camera: &Camera, to: CameraPose, now_s: f64, duration_s: f64) {
        self.tasks
            .retain(|t| !matches!(t, FrameTask::CameraMove { .. }));
        self.tasks.push(FrameTask::CameraMove {
            tween: Tween::new(camera.pose(), to, now_s, duration_s, Ease::OutCubic),
        });
    }

    fn push_sprite_fade(&mut self, starfield: &Starfield, to: f32, now_s: f64) {
        self.tasks
            .retain(|t| !matches!(t, FrameTask::SpriteFade { .. }));
        self.tasks.push(FrameTask::SpriteFade {
            from: starfield.sprites.iter().map(|s| s.fade).collect(),
            to,
            start_s: now_s,
            duration_s: self.config.sprite_fade_s,
        });
    }

    /// Run one frame of every live task and advance the sequence.
    pub fn tick(&mut self, now_s: f64, parts: &mut SceneParts<'_>) -> GlyphfallResult<()> {
        // A stage that fails to build leaves the current message held.
        if self.phase == FormationPhase::Held
            && self.next_stage_at_s.take_if(|at| now_s >= *at).is_some()
            && let Err(err) = self.start_stage(self.stage + 1, now_s, parts)
        {
            tracing::warn!(stage = self.stage + 1, error = %err, "next message stage failed");
        }

        let mut tasks = std::mem::take(&mut self.tasks);
        tasks.retain_mut(|task| self.run_task(task, now_s, parts));
        // Tasks spawned while running go after the survivors.
        tasks.append(&mut self.tasks);
        self.tasks = tasks;
        Ok(())
    }

    /// Returns whether the task stays scheduled.
    fn run_task(&mut self, task: &mut FrameTask, now_s: f64, parts: &mut SceneParts<'_>) -> bool {
        if let Some(token) = task.token()
            && !self.liveness.is_live(token)
        {
            tracing::trace!(kind = ?task.kind(), "dropping superseded task");
            return false;
        }

        match task {
            FrameTask::Formation { token } => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                if !session.advance_formation(now_s) {
                    return true;
                }
                tracing::debug!(id = session.id.0, "formation held");
                self.phase = FormationPhase::Held;
                self.tasks.push(FrameTask::Pulse { token: *token });
                false
            }
            FrameTask::Pulse { .. } => match self.session.as_mut() {
                Some(session) => {
                    session.pulse(now_s);
                    true
                }
                None => false,
            },
            FrameTask::Dissolve { .. } => {
                let remaining = self.dissolve.as_mut().map_or(0, |d| d.step(now_s));
                if remaining > 0 {
                    return true;
                }
                tracing::info!("dissolve finished");
                self.dissolve = None;
                self.phase = FormationPhase::Idle;
                false
            }
            FrameTask::CameraMove { tween } => {
                parts.camera.set_pose(tween.sample(now_s));
                !tween.is_finished(now_s)
            }
            FrameTask::SpriteFade {
                from,
                to,
                start_s,
                duration_s,
            } => {
                let t = linear_progress(now_s, *start_s, *duration_s);
                for (sprite, from) in parts.starfield.sprites.iter_mut().zip(from.iter()) {
                    sprite.fade = <f32 as Lerp>::lerp(from, to, t);
                }
                t < 1.0
            }
            FrameTask::StarScatter {
                from,
                to,
                start_s,
                duration_s,
            } => {
                let t = linear_progress(now_s, *start_s, *duration_s);
                let eased = Ease::InOutQuad.apply(t);
                for ((star, a), b) in parts.starfield.points.iter_mut().zip(from.iter()).zip(to.iter())
                {
                    star.position = <Vec3 as Lerp>::lerp(a, b, eased);
                }
                t < 1.0
            }
            FrameTask::SpriteRedistribute {
                from,
                to,
                start_s,
                duration_s,
                stagger_s,
            } => {
                let mut running = false;
                for (i, ((sprite, a), b)) in parts
                    .starfield
                    .sprites
                    .iter_mut()
                    .zip(from.iter())
                    .zip(to.iter())
                    .enumerate()
                {
                    let start = *start_s + i as f64 * *stagger_s;
                    if now_s < start {
                        running = true;
                        continue;
                    }
                    let t = linear_progress(now_s, start, *duration_s);
                    sprite.position = <Vec3 as Lerp>::lerp(a, b, t);
                    running |= t < 1.0;
                }
                running
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/formation/director.rs"]
mod tests;
