use std::sync::Arc;

use glam::Quat;
use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::{TextureImage, textures::Background},
    foundation::{
        core::{Rgb, Vec3},
        error::{GlyphfallError, GlyphfallResult},
    },
    render::{FrameRGBA, PreviewSettings},
    scene::{
        Scene,
        camera::Camera,
        particle::ParticleKind,
        rings::LABEL_SCALE,
        starfield::StarPoint,
    },
};

/// Discs smaller than this are drawn at this radius so distant stars stay visible.
const MIN_DISC_RADIUS_PX: f64 = 0.5;

/// Which prepared image a sprite draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ImageRef {
    Sprite(usize),
    Label(usize),
}

#[derive(Clone, Copy, Debug)]
enum Mark {
    Disc {
        center: vello_cpu::kurbo::Point,
        radius: f64,
        rgba: [u8; 4],
    },
    Quad {
        center: vello_cpu::kurbo::Point,
        width: f64,
        height: f64,
        rotation: f64,
        image: ImageRef,
        opacity: f32,
    },
}

/// Something to draw, keyed by camera depth.
#[derive(Clone, Copy, Debug)]
struct Drawable {
    depth: f32,
    mark: Mark,
}

/// Software preview of a [`Scene`], drawn back to front with `vello_cpu`.
///
/// Textures are converted to `vello_cpu` images once, when the renderer is created; the scene's
/// texture set does not change afterwards.
pub struct PreviewRenderer {
    settings: PreviewSettings,
    sprite_images: Vec<Option<vello_cpu::Image>>,
    label_images: Vec<Option<vello_cpu::Image>>,
    panorama: Option<vello_cpu::Image>,
}

impl std::fmt::Debug for PreviewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRenderer")
            .field("settings", &self.settings)
            .field("sprite_images", &self.sprite_images.len())
            .field("label_images", &self.label_images.len())
            .field("panorama", &self.panorama.is_some())
            .finish()
    }
}

impl PreviewRenderer {
    pub fn new(scene: &Scene, settings: PreviewSettings) -> GlyphfallResult<Self> {
        let textures = scene.textures();
        let sprite_images = textures
            .sprites
            .iter()
            .map(|t| texture_to_image(&t.image))
            .collect::<GlyphfallResult<Vec<_>>>()?;
        let label_images = textures
            .ring_labels
            .iter()
            .map(texture_to_image)
            .collect::<GlyphfallResult<Vec<_>>>()?;
        let panorama = match scene.background() {
            Background::Panorama(img) => texture_to_image(img)?,
            Background::Fallback { .. } => None,
        };
        Ok(Self {
            settings,
            sprite_images,
            label_images,
            panorama,
        })
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    /// Draw the scene as it is right now.
    #[tracing::instrument(skip_all)]
    pub fn render(&mut self, scene: &Scene) -> GlyphfallResult<FrameRGBA> {
        let camera = scene.camera();
        let viewport = camera.viewport();
        let width: u16 = viewport
            .width
            .try_into()
            .map_err(|_| GlyphfallError::render("viewport width exceeds u16"))?;
        let height: u16 = viewport
            .height
            .try_into()
            .map_err(|_| GlyphfallError::render("viewport height exceeds u16"))?;

        let [r, g, b, a] = match scene.background() {
            Background::Fallback { color } => color.to_rgba8(1.0),
            Background::Panorama(_) => [0, 0, 0, 255],
        };
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
        if let Some(panorama) = &self.panorama {
            draw_panorama(&mut ctx, panorama, f64::from(width), f64::from(height))?;
        }

        let mut drawables = self.collect(scene);
        // Far to near; ties keep collection order.
        drawables.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        tracing::trace!(count = drawables.len(), "drawing frame");
        for d in &drawables {
            self.draw(&mut ctx, d)?;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: viewport.width,
            height: viewport.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn collect(&self, scene: &Scene) -> Vec<Drawable> {
        let camera = scene.camera();
        let rot = scene.rotation().quat();
        let point_factor = f64::from((camera.fov_y_deg.to_radians() * 0.5).tan());
        let mut out = Vec::new();

        let starfield = scene.starfield();
        let layer_yaw = Quat::from_rotation_y(starfield.yaw);
        let square = starfield.square_layer_rotation();
        let star_layers: [(&[StarPoint], Quat); 3] = [
            (starfield.background.as_slice(), Quat::IDENTITY),
            (starfield.points.as_slice(), layer_yaw),
            (starfield.square_points.as_slice(), square),
        ];
        for (stars, layer) in star_layers {
            for star in stars {
                push_disc(
                    &mut out,
                    camera,
                    rot,
                    layer * star.position,
                    star.size * self.settings.star_size_scale,
                    point_factor,
                    star.color,
                    star.opacity,
                );
            }
        }

        for sprite in &starfield.sprites {
            let opacity = sprite.effective_opacity();
            if opacity <= 0.0 {
                continue;
            }
            if let Some(p) = camera.project(sprite.position, rot) {
                let w = f64::from(sprite.scale * p.pixels_per_unit);
                out.push(Drawable {
                    depth: p.depth,
                    mark: Mark::Quad {
                        center: to_cpu_point(p.screen),
                        width: w,
                        height: w * f64::from(sprite.aspect),
                        rotation: f64::from(sprite.rotation),
                        image: ImageRef::Sprite(sprite.texture),
                        opacity,
                    },
                });
            }
        }

        let planet = scene.planet();
        if let Some(p) = camera.project(Vec3::ZERO, rot) {
            let ppu = f64::from(p.pixels_per_unit);
            out.push(Drawable {
                depth: p.depth,
                mark: Mark::Disc {
                    center: to_cpu_point(p.screen),
                    radius: f64::from(planet.glow_world_radius()) * ppu,
                    rgba: planet.glow_color.to_rgba8(planet.glow_opacity),
                },
            });
            out.push(Drawable {
                // Just in front of its own glow.
                depth: p.depth - 1e-3,
                mark: Mark::Disc {
                    center: to_cpu_point(p.screen),
                    radius: f64::from(planet.radius) * ppu,
                    rgba: planet.color.to_rgba8(1.0),
                },
            });
        }

        for ring in scene.rings() {
            for pos in ring.label_positions() {
                if let Some(p) = camera.project(pos, rot) {
                    let ppu = f64::from(p.pixels_per_unit);
                    out.push(Drawable {
                        depth: p.depth,
                        mark: Mark::Quad {
                            center: to_cpu_point(p.screen),
                            width: f64::from(LABEL_SCALE.0) * ppu,
                            height: f64::from(LABEL_SCALE.1) * ppu,
                            rotation: 0.0,
                            image: ImageRef::Label(ring.texture),
                            opacity: 1.0,
                        },
                    });
                }
            }
        }

        for particle in scene.formation_particles() {
            if particle.opacity <= 0.0 {
                continue;
            }
            match particle.kind {
                ParticleKind::Point | ParticleKind::Outline => push_disc(
                    &mut out,
                    camera,
                    rot,
                    particle.position,
                    particle.size * self.settings.text_point_scale,
                    point_factor,
                    particle.color,
                    particle.opacity,
                ),
                ParticleKind::Sprite { texture } => {
                    let Some(p) = camera.project(particle.position, rot) else {
                        continue;
                    };
                    let aspect = scene
                        .textures()
                        .get(texture)
                        .map_or(1.0, |img| f64::from(img.height) / f64::from(img.width.max(1)));
                    let w = f64::from(particle.size * p.pixels_per_unit);
                    out.push(Drawable {
                        depth: p.depth,
                        mark: Mark::Quad {
                            center: to_cpu_point(p.screen),
                            width: w,
                            height: w * aspect,
                            rotation: 0.0,
                            image: ImageRef::Sprite(texture),
                            opacity: particle.opacity.min(1.0),
                        },
                    });
                }
            }
        }

        out
    }

    fn draw(&self, ctx: &mut vello_cpu::RenderContext, d: &Drawable) -> GlyphfallResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match d.mark {
            Mark::Disc {
                center,
                radius,
                rgba,
            } => {
                if rgba[3] == 0 {
                    return Ok(());
                }
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    rgba[0], rgba[1], rgba[2], rgba[3],
                ));
                let path = vello_cpu::kurbo::Circle::new(center, radius.max(MIN_DISC_RADIUS_PX))
                    .to_path(0.1);
                ctx.fill_path(&path);
                Ok(())
            }
            Mark::Quad {
                center,
                width,
                height,
                rotation,
                image,
                opacity,
            } => {
                let slot = match image {
                    ImageRef::Sprite(i) => self.sprite_images.get(i),
                    ImageRef::Label(i) => self.label_images.get(i),
                };
                let Some(Some(paint)) = slot else {
                    return Ok(());
                };
                let (iw, ih) = image_paint_size(paint)?;
                if width <= 0.0 || height <= 0.0 {
                    return Ok(());
                }

                ctx.set_transform(
                    vello_cpu::kurbo::Affine::translate(center.to_vec2())
                        * vello_cpu::kurbo::Affine::rotate(rotation)
                        * vello_cpu::kurbo::Affine::scale_non_uniform(width / iw, height / ih)
                        * vello_cpu::kurbo::Affine::translate((-iw / 2.0, -ih / 2.0)),
                );
                ctx.set_paint(paint.clone());
                if opacity < 1.0 {
                    ctx.push_opacity_layer(opacity);
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
                if opacity < 1.0 {
                    ctx.pop_layer();
                }
                Ok(())
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn push_disc(
    out: &mut Vec<Drawable>,
    camera: &Camera,
    rot: Quat,
    world: Vec3,
    size: f32,
    point_factor: f64,
    color: Rgb,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    if let Some(p) = camera.project(world, rot) {
        // Perspective point sprite: `size * viewport_height / (2 * depth)` pixels across.
        let radius = 0.5 * f64::from(size) * f64::from(p.pixels_per_unit) * point_factor;
        out.push(Drawable {
            depth: p.depth,
            mark: Mark::Disc {
                center: to_cpu_point(p.screen),
                radius,
                rgba: color.to_rgba8(opacity),
            },
        });
    }
}

/// Cover the viewport with the panorama, centered, keeping its aspect.
fn draw_panorama(
    ctx: &mut vello_cpu::RenderContext,
    panorama: &vello_cpu::Image,
    width: f64,
    height: f64,
) -> GlyphfallResult<()> {
    let (iw, ih) = image_paint_size(panorama)?;
    let scale = (width / iw).max(height / ih);
    let offset = ((width - iw * scale) / 2.0, (height - ih * scale) / 2.0);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(
        vello_cpu::kurbo::Affine::translate(offset) * vello_cpu::kurbo::Affine::scale(scale),
    );
    ctx.set_paint(panorama.clone());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    Ok(())
}

fn to_cpu_point(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(to_cpu_point(p)),
            PathEl::LineTo(p) => out.line_to(to_cpu_point(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(to_cpu_point(p1), to_cpu_point(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(to_cpu_point(p1), to_cpu_point(p2), to_cpu_point(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// `None` for empty textures, which draw nothing.
fn texture_to_image(texture: &TextureImage) -> GlyphfallResult<Option<vello_cpu::Image>> {
    if texture.width == 0 || texture.height == 0 {
        return Ok(None);
    }
    let pixmap =
        image_premul_bytes_to_pixmap(texture.rgba8_premul.as_slice(), texture.width, texture.height)?;
    Ok(Some(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }))
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> GlyphfallResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GlyphfallError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GlyphfallError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(GlyphfallError::render("texture byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn image_paint_size(image: &vello_cpu::Image) -> GlyphfallResult<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Ok((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => Err(GlyphfallError::render(
            "preview renderer does not support opaque image ids",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
