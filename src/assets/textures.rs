use std::{
    f64::consts::PI,
    path::{Path, PathBuf},
    sync::Arc,
};

use kurbo::{BezPath, Point};
use rayon::prelude::*;

use crate::{
    assets::{TextureImage, decode::decode_image},
    foundation::{
        core::{Canvas, Rgb},
        error::{GlyphfallError, GlyphfallResult},
    },
    render::cpu::bezpath_to_cpu,
    scene::{rings::RingConfig, starfield::SpriteTextures},
    text::raster::SvgTextRasterizer,
};

/// Edge length of procedural shape textures.
pub const FALLBACK_SIZE: u16 = 64;

/// Colors of the procedural shapes, keyed by index.
pub const FALLBACK_COLORS: [u32; 5] = [0xff69b4, 0xff9ddb, 0xffb6e6, 0xff45a2, 0xff007f];

pub const BACKGROUND_FALLBACK_COLOR: u32 = 0x0a0a2e;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the photo and background paths are relative to.
    pub root: PathBuf,
    pub background: Option<String>,
    pub photos: Vec<String>,
    pub font_dirs: Vec<PathBuf>,
    /// Decoded photos are downscaled to this longer side.
    pub max_photo_side: u32,
    pub max_background_side: u32,
    pub ring_label: RingLabelStyle,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("images"),
            background: Some("thienha.png".to_string()),
            photos: default_photo_names(),
            font_dirs: Vec::new(),
            max_photo_side: 256,
            max_background_side: 2048,
            ring_label: RingLabelStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RingLabelStyle {
    pub canvas: Canvas,
    pub font_size_px: f32,
    pub font_families: Vec<String>,
    pub color: String,
}

impl Default for RingLabelStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 512,
                height: 128,
            },
            font_size_px: 40.0,
            font_families: vec![
                "Segoe UI".to_string(),
                "Arial".to_string(),
                "sans-serif".to_string(),
            ],
            color: "#ffd6ea".to_string(),
        }
    }
}

fn default_photo_names() -> Vec<String> {
    [
        "z6907980152241_ba3175cba703f9ab68de393b88430443.jpg",
        "z6907980566480_0067314bda38229023cd6c5d74a055d1.jpg",
        "z6907986209790_3d5a4f84fcf4f23aa6b72d6ff774e7f9.jpg",
        "z6907986210126_771425da94925f9af5553a94d3bf4f44.jpg",
        "z6907986210504_49e54106556b84cf0570c92046b3d687.jpg",
        "z6907986214022_8f1ecccb73b1d4ce0b6dfa71018f0e82.jpg",
        "z6907986215472_deba02cae431b94f045661db588e22cf.jpg",
        "z6907986227729_4321fd45314a15839c81a34ca5ef7bdd.jpg",
        "z6907986227859_fad5089fc5df2354476c9da58c8199a2.jpg",
        "z6907986228597_52cc822388901190b425877412c61a26.jpg",
        "z6907986228740_bf0e26104178778c4081dc88c48723f2.jpg",
        "z6908013529823_08c2fecd84d340c4048face6d250eeb8.jpg",
        "z6908013532688_10957597e3b965d0324ac8d1c4002361.jpg",
        "z6908013532798_fb6a64c219ea5004d6e1b5ed21d71a18.jpg",
        "z6908013532923_7baadd39826f401c2e4abadfdc6abc60.jpg",
        "z6908013535746_f38e4b59b71282d5cc5aadbc73137dd2.jpg",
        "z6908013537571_5056907a3d756a072e469f488d2a55fb.jpg",
        "z6908013538221_ad8ae2da6445d23a9387125c4b3c797d.jpg",
        "z6908013538349_7dab25ba11d00bde6a186e915e5ec780.jpg",
        "z6908013539815_6d14a4206fb6fff3ffbfe7eb03ea1091.jpg",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackShape {
    Square,
    Diamond,
    Triangle,
    Hexagon,
    Star,
}

impl FallbackShape {
    pub const ALL: [Self; 5] = [
        Self::Square,
        Self::Diamond,
        Self::Triangle,
        Self::Hexagon,
        Self::Star,
    ];

    /// Shape standing in for photo `index`; photos never fall back to the star.
    pub fn for_photo(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Outline centered at `c`, in texture pixels.
    pub fn path(self, c: Point) -> BezPath {
        let mut path = BezPath::new();
        let mut polygon = |pts: &[(f64, f64)]| {
            for (i, &(x, y)) in pts.iter().enumerate() {
                let p = Point::new(c.x + x, c.y + y);
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
            path.close_path();
        };
        match self {
            Self::Square => polygon(&[(-12.0, -12.0), (12.0, -12.0), (12.0, 12.0), (-12.0, 12.0)]),
            Self::Diamond => polygon(&[(0.0, -20.0), (20.0, 0.0), (0.0, 20.0), (-20.0, 0.0)]),
            Self::Triangle => polygon(&[(0.0, -20.0), (20.0, 15.0), (-20.0, 15.0)]),
            Self::Hexagon => {
                let pts: Vec<_> = (0..6)
                    .map(|i| {
                        let a = PI / 3.0 * f64::from(i);
                        (a.cos() * 15.0, a.sin() * 15.0)
                    })
                    .collect();
                polygon(&pts);
            }
            Self::Star => {
                let pts: Vec<_> = (0..10)
                    .map(|i| {
                        let r = if i % 2 == 0 { 20.0 } else { 10.0 };
                        let a = PI / 5.0 * f64::from(i);
                        (a.cos() * r, a.sin() * r)
                    })
                    .collect();
                polygon(&pts);
            }
        }
        path
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TextureOrigin {
    Photo(PathBuf),
    /// Procedural shape standing in for a photo that failed to load.
    Fallback { requested: PathBuf },
    Procedural,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteTexture {
    pub image: TextureImage,
    pub origin: TextureOrigin,
}

impl SpriteTexture {
    pub fn is_photo(&self) -> bool {
        matches!(self.origin, TextureOrigin::Photo(_))
    }
}

/// Draw `shape` filled with `color` plus a soft halo, as premultiplied RGBA8.
pub fn fallback_texture(shape: FallbackShape, color: Rgb) -> TextureImage {
    let size = FALLBACK_SIZE;
    let center = Point::new(f64::from(size) / 2.0, f64::from(size) / 2.0);
    let path = bezpath_to_cpu(&shape.path(center));
    let [r, g, b, _] = color.to_rgba8(1.0);

    let mut ctx = vello_cpu::RenderContext::new(size, size);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, 255));

    // Halo: the same outline scaled up about the center at low opacity.
    let halo = vello_cpu::kurbo::Affine::translate((center.x, center.y))
        * vello_cpu::kurbo::Affine::scale(1.3)
        * vello_cpu::kurbo::Affine::translate((-center.x, -center.y));
    ctx.set_transform(halo);
    ctx.push_opacity_layer(0.35);
    ctx.fill_path(&path);
    ctx.pop_layer();

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.fill_path(&path);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(size, size);
    ctx.render_to_pixmap(&mut pixmap);
    TextureImage {
        width: u32::from(size),
        height: u32::from(size),
        rgba8_premul: Arc::new(pixmap.data_as_u8_slice().to_vec()),
    }
}

/// One texture per shape, colored by index.
pub fn default_shape_textures() -> Vec<SpriteTexture> {
    FallbackShape::ALL
        .iter()
        .enumerate()
        .map(|(i, &shape)| SpriteTexture {
            image: fallback_texture(shape, Rgb::from_hex(FALLBACK_COLORS[i % FALLBACK_COLORS.len()])),
            origin: TextureOrigin::Procedural,
        })
        .collect()
}

pub fn photo_fallback(index: usize) -> TextureImage {
    fallback_texture(
        FallbackShape::for_photo(index),
        Rgb::from_hex(FALLBACK_COLORS[index % FALLBACK_COLORS.len()]),
    )
}

fn load_photo(path: &Path, max_side: u32) -> GlyphfallResult<TextureImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| GlyphfallError::asset(format!("read {}: {e}", path.display())))?;
    decode_image(&bytes, max_side)
}

/// Load every photo in parallel. A photo that cannot be read or decoded becomes its
/// procedural fallback; the result always has one entry per name, in order.
#[tracing::instrument(skip(names), fields(count = names.len()))]
pub fn load_photo_textures(root: &Path, names: &[String], max_side: u32) -> Vec<SpriteTexture> {
    let loaded: Vec<SpriteTexture> = names
        .par_iter()
        .enumerate()
        .map(|(i, name)| {
            let path = root.join(name);
            match load_photo(&path, max_side) {
                Ok(image) => SpriteTexture {
                    image,
                    origin: TextureOrigin::Photo(path),
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "photo unavailable, using fallback: {e}");
                    SpriteTexture {
                        image: photo_fallback(i),
                        origin: TextureOrigin::Fallback { requested: path },
                    }
                }
            }
        })
        .collect();

    let photos = loaded.iter().filter(|t| t.is_photo()).count();
    tracing::info!(photos, fallbacks = loaded.len() - photos, "sprite textures ready");
    loaded
}

#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Panorama(TextureImage),
    Fallback { color: Rgb },
}

impl Background {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

pub fn load_background(root: &Path, name: Option<&str>, max_side: u32) -> Background {
    let fallback = Background::Fallback {
        color: Rgb::from_hex(BACKGROUND_FALLBACK_COLOR),
    };
    let Some(name) = name else {
        return fallback;
    };
    let path = root.join(name);
    match load_photo(&path, max_side) {
        Ok(image) => Background::Panorama(image),
        Err(e) => {
            tracing::warn!(path = %path.display(), "background unavailable, using flat color: {e}");
            fallback
        }
    }
}

/// All textures the scene draws: shape textures, then photo slots, plus ring labels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureSet {
    pub sprites: Vec<SpriteTexture>,
    pub shape_count: usize,
    pub ring_labels: Vec<TextureImage>,
}

impl TextureSet {
    pub fn new(
        shapes: Vec<SpriteTexture>,
        photos: Vec<SpriteTexture>,
        ring_labels: Vec<TextureImage>,
    ) -> Self {
        let shape_count = shapes.len();
        let mut sprites = shapes;
        sprites.extend(photos);
        Self {
            sprites,
            shape_count,
            ring_labels,
        }
    }

    /// Everything the scene needs, reading photos from disk.
    pub fn load(config: &AssetConfig, rings: &[RingConfig], labels: &SvgTextRasterizer) -> Self {
        let photos = load_photo_textures(&config.root, &config.photos, config.max_photo_side);
        Self::new(
            default_shape_textures(),
            photos,
            ring_label_textures(rings, &config.ring_label, labels),
        )
    }

    /// Shapes only, with every photo slot on its fallback. Touches no files.
    pub fn procedural(photo_slots: usize) -> Self {
        let photos = (0..photo_slots)
            .map(|i| SpriteTexture {
                image: photo_fallback(i),
                origin: TextureOrigin::Procedural,
            })
            .collect();
        Self::new(default_shape_textures(), photos, Vec::new())
    }

    pub fn get(&self, index: usize) -> Option<&TextureImage> {
        self.sprites.get(index).map(|t| &t.image)
    }

    pub fn layout(&self) -> SpriteTextures {
        SpriteTextures {
            shape_count: self.shape_count,
            photo_loaded: self.sprites[self.shape_count..]
                .iter()
                .map(SpriteTexture::is_photo)
                .collect(),
        }
    }
}

pub fn ring_label_textures(
    rings: &[RingConfig],
    style: &RingLabelStyle,
    rasterizer: &SvgTextRasterizer,
) -> Vec<TextureImage> {
    rings
        .iter()
        .map(|ring| {
            let svg = SvgTextRasterizer::label_svg_document(
                &ring.text,
                style.canvas,
                style.font_size_px,
                &style.font_families,
                &style.color,
            );
            match rasterizer.render_svg(&svg, style.canvas) {
                Ok(rgba) => TextureImage {
                    width: style.canvas.width,
                    height: style.canvas.height,
                    rgba8_premul: Arc::new(rgba),
                },
                Err(e) => {
                    tracing::warn!(text = %ring.text, "ring label failed to render: {e}");
                    TextureImage::transparent(style.canvas.width, style.canvas.height)
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/textures.rs"]
mod tests;
