use std::sync::Arc;

use super::*;
use crate::{
    assets::textures::TextureSet,
    config::SceneConfig,
    foundation::core::Canvas,
    render::write_png,
    scene::starfield::StarfieldConfig,
    text::raster::{AlphaGrid, MessageRasterizer, TextStyle},
};

struct FullRasterizer;

impl MessageRasterizer for FullRasterizer {
    fn rasterize(
        &self,
        _message: &str,
        canvas: Canvas,
        _style: &TextStyle,
    ) -> GlyphfallResult<AlphaGrid> {
        AlphaGrid::from_fn(canvas.width, canvas.height, |_, _| 255)
    }
}

fn bare_config() -> SceneConfig {
    let mut cfg = SceneConfig {
        viewport: Canvas::new(64, 48).unwrap(),
        starfield: StarfieldConfig {
            star_count: 0,
            square_star_count: 0,
            close_sprite_count: 0,
            photo_sprite_count: 0,
            background_star_count: 0,
            ..StarfieldConfig::default()
        },
        rings: Vec::new(),
        ..SceneConfig::default()
    };
    cfg.formation.canvas = Canvas::new(40, 20).unwrap();
    cfg.formation.sampling.stride = 4;
    cfg.formation.stages.truncate(1);
    cfg
}

fn scene(background: Background) -> Scene {
    Scene::with_parts(
        bare_config(),
        TextureSet::procedural(2),
        background,
        Box::new(FullRasterizer),
    )
    .unwrap()
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn fallback_background_and_planet() {
    let s = scene(Background::Fallback {
        color: Rgb::from_hex(0x0a0a2e),
    });
    let mut r = PreviewRenderer::new(&s, Default::default()).unwrap();
    let frame = r.render(&s).unwrap();
    assert_eq!((frame.width, frame.height), (64, 48));
    assert_eq!(frame.data.len(), 64 * 48 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([10, 10, 46, 255]));
    let center = frame.pixel(32, 24).unwrap();
    assert!(close(center, [255, 22, 148, 255]), "{center:?}");
    assert_eq!(frame.pixel(64, 0), None);
}

#[test]
fn panorama_covers_the_viewport() {
    let red = TextureImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new([255, 0, 0, 255].repeat(4)),
    };
    let s = scene(Background::Panorama(red));
    let mut r = PreviewRenderer::new(&s, Default::default()).unwrap();
    let frame = r.render(&s).unwrap();
    for (x, y) in [(0, 0), (63, 0), (0, 47), (63, 47)] {
        let px = frame.pixel(x, y).unwrap();
        assert!(close(px, [255, 0, 0, 255]), "({x}, {y}) = {px:?}");
    }
}

#[test]
fn formed_text_changes_the_frame() {
    let mut s = scene(Background::Fallback { color: Rgb::WHITE });
    let mut r = PreviewRenderer::new(&s, Default::default()).unwrap();
    let before = r.render(&s).unwrap();

    s.trigger_formation(0.0).unwrap();
    s.tick(0.0).unwrap();
    s.tick(3.0).unwrap();
    assert!(!s.formation_particles().is_empty());
    let after = r.render(&s).unwrap();
    assert_ne!(before.data, after.data);
}

#[test]
fn render_is_deterministic() {
    let s = scene(Background::Fallback {
        color: Rgb::from_hex(0x0a0a2e),
    });
    let mut r = PreviewRenderer::new(&s, Default::default()).unwrap();
    assert_eq!(r.render(&s).unwrap().data, r.render(&s).unwrap().data);
}

#[test]
fn png_is_written_with_straight_alpha() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    };
    let dir = std::env::temp_dir().join(format!("glyphfall-png-{}", std::process::id()));
    let path = dir.join("nested").join("f.png");
    write_png(&frame, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
}
