use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("glyphfall-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn fallback_textures_are_deterministic_per_index() {
    let a = photo_fallback(6);
    let b = photo_fallback(6);
    assert_eq!(a, b);
    assert_eq!((a.width, a.height), (64, 64));
    assert_ne!(photo_fallback(6), photo_fallback(7));
}

#[test]
fn photo_fallbacks_cycle_four_shapes() {
    assert_eq!(FallbackShape::for_photo(0), FallbackShape::Square);
    assert_eq!(FallbackShape::for_photo(3), FallbackShape::Hexagon);
    assert_eq!(FallbackShape::for_photo(4), FallbackShape::Square);
}

#[test]
fn fallback_shape_covers_its_center() {
    let tex = fallback_texture(FallbackShape::Diamond, Rgb::from_hex(0xff69b4));
    let center = ((32 * 64 + 32) * 4) as usize;
    assert!(tex.rgba8_premul[center + 3] > 200);
    assert_eq!(tex.rgba8_premul[3], 0, "corner stays clear");
}

#[test]
fn missing_photos_fall_back_without_error() {
    let dir = scratch_dir("missing");
    let names = vec!["nope-a.jpg".to_string(), "nope-b.jpg".to_string()];
    let loaded = load_photo_textures(&dir, &names, 64);
    assert_eq!(loaded.len(), 2);
    for (i, t) in loaded.iter().enumerate() {
        assert!(!t.is_photo());
        assert_eq!(t.image, photo_fallback(i));
    }
}

#[test]
fn present_photo_is_decoded_in_order() {
    let dir = scratch_dir("present");
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 200, 30, 255]));
    img.save(dir.join("ok.png")).unwrap();
    std::fs::write(dir.join("broken.jpg"), b"garbage").unwrap();

    let names = vec!["broken.jpg".to_string(), "ok.png".to_string()];
    let loaded = load_photo_textures(&dir, &names, 64);
    assert!(!loaded[0].is_photo());
    assert!(loaded[1].is_photo());
    assert_eq!((loaded[1].image.width, loaded[1].image.height), (8, 4));
}

#[test]
fn background_falls_back_to_flat_color() {
    let dir = scratch_dir("bg");
    let bg = load_background(&dir, Some("thienha.png"), 512);
    assert_eq!(
        bg,
        Background::Fallback {
            color: Rgb::from_hex(0x0a0a2e)
        }
    );
    assert!(load_background(&dir, None, 512).is_fallback());
}

#[test]
fn procedural_set_lays_out_shapes_then_photos() {
    let set = TextureSet::procedural(3);
    assert_eq!(set.sprites.len(), 8);
    let layout = set.layout();
    assert_eq!(layout.shape_count, 5);
    assert_eq!(layout.photo_loaded, vec![false; 3]);
    assert_eq!(set.get(5), Some(&photo_fallback(0)));
    assert!(set.get(8).is_none());
}

#[test]
fn default_assets_name_twenty_photos() {
    let cfg = AssetConfig::default();
    assert_eq!(cfg.photos.len(), 20);
    assert_eq!(cfg.root, PathBuf::from("images"));
}
