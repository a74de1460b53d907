use super::*;

fn textures() -> SpriteTextures {
    SpriteTextures {
        shape_count: 5,
        photo_loaded: vec![true, false, true, true],
    }
}

fn small_config() -> StarfieldConfig {
    StarfieldConfig {
        star_count: 100,
        square_star_count: 25,
        close_sprite_count: 10,
        photo_sprite_count: 12,
        ..StarfieldConfig::default()
    }
}

#[test]
fn generation_is_seeded() {
    let a = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(9));
    let b = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(9));
    assert_eq!(a.points, b.points);
    assert_eq!(a.sprites, b.sprites);

    let c = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(10));
    assert_ne!(a.points, c.points);
}

#[test]
fn layer_counts_follow_config() {
    let f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(1));
    assert_eq!(f.points.len(), 100);
    assert_eq!(f.square_points.len(), 25);
    assert_eq!(f.sprites.len(), 22);
    assert!(f.background.is_empty());
}

#[test]
fn every_photo_slot_is_used_before_repeats() {
    let f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(4));
    let photo_sprites = &f.sprites[10..];
    let mut first: Vec<usize> = photo_sprites[..4].iter().map(|s| s.texture).collect();
    first.sort_unstable();
    assert_eq!(first, vec![5, 6, 7, 8]);

    for s in photo_sprites {
        let slot = s.texture - 5;
        assert_eq!(s.is_photo, textures().photo_loaded[slot]);
    }
}

#[test]
fn close_sprites_use_shape_textures() {
    let f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(4));
    for (i, s) in f.sprites[..10].iter().enumerate() {
        assert_eq!(s.texture, i % 5);
        assert!(!s.is_photo);
        let r = s.position.length();
        assert!((15.0..=35.0).contains(&r), "radius {r}");
    }
}

#[test]
fn background_shell_is_far_away() {
    let mut f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(2));
    f.add_background_stars(50);
    assert_eq!(f.background.len(), 50);
    for s in &f.background {
        let r = s.position.length();
        assert!((699.0..=901.0).contains(&r), "radius {r}");
        assert_eq!(s.opacity, 0.6);
    }
}

#[test]
fn update_rotates_with_wall_clock() {
    let mut f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(2));
    f.update(1.0, 0.5);
    f.update(1.5, 0.5);
    assert!((f.yaw - 0.018).abs() < 1e-6);

    let p0 = f.points[0].position;
    let w0 = f.world_position(0).unwrap();
    assert!((p0.length() - w0.length()).abs() < 1e-3);
    assert!(f.world_position(10_000).is_none());
}

#[test]
fn zero_dt_never_flashes() {
    assert_eq!(frame_chance(0.5, 0.0), 0.0);
    assert!((frame_chance(0.002, 1.0) - 0.002).abs() < 1e-6);
    assert!(frame_chance(0.002, 2.0) > frame_chance(0.002, 1.0));
}

#[test]
fn scatter_targets_lie_on_the_shell() {
    let mut f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(3));
    let targets = f.scatter_targets();
    assert_eq!(targets.len(), f.points.len());
    for t in targets {
        let r = t.length();
        assert!((29.9..=230.1).contains(&r));
    }
    assert_eq!(f.redistribution_targets().len(), f.sprites.len());
}

#[test]
fn dimmed_sprite_keeps_its_twinkle() {
    let mut f = Starfield::generate(&small_config(), &textures(), &mut Rng64::new(3));
    let s = &mut f.sprites[0];
    s.opacity = 0.8;
    s.fade = 0.3;
    assert!((s.effective_opacity() - 0.24).abs() < 1e-6);
}
