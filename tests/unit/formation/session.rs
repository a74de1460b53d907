use super::*;

fn targets(n: usize) -> Vec<TargetPoint> {
    (0..n)
        .map(|i| TargetPoint::new(i as f32 * 0.5, (i % 7) as f32, 0.0))
        .collect()
}

fn stars() -> Vec<Vec3> {
    (0..40)
        .map(|i| Vec3::new(100.0 - i as f32, 50.0, -20.0))
        .collect()
}

fn build(n: usize, strategy: AssignStrategy, textures: &[usize]) -> AnimationSession {
    let stars = stars();
    AnimationSession::build(
        SessionId(1),
        "14-02-2022",
        10.0,
        3.0,
        targets(n),
        FormationSources {
            star_positions: &stars,
            sprite_textures: textures,
        },
        &LayerConfig::default(),
        strategy,
        &mut Rng64::new(5),
    )
}

#[test]
fn sequential_assignment_is_identity_and_capped() {
    let origins = vec![Vec3::ZERO; 5];
    assert_eq!(
        assign_targets(&origins, &targets(3), AssignStrategy::Sequential),
        vec![0, 1, 2]
    );
    assert_eq!(
        assign_targets(&origins[..2], &targets(3), AssignStrategy::Sequential),
        vec![0, 1]
    );
}

#[test]
fn nearest_assignment_is_unique_and_deterministic() {
    let origins: Vec<Vec3> = (0..20)
        .map(|i| Vec3::new((19 - i) as f32 * 0.5, 0.0, 3.0))
        .collect();
    let t = targets(25);
    let a = assign_targets(&origins, &t, AssignStrategy::Nearest);
    let b = assign_targets(&origins, &t, AssignStrategy::Nearest);
    assert_eq!(a, b);
    assert_eq!(a.len(), 20);
    let mut sorted = a.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 20);
}

#[test]
fn layer_sizes_follow_targets() {
    let textures: Vec<usize> = (0..10).collect();
    let s = build(30, AssignStrategy::Sequential, &textures);
    assert_eq!(s.points().len(), 30);
    assert_eq!(s.outline().len(), 10);
    assert_eq!(s.sprites().len(), 5, "half the scene sprites");
    assert!(s.particles().iter().all(|p| p.progress() == 0.0));
}

#[test]
fn assigned_particles_never_exceed_targets() {
    let textures: Vec<usize> = (0..1000).collect();
    for n in [0, 1, 4, 60] {
        let s = build(n, AssignStrategy::Nearest, &textures);
        assert!(s.points().len() <= n);
        assert!(s.sprites().len() <= n);
        assert!(s.outline().len() <= n.div_ceil(3));
    }
}

#[test]
fn points_start_from_the_stars() {
    let s = build(50, AssignStrategy::Sequential, &[]);
    let stars = stars();
    for (i, p) in s.points().iter().enumerate() {
        assert_eq!(p.origin, stars[i % stars.len()]);
        assert_eq!(p.target, targets(50)[i].position());
    }
    assert!(s.sprites().is_empty());
}

#[test]
fn sprite_particles_start_on_the_shell() {
    let textures = vec![7; 40];
    let s = build(30, AssignStrategy::Sequential, &textures);
    for p in s.sprites() {
        let r = p.origin.length();
        assert!((59.9..=100.1).contains(&r), "radius {r}");
        assert_eq!(p.kind, ParticleKind::Sprite { texture: 7 });
        assert!((5.0..8.0).contains(&p.base_size));
    }
}

#[test]
fn formation_completes_at_duration() {
    let mut s = build(12, AssignStrategy::Sequential, &[]);
    assert!(!s.advance_formation(11.0));
    assert!(s.advance_formation(13.0));
    for p in s.particles() {
        assert!((p.position - p.target).abs().max_element() < 1e-4);
    }
    // Full glow at the end.
    assert!((s.points()[0].size - 7.5).abs() < 1e-4);
}

#[test]
fn pulse_only_touches_points() {
    let mut s = build(12, AssignStrategy::Sequential, &[]);
    s.advance_formation(13.0);
    let outline_before: Vec<_> = s.outline().iter().map(|p| p.size).collect();
    s.pulse(20.0);
    let outline_after: Vec<_> = s.outline().iter().map(|p| p.size).collect();
    assert_eq!(outline_before, outline_after);
    for p in s.points() {
        assert!(p.size >= 5.0 * 0.85 - 1e-4 && p.size <= 5.0 * 1.15 + 1e-4);
        assert_eq!(p.color.r, 1.0);
    }
}
