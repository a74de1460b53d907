use super::*;

fn particle() -> AnimatedParticle {
    AnimatedParticle::new(
        ParticleKind::Point,
        Vec3::new(60.0, -20.0, 10.0),
        Vec3::new(-4.0, 2.0, 0.0),
        5.0,
        Rgb::new(1.0, 0.6, 0.85),
        1.0,
    )
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

#[test]
fn endpoints_match_origin_and_target() {
    let mut p = particle();
    p.advance(0.0, Ease::OutBack);
    assert!(close(p.position, p.origin));
    p.advance(1.0, Ease::OutBack);
    assert!(close(p.position, p.target));
}

#[test]
fn position_follows_eased_progress() {
    for ease in [Ease::OutBack, Ease::OutCubic, Ease::Linear] {
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let mut p = particle();
            p.advance(t, ease);
            let e = ease.apply(t) as f32;
            let expected = p.origin + e * (p.target - p.origin);
            assert!(close(p.position, expected), "{ease:?} at {t}");
        }
    }
}

#[test]
fn progress_is_monotonic() {
    let mut p = particle();
    p.advance(0.6, Ease::Linear);
    p.advance(0.2, Ease::Linear);
    assert_eq!(p.progress(), 0.6);
    p.advance(3.0, Ease::Linear);
    assert_eq!(p.progress(), 1.0);
}

#[test]
fn overshoot_passes_the_target() {
    let mut p = particle();
    p.advance(0.6, Ease::OutBack);
    // Moving towards -x; overshoot carries it beyond the target.
    assert!(p.position.x < p.target.x);
}
