use super::*;

#[test]
fn default_rings_match_the_scene() {
    let rings = default_rings();
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].count, 24);
    assert_eq!(rings[1].radius, 18.0);
    assert!(rings[1].speed < 0.0);
}

#[test]
fn labels_sit_on_the_ring() {
    let ring = TextRing::new(default_rings().remove(0), 0);
    let labels: Vec<_> = ring.label_positions().collect();
    assert_eq!(labels.len(), 24);
    for p in &labels {
        assert!((p.length() - 12.0).abs() < 1e-4);
        assert_eq!(p.y, 0.0);
    }
    assert!((labels[0].x - 12.0).abs() < 1e-4);
}

#[test]
fn rings_spin_in_opposite_directions() {
    let mut rings: Vec<_> = default_rings()
        .into_iter()
        .enumerate()
        .map(|(i, c)| TextRing::new(c, i))
        .collect();
    for r in &mut rings {
        r.update(1.0);
    }
    assert!((rings[0].rotation - 0.3).abs() < 1e-6);
    assert!((rings[1].rotation - (TAU - 0.18)).abs() < 1e-5);
}

#[test]
fn planet_glow_pulses_within_bounds() {
    let mut p = Planet::default();
    for i in 0..200 {
        p.update(f64::from(i) * 0.05, 0.05);
        assert!((1.049..=1.151).contains(&p.glow_scale));
        assert!((0.299..=0.501).contains(&p.glow_opacity));
    }
    assert!(p.rotation > 0.0);
}
