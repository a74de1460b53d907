use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutBack,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL.into_iter().filter(|e| e.is_monotonic()) {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
        assert!(c <= 1.0);
    }
}

#[test]
fn out_back_overshoots_then_settles() {
    let peak = (1..100)
        .map(|i| Ease::OutBack.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05, "peak {peak}");
    assert!(peak < 1.2, "peak {peak}");

    let near_end = Ease::OutBack.apply(0.99);
    assert!(near_end > 1.0);
    assert!(near_end - 1.0 < 0.01);
}

#[test]
fn out_cubic_matches_closed_form() {
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        let expected = 1.0 - (1.0 - t).powi(3);
        assert!((Ease::OutCubic.apply(t) - expected).abs() < 1e-12);
    }
}
