use super::*;

#[test]
fn progress_is_time_based_and_clamped() {
    let tw = Tween::new(0.0f64, 10.0, 2.0, 4.0, Ease::Linear);
    assert_eq!(tw.progress(0.0), 0.0);
    assert_eq!(tw.progress(2.0), 0.0);
    assert_eq!(tw.progress(4.0), 0.5);
    assert_eq!(tw.progress(6.0), 1.0);
    assert_eq!(tw.progress(60.0), 1.0);
    assert_eq!(tw.sample(4.0), 5.0);
    assert!(tw.is_finished(6.0));
    assert!(!tw.is_finished(5.9));
}

#[test]
fn irregular_frame_intervals_reach_the_same_value() {
    let tw = Tween::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 25.0), 0.0, 3.0, Ease::OutCubic);
    let a = tw.sample(1.5);
    // Sampling in between must not influence later samples.
    for t in [0.016, 0.2, 0.21, 1.0] {
        let _ = tw.sample(t);
    }
    assert_eq!(tw.sample(1.5), a);
}

#[test]
fn zero_duration_completes_immediately() {
    let tw = Tween::new(1.0f32, 3.0, 5.0, 0.0, Ease::OutBack);
    assert_eq!(tw.sample(5.0), 3.0);
}

#[test]
fn vec3_lerp_is_componentwise() {
    let a = Vec3::new(1.0, -2.0, 4.0);
    let b = Vec3::new(3.0, 2.0, -4.0);
    let m = <Vec3 as Lerp>::lerp(&a, &b, 0.25);
    assert_eq!(m, Vec3::new(1.5, -1.0, 2.0));
}

#[test]
fn rgb_lerp_midpoint() {
    let c = <Rgb as Lerp>::lerp(&Rgb::new(0.0, 0.0, 1.0), &Rgb::new(1.0, 0.5, 0.0), 0.5);
    assert_eq!(c, Rgb::new(0.5, 0.25, 0.5));
}

#[test]
fn superseded_tokens_are_dead() {
    let mut live = Liveness::new();
    let first = live.supersede();
    assert!(live.is_live(first));
    let second = live.supersede();
    assert!(!live.is_live(first));
    assert!(live.is_live(second));
    assert_eq!(live.current(), second);
}
