use super::*;

#[test]
fn two_clicks_inside_window_resolve_to_one_double_click() {
    let mut d = ClickDebouncer::new(0.3);
    d.click(1.0);
    d.click(1.2);
    assert_eq!(d.poll(1.45), None, "window restarts on each click");
    assert!(d.poll_double(1.5));
    assert_eq!(d.poll(2.0), None, "resolved only once");
}

#[test]
fn three_clicks_resolve_to_nothing() {
    let mut d = ClickDebouncer::new(0.3);
    for t in [0.0, 0.1, 0.2] {
        d.click(t);
    }
    assert!(!d.poll_double(0.6));
    assert_eq!(d.pending(), 0);
}

#[test]
fn slow_clicks_are_two_singles() {
    let mut d = ClickDebouncer::new(0.3);
    d.click(0.0);
    assert_eq!(d.poll(0.31), Some(1));
    d.click(0.5);
    assert_eq!(d.poll(0.81), Some(1));
}

#[test]
fn drag_rotates_by_pixel_delta() {
    let mut drag = DragRotate::default();
    let mut rot = SceneRotation::default();
    assert!(!drag.drag_to(10.0, 10.0, 0.005, &mut rot));

    drag.begin(100.0, 100.0);
    assert!(drag.drag_to(140.0, 90.0, 0.005, &mut rot));
    assert!((rot.yaw - 0.2).abs() < 1e-6);
    assert!((rot.pitch + 0.05).abs() < 1e-6);

    drag.end();
    assert!(!drag.is_dragging());
    assert!(!drag.drag_to(500.0, 500.0, 0.005, &mut rot));
    assert!((rot.yaw - 0.2).abs() < 1e-6);
}

#[test]
fn auto_zoom_key_is_case_insensitive() {
    let cfg = InputConfig::default();
    assert!(cfg.is_auto_zoom_key('z'));
    assert!(cfg.is_auto_zoom_key('Z'));
    assert!(!cfg.is_auto_zoom_key('x'));
}
