use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(1000, 400).unwrap();
    assert_eq!(c.pixel_count(), 400_000);
    assert!((c.aspect() - 2.5).abs() < 1e-6);
}

#[test]
fn rgb_hex_round_trips_through_svg_form() {
    let pink = Rgb::from_hex(0xff69b4);
    assert_eq!(pink.to_hex_string(), "#ff69b4");
    assert_eq!(pink.to_rgba8(0.5), [255, 105, 180, 128]);
}

#[test]
fn rgb_channels_are_clamped() {
    let c = Rgb::new(1.4, -0.2, 0.5);
    assert_eq!(c.to_rgba8(2.0), [255, 0, 128, 255]);
}
