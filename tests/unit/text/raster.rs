use super::*;

#[test]
fn alpha_grid_checks_length() {
    assert!(AlphaGrid::new(4, 4, vec![0; 15]).is_err());
    assert!(AlphaGrid::new(0, 4, vec![]).is_err());
    let g = AlphaGrid::new(4, 2, (0..8).collect()).unwrap();
    assert_eq!(g.get(3, 0), 3);
    assert_eq!(g.get(0, 1), 4);
    assert_eq!(g.covered(5), 2);
}

#[test]
fn from_fn_is_row_major() {
    let g = AlphaGrid::from_fn(3, 2, |x, y| (y * 10 + x) as u8).unwrap();
    assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
}

#[test]
fn from_rgba8_keeps_alpha_channel() {
    let rgba = [9, 9, 9, 200, 1, 2, 3, 0];
    let g = AlphaGrid::from_rgba8(2, 1, &rgba).unwrap();
    assert_eq!(g.as_slice(), &[200, 0]);
    assert!(AlphaGrid::from_rgba8(2, 2, &rgba).is_err());
}

#[test]
fn default_style_is_valid() {
    TextStyle::default().validate().unwrap();
}

#[test]
fn style_rejects_bad_colors_and_sizes() {
    let mut s = TextStyle::default();
    s.gradient[0].color = "pink".to_string();
    assert!(s.validate().is_err());

    let mut s = TextStyle::default();
    s.font_size_px = 0.0;
    assert!(s.validate().is_err());

    let mut s = TextStyle::default();
    s.font_size_px = 4.0;
    assert!(s.validate().is_err(), "highlight would shrink below zero");

    let mut s = TextStyle::default();
    s.backdrop_opacity = 1.5;
    assert!(s.validate().is_err());
}

#[test]
fn svg_document_escapes_and_layers_passes() {
    let canvas = Canvas::new(1000, 400).unwrap();
    let doc = SvgTextRasterizer::svg_document("<3 & \"you\"", canvas, &TextStyle::default());
    assert!(doc.contains("&lt;3 &amp; &quot;you&quot;"));
    assert!(!doc.contains("<3 &"));
    assert!(doc.contains(r#"x="500" y="200""#));
    assert!(doc.contains("'Arial Black', sans-serif"));
    // main fill + two strokes + re-fill + highlight
    assert_eq!(doc.matches("<text ").count(), 5);
    assert_eq!(doc.matches("stroke-width=").count(), 2);
    assert!(doc.contains("feDropShadow"));
    assert!(!doc.contains("<rect"));
}

#[test]
fn rasterizer_is_deterministic_and_sized_to_canvas() {
    let r = SvgTextRasterizer::default();
    let canvas = Canvas::new(200, 80).unwrap();
    let mut style = TextStyle::default();
    style.font_size_px = 60.0;
    let a = r.rasterize("A", canvas, &style).unwrap();
    let b = r.rasterize("A", canvas, &style).unwrap();
    assert_eq!(a, b);
    assert_eq!((a.width(), a.height()), (200, 80));
}

#[test]
fn backdrop_makes_every_pixel_sample_as_text() {
    let r = SvgTextRasterizer::default();
    let canvas = Canvas::new(40, 20).unwrap();
    let style = TextStyle {
        backdrop_opacity: 0.8,
        glow: None,
        ..TextStyle::default()
    };
    let g = r.rasterize("", canvas, &style).unwrap();
    assert_eq!(g.covered(128), canvas.pixel_count());
}

#[test]
fn label_document_escapes_and_centers() {
    let svg = SvgTextRasterizer::label_svg_document(
        "I <3 You",
        Canvas::new(512, 128).unwrap(),
        40.0,
        &["Arial".to_string(), "sans-serif".to_string()],
        "#ffd6ea",
    );
    assert!(svg.contains("I &lt;3 You"));
    assert!(svg.contains(r#"x="256" y="64""#));
    assert!(svg.contains("font-family=\"'Arial', sans-serif\""));
}
