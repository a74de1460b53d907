use super::*;

/// 10x10 filled square at (4..14, 2..12) on a 20x16 canvas, standing in for a glyph.
fn square_glyph() -> AlphaGrid {
    AlphaGrid::from_fn(20, 16, |x, y| {
        if (4..14).contains(&x) && (2..12).contains(&y) {
            255
        } else {
            0
        }
    })
    .unwrap()
}

fn params(stride: u32) -> SamplingParams {
    SamplingParams {
        stride,
        alpha_threshold: 128,
        world_scale: 1.0,
        z: 0.0,
    }
}

#[test]
fn glyph_cells_at_stride_two_are_exact() {
    let pts = sample_targets(&square_glyph(), &params(2)).unwrap();

    let mut expected = Vec::new();
    for y in (2..12).step_by(2) {
        for x in (4..14).step_by(2) {
            expected.push(TargetPoint::new(x as f32 - 10.0, 8.0 - y as f32, 0.0));
        }
    }
    assert_eq!(pts.len(), 25);
    assert_eq!(pts, expected);
}

#[test]
fn stride_one_covers_every_glyph_cell() {
    let pts = sample_targets(&square_glyph(), &params(1)).unwrap();
    assert_eq!(pts.len(), 100);
    assert_eq!(pts[0], TargetPoint::new(-6.0, 6.0, 0.0));
    assert_eq!(pts[99], TargetPoint::new(3.0, -3.0, 0.0));
}

#[test]
fn sampling_is_deterministic() {
    let g = square_glyph();
    let a = sample_targets(&g, &SamplingParams::default()).unwrap();
    let b = sample_targets(&g, &SamplingParams::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn denser_stride_never_yields_fewer_points() {
    let g = AlphaGrid::from_fn(64, 48, |x, y| {
        let dx = x as f32 - 30.0;
        let dy = y as f32 - 22.0;
        if dx * dx + dy * dy < 300.0 { 220 } else { 0 }
    })
    .unwrap();

    let mut last = 0;
    for stride in [16, 8, 4, 2, 1] {
        let n = sample_targets(&g, &params(stride)).unwrap().len();
        assert!(n >= last, "stride {stride}: {n} < {last}");
        last = n;
    }
    assert!(last > 0);
}

#[test]
fn threshold_is_strict() {
    let g = AlphaGrid::from_fn(4, 1, |x, _| [127, 128, 129, 255][x as usize]).unwrap();
    let pts = sample_targets(&g, &params(1)).unwrap();
    assert_eq!(pts.len(), 2);
}

#[test]
fn scale_and_layer_depth_are_applied() {
    let p = SamplingParams {
        stride: 1,
        alpha_threshold: 0,
        world_scale: 0.08,
        z: -0.5,
    };
    let g = AlphaGrid::from_fn(1000, 400, |x, y| u8::from(x == 0 && y == 0)).unwrap();
    let pts = sample_targets(&g, &p).unwrap();
    assert_eq!(pts.len(), 1);
    assert!((pts[0].x - -40.0).abs() < 1e-4);
    assert!((pts[0].y - 16.0).abs() < 1e-4);
    assert_eq!(pts[0].z, -0.5);
}

#[test]
fn zero_stride_is_rejected() {
    assert!(sample_targets(&square_glyph(), &params(0)).is_err());
}

#[test]
fn outline_layer_takes_every_third_and_caps() {
    let targets: Vec<_> = (0..3000)
        .map(|i| TargetPoint::new(i as f32, 0.0, 0.0))
        .collect();
    let mut rng = Rng64::new(1);
    let outline = outline_layer(&targets, OUTLINE_MAX, &mut rng);
    assert_eq!(outline.len(), OUTLINE_MAX);
    for (i, p) in outline.iter().enumerate() {
        assert!((p.x - (i * 3) as f32).abs() <= OUTLINE_JITTER + 1e-3);
        assert!(p.y.abs() <= OUTLINE_JITTER);
        assert_eq!(p.z, OUTLINE_Z_OFFSET);
    }

    let small = outline_layer(&targets[..10], 500, &mut Rng64::new(1));
    assert_eq!(small.len(), 4);
}

#[test]
fn outline_cap_above_the_default_is_honored() {
    let targets: Vec<_> = (0..3000)
        .map(|i| TargetPoint::new(i as f32, 0.0, 0.0))
        .collect();
    let wide = outline_layer(&targets, 800, &mut Rng64::new(1));
    assert_eq!(wide.len(), 800);
    let all = outline_layer(&targets, usize::MAX, &mut Rng64::new(1));
    assert_eq!(all.len(), 1000);
    assert!(outline_layer(&targets, 0, &mut Rng64::new(1)).is_empty());
}
