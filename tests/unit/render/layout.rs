use super::*;

#[test]
fn square_ratio_with_border_matches_worked_example() {
    let l = CanvasLayout::compute(400, 300, AspectRatio::ratio(1.0, 1.0), 10.0).unwrap();
    assert_eq!(l.padded_width, 400.0);
    assert_eq!(l.padded_height, 400.0);
    assert_eq!(l.border_px, 40.0);
    assert_eq!((l.width, l.height), (480, 480));
    assert_eq!((l.draw_x, l.draw_y), (40, 90));
}

#[test]
fn wider_target_pillarboxes() {
    let l = CanvasLayout::compute(400, 300, AspectRatio::ratio(16.0, 9.0), 0.0).unwrap();
    assert_eq!(l.padded_height, 300.0);
    assert!((l.padded_width - 533.333).abs() < 1e-3);
    assert_eq!((l.width, l.height), (533, 300));
    assert_eq!((l.draw_x, l.draw_y), (66, 0));
}

#[test]
fn original_ratio_adds_no_padding() {
    let l = CanvasLayout::compute(123, 45, AspectRatio::Original, 0.0).unwrap();
    assert_eq!((l.width, l.height), (123, 45));
    assert_eq!((l.draw_x, l.draw_y), (0, 0));
}

#[test]
fn exact_tie_takes_taller_branch() {
    let l = CanvasLayout::compute(200, 100, AspectRatio::ratio(2.0, 1.0), 0.0).unwrap();
    assert_eq!(l.padded_width, 200.0);
    assert_eq!(l.padded_height, 100.0);
}

#[test]
fn padding_always_contains_source_without_scaling() {
    let sizes = [(1, 1), (400, 300), (300, 400), (1920, 1080), (7, 1013), (640, 640)];
    let ratios = [
        AspectRatio::Original,
        AspectRatio::ratio(1.0, 1.0),
        AspectRatio::ratio(4.0, 5.0),
        AspectRatio::ratio(16.0, 9.0),
        AspectRatio::ratio(9.0, 16.0),
        AspectRatio::ratio(3.0, 2.0),
    ];
    for (w, h) in sizes {
        for r in ratios {
            let l = CanvasLayout::compute(w, h, r, 0.0).unwrap();
            assert!(l.padded_width >= f64::from(w), "{w}x{h} {r}");
            assert!(l.padded_height >= f64::from(h), "{w}x{h} {r}");
            let w_exact = l.padded_width == f64::from(w);
            let h_exact = l.padded_height == f64::from(h);
            assert!(w_exact || h_exact, "{w}x{h} {r}");
            assert!(l.width >= w && l.height >= h);
        }
    }
}

#[test]
fn border_grows_canvas_monotonically() {
    let mut prev = CanvasLayout::compute(400, 300, AspectRatio::ratio(4.0, 5.0), 0.0).unwrap();
    for pct in [5.0, 10.0, 25.0, 50.0, 100.0] {
        let l = CanvasLayout::compute(400, 300, AspectRatio::ratio(4.0, 5.0), pct).unwrap();
        assert!(l.width > prev.width, "{pct}");
        assert!(l.height > prev.height, "{pct}");
        prev = l;
    }
}

#[test]
fn border_is_relative_to_padded_short_side() {
    // 100x50 padded to 1:1 is 100x100; 10% of that is 10px, not 5px.
    let l = CanvasLayout::compute(100, 50, AspectRatio::ratio(1.0, 1.0), 10.0).unwrap();
    assert_eq!((l.width, l.height), (120, 120));
}

#[test]
fn rounding_is_half_up_once() {
    // 3x1 at 1:1 is 3x3; 25% border is 0.75px per side, 4.5 rounds to 5.
    let l = CanvasLayout::compute(3, 1, AspectRatio::ratio(1.0, 1.0), 25.0).unwrap();
    assert_eq!((l.width, l.height), (5, 5));
    assert_eq!((l.draw_x, l.draw_y), (1, 2));
}

#[test]
fn invalid_ratio_is_rejected() {
    let err = CanvasLayout::compute(10, 10, AspectRatio::ratio(-1.0, 2.0), 0.0).unwrap_err();
    assert!(matches!(err, QuickEditError::InvalidParameter(_)));
}

#[test]
fn canvas_area_over_limit_is_rejected() {
    // 32767x1 padded to 1:1 would be a 32767x32767 canvas, about 4.3 GB of RGBA.
    let err = CanvasLayout::compute(32_767, 1, AspectRatio::ratio(1.0, 1.0), 0.0).unwrap_err();
    assert!(matches!(err, QuickEditError::PreconditionViolation(_)));

    let err = CanvasLayout::compute(1000, 1000, AspectRatio::ratio(1000.0, 1.0), 0.0).unwrap_err();
    assert!(matches!(err, QuickEditError::PreconditionViolation(_)));

    let err = CanvasLayout::compute(10, 10, AspectRatio::ratio(1e300, 1.0), 0.0).unwrap_err();
    assert!(matches!(err, QuickEditError::PreconditionViolation(_)));
}

#[test]
fn long_thin_canvas_within_area_limit_is_accepted() {
    let l = CanvasLayout::compute(40, 30, AspectRatio::ratio(5000.0, 1.0), 0.0).unwrap();
    assert_eq!((l.width, l.height), (150_000, 30));
    assert_eq!((l.draw_x, l.draw_y), (74_980, 0));

    // Exactly at the limit is still fine.
    let l = CanvasLayout::compute(16_384, 16_384, AspectRatio::Original, 0.0).unwrap();
    assert_eq!(u64::from(l.width) * u64::from(l.height), MAX_CANVAS_PIXELS);
}
