use super::*;

#[test]
fn defaults_match_editor_state() {
    let p = RenderParameters::default();
    assert_eq!(p.border_size_percent, 0.0);
    assert_eq!(p.border_color, Rgba8::WHITE);
    assert_eq!(p.aspect_ratio, AspectRatio::Original);
    assert_eq!(p.export_quality, 92);
    assert_eq!(p.sharpen_strength, 0.0);
    assert_eq!((p.brightness, p.contrast, p.saturate), (100.0, 100.0, 100.0));
    assert_eq!((p.grayscale, p.sepia), (0.0, 0.0));
    assert_eq!(p.output_width, None);
    p.validate().unwrap();
}

#[test]
fn aspect_ratio_parses_closed_forms() {
    assert_eq!(AspectRatio::parse("original").unwrap(), AspectRatio::Original);
    assert_eq!(AspectRatio::parse(" Original ").unwrap(), AspectRatio::Original);
    assert_eq!(
        AspectRatio::parse("16/9").unwrap(),
        AspectRatio::ratio(16.0, 9.0)
    );
    assert_eq!(AspectRatio::parse("4:5").unwrap(), AspectRatio::ratio(4.0, 5.0));
    assert_eq!(AspectRatio::parse("1.5").unwrap(), AspectRatio::ratio(1.5, 1.0));
}

#[test]
fn aspect_ratio_rejects_expressions_and_bad_units() {
    for bad in ["", "16/0", "-1/2", "0", "NaN", "inf/1", "1+1", "alert(1)", "1e308/1e-308"] {
        let err = AspectRatio::parse(bad).unwrap_err();
        assert!(matches!(err, QuickEditError::InvalidParameter(_)), "{bad}");
    }
}

#[test]
fn resolve_rejects_non_finite_ratio() {
    let r = AspectRatio::ratio(1.0, 0.0);
    assert!(matches!(
        r.resolve(10, 10),
        Err(QuickEditError::InvalidParameter(_))
    ));
    assert_eq!(AspectRatio::Original.resolve(400, 300).unwrap(), 400.0 / 300.0);
}

#[test]
fn presets_are_valid() {
    for (_, r) in ASPECT_RATIO_PRESETS {
        r.resolve(3, 2).unwrap();
    }
    for (_, s) in SHARPEN_PRESETS {
        assert!((0.0..=1.0).contains(&s));
    }
    assert_eq!(BORDER_COLOR_PRESETS[0].1, Rgba8::WHITE);
}

#[test]
fn apply_writes_one_field_and_keeps_state_on_error() {
    let mut p = RenderParameters::default();
    p.apply(&ParamUpdate::BorderSize(12.5)).unwrap();
    assert_eq!(p.border_size_percent, 12.5);

    let before = p.clone();
    let err = p.apply(&ParamUpdate::BorderSize(150.0)).unwrap_err();
    assert!(matches!(err, QuickEditError::InvalidParameter(_)));
    assert_eq!(p, before);

    assert!(p.apply(&ParamUpdate::ExportQuality(0)).is_err());
    assert!(p.apply(&ParamUpdate::OutputWidth(Some(0))).is_err());
    assert!(p.apply(&ParamUpdate::Sharpen(f64::NAN)).is_err());
    assert!(
        p.apply(&ParamUpdate::AspectRatio(AspectRatio::ratio(0.0, 1.0)))
            .is_err()
    );
    assert_eq!(p, before);
}

#[test]
fn reset_restores_every_field() {
    let mut p = RenderParameters {
        border_size_percent: 40.0,
        border_color: Rgba8::BLACK,
        aspect_ratio: AspectRatio::ratio(9.0, 16.0),
        export_quality: 10,
        sharpen_strength: 1.0,
        brightness: 150.0,
        contrast: 20.0,
        saturate: 0.0,
        grayscale: 100.0,
        sepia: 50.0,
        output_width: Some(640),
    };
    p.reset();
    assert_eq!(p, RenderParameters::default());
}

#[test]
fn sanitized_clamps_into_domains() {
    let p = RenderParameters {
        border_size_percent: 250.0,
        sharpen_strength: -1.0,
        brightness: f64::INFINITY,
        grayscale: 180.0,
        output_width: Some(0),
        ..RenderParameters::default()
    }
    .sanitized();
    assert_eq!(p.border_size_percent, 100.0);
    assert_eq!(p.sharpen_strength, 0.0);
    assert_eq!(p.brightness, 100.0);
    assert_eq!(p.grayscale, 100.0);
    assert_eq!(p.output_width, None);
    p.validate().unwrap();
}

#[test]
fn labels_cover_range_controls_only() {
    assert_eq!(ParamUpdate::Brightness(120.0).label().as_deref(), Some("120%"));
    assert_eq!(ParamUpdate::ExportQuality(92).label().as_deref(), Some("92%"));
    assert_eq!(ParamUpdate::Sharpen(0.3).label(), None);
    assert!(!ParamUpdate::OutputWidth(Some(10)).affects_canvas());
    assert!(ParamUpdate::Sepia(10.0).affects_canvas());
}

#[test]
fn json_uses_editor_keys_and_defaults_missing_fields() {
    let p: RenderParameters = serde_json::from_value(serde_json::json!({
        "borderSize": 10,
        "borderColor": "#000000",
        "aspectRatio": "1/1",
        "sharpen": 0.5
    }))
    .unwrap();
    assert_eq!(p.border_size_percent, 10.0);
    assert_eq!(p.border_color, Rgba8::BLACK);
    assert_eq!(p.aspect_ratio, AspectRatio::ratio(1.0, 1.0));
    assert_eq!(p.sharpen_strength, 0.5);
    assert_eq!(p.export_quality, 92);

    let v = serde_json::to_value(RenderParameters::default()).unwrap();
    assert_eq!(v["aspectRatio"], "original");
    assert_eq!(v["quality"], 92);
    assert_eq!(v["outputWidth"], serde_json::Value::Null);

    assert!(
        serde_json::from_value::<RenderParameters>(serde_json::json!({ "aspectRatio": "2*8" }))
            .is_err()
    );
}
