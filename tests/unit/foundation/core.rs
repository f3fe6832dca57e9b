use super::*;

#[test]
fn parse_hex_accepts_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::parse_hex("#FFF").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::parse_hex("000000").unwrap(), Rgba8::BLACK);
    assert_eq!(
        Rgba8::parse_hex("#10203080").unwrap(),
        Rgba8::new(0x10, 0x20, 0x30, 0x80)
    );
}

#[test]
fn parse_hex_rejects_garbage() {
    for bad in ["", "#12", "#GGGGGG", "#12345", "#ééé"] {
        let err = Rgba8::parse_hex(bad).unwrap_err();
        assert!(matches!(err, QuickEditError::InvalidParameter(_)), "{bad}");
    }
}

#[test]
fn display_omits_alpha_when_opaque() {
    assert_eq!(Rgba8::opaque(1, 2, 255).to_string(), "#0102FF");
    assert_eq!(Rgba8::new(1, 2, 3, 4).to_string(), "#01020304");
}

#[test]
fn color_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgba8::BLACK).unwrap();
    assert_eq!(json, "\"#000000\"");
    let back: Rgba8 = serde_json::from_str("\"#ff8000\"").unwrap();
    assert_eq!(back, Rgba8::opaque(255, 128, 0));
    assert!(serde_json::from_str::<Rgba8>("\"nope\"").is_err());
}

#[test]
fn source_image_rejects_mismatched_buffers() {
    assert!(matches!(
        SourceImage::new(2, 2, vec![0; 15]),
        Err(QuickEditError::PreconditionViolation(_))
    ));
    assert!(matches!(
        SourceImage::new(0, 2, vec![]),
        Err(QuickEditError::UnsupportedInput(_))
    ));
}

#[test]
fn pixel_lookup_is_row_major() {
    let mut data = vec![0u8; 3 * 2 * 4];
    let idx = (2 + 3) * 4;
    data[idx..idx + 4].copy_from_slice(&[9, 8, 7, 6]);
    let src = SourceImage::new(3, 2, data).unwrap();
    assert_eq!(src.pixel(2, 1), Some(Rgba8::new(9, 8, 7, 6)));
    assert_eq!(src.pixel(3, 0), None);
}

#[test]
fn canvas_filled_repeats_color() {
    let c = Canvas::filled(4, 3, Rgba8::opaque(5, 6, 7)).unwrap();
    assert_eq!(c.data.len(), 48);
    assert!(c.data.chunks_exact(4).all(|px| px == [5, 6, 7, 255]));
}

#[test]
fn from_array_matches_to_array() {
    let c = Rgba8::from_array([1, 2, 3, 4]);
    assert_eq!(c, Rgba8::new(1, 2, 3, 4));
    assert_eq!(c.to_array(), [1, 2, 3, 4]);
}

#[test]
fn canvas_pixel_with_short_buffer_is_none() {
    let canvas = Canvas {
        width: 2,
        height: 2,
        data: vec![0; 10],
    };
    assert_eq!(canvas.pixel(0, 0), Some(Rgba8::new(0, 0, 0, 0)));
    assert_eq!(canvas.pixel(1, 1), None);
}
