use super::*;

#[test]
fn rgb_scales_to_display_bytes() {
    assert_eq!(Rgb::new(1.0, 0.0, 0.0).to_rgb8(), Rgb8 { r: 255, g: 0, b: 0 });
    assert_eq!(Rgb::new(0.5, 0.25, 1.0).to_rgb8(), Rgb8 { r: 127, g: 63, b: 255 });
}

#[test]
fn rgb_truncates_fractional_channels() {
    assert_eq!(
        Rgb::new(0.5, 0.2, 0.999).to_rgb8(),
        Rgb8 { r: 127, g: 51, b: 254 }
    );
}

#[test]
fn rgb_clamps_out_of_range_and_non_finite() {
    let c = Rgb::new(-0.5, 2.0, f64::NAN).to_rgb8();
    assert_eq!(c, Rgb8 { r: 0, g: 255, b: 0 });
}

#[test]
fn rgb8_formats_as_hex() {
    assert_eq!(Rgb8 { r: 255, g: 0, b: 16 }.to_string(), "#ff0010");
}

#[test]
fn geo_coord_z_defaults_to_zero() {
    let c: GeoCoord = serde_json::from_str(r#"{"x": 1.5, "y": -2}"#).unwrap();
    assert_eq!(c, GeoCoord::xy(1.5, -2.0));
    assert!(c.is_finite());
    assert!(!GeoCoord::xy(f64::INFINITY, 0.0).is_finite());
}
