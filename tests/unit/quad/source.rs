use super::*;
use crate::quad::model::ImageResource;

#[test]
fn rect_shorthand_fills_missing_corners_in_quad_order() {
    let d = QuadDatum::rect(GeoCoord::xy(-10.0, 20.0), GeoCoord::xy(30.0, -5.0));
    let pos = datum_corners(&d).unwrap().to_pos();
    assert_eq!(
        pos,
        [
            GeoCoord::xy(-10.0, -5.0),
            GeoCoord::xy(30.0, -5.0),
            GeoCoord::xy(-10.0, 20.0),
            GeoCoord::xy(30.0, 20.0),
        ]
    );
}

#[test]
fn explicit_corners_win_over_rect_defaults() {
    let d = QuadDatum::corners(
        GeoCoord::xy(0.0, 0.0),
        GeoCoord::xy(2.0, 0.5),
        GeoCoord::xy(0.5, 2.0),
        GeoCoord::xy(3.0, 3.0),
    );
    let c = datum_corners(&d).unwrap();
    assert_eq!(c.ll, GeoCoord::xy(0.0, 0.0));
    assert_eq!(c.ur, GeoCoord::xy(3.0, 3.0));
}

#[test]
fn datums_without_ul_or_lr_are_skipped() {
    let src = DatumQuadSource::new(vec![
        QuadDatum {
            ul: Some(GeoCoord::xy(0.0, 1.0)),
            ..QuadDatum::default()
        },
        QuadDatum::rect(GeoCoord::xy(0.0, 1.0), GeoCoord::xy(1.0, 0.0)),
    ]);
    let quads = src.generate_quads().unwrap();
    assert_eq!(quads.len(), 1);
    assert_eq!(quads.color_quads[0].idx, 1);
}

#[test]
fn data_splits_into_color_and_image_quads() {
    let mut images = ImageStore::new();
    images.insert("a.png", ImageResource::new("a.png"));
    let src = DatumQuadSource::new(vec![
        QuadDatum::rect(GeoCoord::xy(0.0, 1.0), GeoCoord::xy(1.0, 0.0)).with_image("a.png"),
        QuadDatum::rect(GeoCoord::xy(0.0, 1.0), GeoCoord::xy(1.0, 0.0))
            .with_color(Rgb::new(1.0, 0.0, 0.0))
            .with_opacity(0.5),
        QuadDatum::rect(GeoCoord::xy(0.0, 1.0), GeoCoord::xy(1.0, 0.0)).with_image("b.png"),
    ])
    .with_images(images);

    let quads = src.generate_quads().unwrap();
    assert_eq!(quads.color_quads.len(), 1);
    assert_eq!(quads.color_quads[0].idx, 1);
    assert_eq!(quads.color_quads[0].color, Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(quads.color_quads[0].opacity, 0.5);

    assert_eq!(quads.image_quads.len(), 2);
    assert_eq!(quads.image_quads[0].idx, 0);
    assert!(quads.image_quads[0].image.is_some());
    assert_eq!(quads.image_quads[1].idx, 2);
    assert!(quads.image_quads[1].image.is_none());
}

#[test]
fn style_supplies_defaults_and_opacity_is_clamped() {
    let src = DatumQuadSource::new(vec![
        QuadDatum::rect(GeoCoord::xy(0.0, 1.0), GeoCoord::xy(1.0, 0.0)),
        QuadDatum::rect(GeoCoord::xy(0.0, 1.0), GeoCoord::xy(1.0, 0.0)).with_opacity(3.0),
    ])
    .with_style(QuadStyle {
        color: Rgb::new(0.0, 0.0, 1.0),
        opacity: 0.25,
    });

    let quads = src.generate_quads().unwrap();
    assert_eq!(quads.color_quads[0].color, Rgb::new(0.0, 0.0, 1.0));
    assert_eq!(quads.color_quads[0].opacity, 0.25);
    assert_eq!(quads.color_quads[1].opacity, 1.0);
}

#[test]
fn cleared_position_reports_no_geometry() {
    let mut src = DatumQuadSource::new(vec![QuadDatum::rect(
        GeoCoord::xy(0.0, 1.0),
        GeoCoord::xy(1.0, 0.0),
    )]);
    assert!(src.has_position());
    src.set_position(None);
    assert!(!src.has_position());
    assert!(src.generate_quads().unwrap().is_empty());
}

#[test]
fn datum_json_uses_optional_fields() {
    let d: QuadDatum = serde_json::from_str(
        r#"{"ul": {"x": 0, "y": 1}, "lr": {"x": 1, "y": 0}, "image": "t.png"}"#,
    )
    .unwrap();
    assert_eq!(d.image.as_deref(), Some("t.png"));
    assert!(d.color.is_none());

    let style: QuadStyle = serde_json::from_str("{}").unwrap();
    assert_eq!(style, QuadStyle::default());
}
