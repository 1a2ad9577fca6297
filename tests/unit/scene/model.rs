use super::*;
use crate::foundation::core::GeoCoord;

const SCENE: &str = r#"{
  "view": { "center": { "x": 0, "y": 0 }, "zoom": 1, "width": 320, "height": 200 },
  "background": { "r": 1, "g": 1, "b": 1 },
  "features": [
    {
      "kind": "quad",
      "id": "zones",
      "style": { "color": { "r": 0, "g": 0, "b": 1 }, "opacity": 0.25 },
      "data": [
        { "ul": { "x": -10, "y": 10 }, "lr": { "x": 10, "y": -10 } },
        { "ul": { "x": 20, "y": 10 }, "lr": { "x": 30, "y": 0 }, "image": "tiles/a.png" }
      ]
    },
    { "kind": "quad" }
  ]
}"#;

#[test]
fn parses_scene_with_flattened_feature_args() {
    let scene = MapScene::from_json(SCENE).unwrap();
    assert_eq!(scene.renderer, "svg");
    assert_eq!(scene.view.center, GeoCoord::xy(0.0, 0.0));
    assert_eq!((scene.view.width, scene.view.height), (320, 200));
    assert_eq!(scene.background, Some(Rgb::WHITE));
    assert_eq!(scene.features.len(), 2);

    let zones = &scene.features[0];
    assert_eq!(zones.kind, "quad");
    assert_eq!(zones.args.id.as_deref(), Some("zones"));
    assert_eq!(zones.args.style.opacity, 0.25);
    assert_eq!(zones.args.data.len(), 2);
    assert_eq!(zones.args.data[1].image.as_deref(), Some("tiles/a.png"));

    let anon = &scene.features[1];
    assert_eq!(anon.args.id, None);
    assert!(anon.args.data.is_empty());

    scene.validate().unwrap();
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = MapScene::from_json("{ \"view\": 3 }").unwrap_err();
    assert!(matches!(err, QuadError::Validation(_)));
    assert!(err.to_string().contains("parse scene JSON"));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = MapScene::from_path("/definitely/not/here/scene.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here/scene.json"));
}

#[test]
fn validate_rejects_bad_view_kind_and_duplicate_ids() {
    let mut scene = MapScene::from_json(SCENE).unwrap();
    scene.view.width = 0;
    assert!(scene.validate().is_err());

    let mut scene = MapScene::from_json(SCENE).unwrap();
    scene.features[1].kind = " ".to_string();
    assert!(scene.validate().is_err());

    let mut scene = MapScene::from_json(SCENE).unwrap();
    scene.features[1].args.id = Some("zones".to_string());
    let err = scene.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate feature id 'zones'"));

    let mut scene = MapScene::from_json(SCENE).unwrap();
    scene.features[0].args.style.opacity = f64::NAN;
    assert!(err_is_validation(scene.validate()));
}

fn err_is_validation(r: QuadResult<()>) -> bool {
    matches!(r, Err(QuadError::Validation(_)))
}
