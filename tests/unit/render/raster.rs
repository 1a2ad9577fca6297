use super::*;

const RED_HALF: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2" viewBox="0 0 4 2">
  <polygon points="0,0 2,0 2,2 0,2" fill="#ff0000" stroke="none" fill-opacity="0.5"/>
</svg>"##;

#[test]
fn rasterizes_at_intrinsic_size() {
    let frame = rasterize_svg(RED_HALF, &RasterOpts::default()).unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert_eq!(frame.data.len(), 4 * 2 * 4);

    let [r, g, b, a] = frame.pixel(0, 0).unwrap();
    assert!(r >= 250, "red channel {r}");
    assert_eq!((g, b), (0, 0));
    assert!((126..=129).contains(&a), "alpha {a}");

    assert_eq!(frame.pixel(3, 1).unwrap(), [0, 0, 0, 0]);
    assert_eq!(frame.pixel(4, 0), None);
}

#[test]
fn invalid_svg_is_a_render_error() {
    let err = rasterize_svg("<not-svg", &RasterOpts::default()).unwrap_err();
    assert!(matches!(err, QuadError::Render(_)));
}

#[test]
fn demultiply_restores_straight_alpha() {
    assert_eq!(demultiply([128, 0, 0, 128]), [255, 0, 0, 128]);
    assert_eq!(demultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(demultiply([40, 50, 60, 255]), [40, 50, 60, 255]);
}

#[test]
fn writes_png_that_decodes_back() {
    let dir = std::env::temp_dir().join(format!("geoquad-raster-{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let frame = rasterize_svg(RED_HALF, &RasterOpts::default()).unwrap();
    frame.write_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 2));
    assert_eq!(decoded.get_pixel(3, 1).0, [0, 0, 0, 0]);
    let _ = std::fs::remove_dir_all(&dir);
}
