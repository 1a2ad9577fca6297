use super::*;

fn assert_close(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
}

fn assert_coeffs(t: Affine, want: [f64; 6]) {
    for (got, want) in t.as_coeffs().iter().zip(want) {
        assert!((got - want).abs() < 1e-12, "{:?} != {want:?}", t.as_coeffs());
    }
}

/// Display-space rectangle (ll, lr, ul, ur) with corner `k` pulled toward the center.
fn pulled_rect(k: usize) -> [Point; 4] {
    let mut pos = [
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
    ];
    let c = Point::new(5.0, 5.0);
    pos[k] = pos[k].lerp(c, 0.4);
    pos
}

#[test]
fn triangle_area_is_unsigned() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 0.0);
    let c = Point::new(0.0, 3.0);
    assert_eq!(triangle_area(a, b, c), 6.0);
    assert_eq!(triangle_area(a, c, b), 6.0);
    assert_eq!(triangle_area(a, a, c), 0.0);
}

#[test]
fn rectangle_ties_resolve_to_lowest_index() {
    let pos = [
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
    ];
    assert_eq!(largest_triangle_corner(&pos), 0);
}

#[test]
fn omitted_corner_leaves_the_largest_triangle() {
    for k in 0..4 {
        let pos = pulled_rect(k);
        let omit = largest_triangle_corner(&pos);
        assert_eq!(omit, k);

        let area_without = |i: usize| {
            triangle_area(pos[(i + 1) % 4], pos[(i + 2) % 4], pos[(i + 3) % 4])
        };
        for i in 0..4 {
            assert!(area_without(omit) >= area_without(i));
        }
    }
}

#[test]
fn fit_is_exact_on_the_three_retained_corners() {
    for k in 0..4 {
        let pos = pulled_rect(k);
        let t = fit_unit_square(&pos);
        for i in (0..4).filter(|&i| i != k) {
            assert_close(t * UNIT_CORNERS[i], pos[i]);
        }
        // The dropped corner is only approximated.
        assert!((t * UNIT_CORNERS[k] - pos[k]).hypot() > 1.0);
    }
}

#[test]
fn fit_is_exact_on_skewed_parallelograms_everywhere() {
    let pos = [
        Point::new(12.0, 40.0),
        Point::new(52.0, 30.0),
        Point::new(20.0, 5.0),
        Point::new(60.0, -5.0),
    ];
    let t = fit_unit_square(&pos);
    for i in 0..4 {
        assert_close(t * UNIT_CORNERS[i], pos[i]);
    }
}

#[test]
fn display_unit_square_fits_to_identity() {
    let pos = [
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
    ];
    assert_coeffs(fit_unit_square(&pos), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn y_up_unit_square_fits_to_vertical_flip() {
    // p0=(0,0), p1=(1,0), p3=(1,1), p2=(0,1): unprojected y-up corners.
    let pos = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
    ];
    assert_coeffs(fit_unit_square(&pos), [1.0, 0.0, 0.0, -1.0, 0.0, 1.0]);
}

#[test]
fn degenerate_quads_produce_singular_transforms() {
    let p = Point::new(3.0, 4.0);
    let t = fit_unit_square(&[p, p, p, p]);
    assert_eq!(t.determinant(), 0.0);
    assert_close(t * Point::new(0.5, 0.5), p);

    let collinear = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 3.0),
    ];
    assert!(fit_unit_square(&collinear).determinant().abs() < 1e-12);
}

#[test]
fn irregular_quads_keep_the_largest_triangle_exactly() {
    let quads: [(&str, [Point; 4]); 4] = [
        (
            "concave",
            [
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 0.0),
                Point::new(3.0, 7.0),
            ],
        ),
        (
            "twisted",
            [
                Point::new(0.0, 10.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(10.0, 10.0),
            ],
        ),
        (
            "rotated",
            [
                Point::new(2.0, 9.0),
                Point::new(11.0, 6.0),
                Point::new(-1.0, 1.0),
                Point::new(8.0, -3.0),
            ],
        ),
        (
            "kite",
            [
                Point::new(0.0, 0.0),
                Point::new(8.0, 1.0),
                Point::new(1.0, 6.0),
                Point::new(20.0, 12.0),
            ],
        ),
    ];

    for (name, pos) in quads {
        let areas: Vec<f64> = (0..4)
            .map(|i| triangle_area(pos[(i + 1) % 4], pos[(i + 2) % 4], pos[(i + 3) % 4]))
            .collect();
        let max = areas.iter().cloned().fold(f64::MIN, f64::max);
        let want = areas.iter().position(|&a| a == max).unwrap();
        let omit = largest_triangle_corner(&pos);
        assert_eq!(omit, want, "{name}: areas {areas:?}");

        let t = fit_unit_square(&pos);
        for i in (0..4).filter(|&i| i != omit) {
            assert_close(t * UNIT_CORNERS[i], pos[i]);
        }
    }
}
