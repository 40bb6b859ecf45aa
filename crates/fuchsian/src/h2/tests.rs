use super::*;
use crate::error::GeometryError;
use crate::planar::{i, re};
use crate::sample::{random_isometry, random_point, random_points, ReplayToken};
use crate::Complex;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

fn close(a: Complex, b: Complex, tol: f64) -> bool {
    (a - b).norm() < tol
}

fn geodesic(z1: Complex, z2: Complex) -> H2Geodesic {
    H2Geodesic::new(z1, z2).unwrap()
}

fn unit(theta: f64) -> Complex {
    Complex::from_polar(1.0, theta)
}

#[test]
fn point_models_are_consistent() {
    for p in random_points(ReplayToken::new(7, 0), 50, 0.95) {
        assert!(close(H2Point::from_klein(p.klein()).disk(), p.disk(), 1e-12));
        assert!(close(
            H2Point::from_upper_half_plane(p.upper_half_plane()).disk(),
            p.disk(),
            1e-10
        ));
        assert!(close(
            H2Point::from_hyperboloid_projection(p.hyperboloid_projection()).disk(),
            p.disk(),
            1e-10
        ));
        assert!(p.upper_half_plane().im > 0.0);
        let h = p.hyperboloid();
        assert!((h.z * h.z - h.x * h.x - h.y * h.y - 1.0).abs() < 1e-6 * h.z * h.z);
    }
    // origin of the disk is i in the upper half-plane
    assert!(close(H2Point::origin().upper_half_plane(), i(), 1e-15));
}

#[test]
fn distance_from_origin_and_invariance() {
    let p = H2Point::from_disk(re(0.5));
    assert!((H2Point::origin().distance(&p) - 2.0 * 0.5f64.atanh()).abs() < 1e-12);
    for k in 0..20 {
        let tok = ReplayToken::new(11, k);
        let f = random_isometry(tok, 0.8);
        let pts = random_points(tok.next(), 2, 0.9);
        let d0 = pts[0].distance(&pts[1]);
        let d1 = (f * pts[0]).distance(&(f * pts[1]));
        assert!((d0 - d1).abs() < 1e-8 * d0.max(1.0));
    }
}

#[test]
fn midpoint_is_equidistant_and_on_the_arc() {
    let p = random_point(ReplayToken::new(3, 1), 0.8);
    let q = random_point(ReplayToken::new(3, 2), 0.8);
    let m = p.midpoint(&q);
    let d = p.distance(&q);
    assert!((p.distance(&m) - 0.5 * d).abs() < 1e-9);
    assert!((q.distance(&m) - 0.5 * d).abs() < 1e-9);
    assert_eq!(p.midpoint(&p), p);
}

#[test]
fn centroid_of_symmetric_points_is_origin() {
    let pts: Vec<H2Point> = (0..5)
        .map(|k| H2Point::from_disk(Complex::from_polar(0.6, TAU * k as f64 / 5.0)))
        .collect();
    let c = H2Point::centroid(&pts, &[1.0; 5]).unwrap();
    assert!(c.disk().norm() < 1e-12);
    // a single weighted point is its own centroid
    let one = H2Point::centroid(&pts[..1], &[3.0]).unwrap();
    assert!(close(one.disk(), pts[0].disk(), 1e-12));
    assert!(matches!(
        H2Point::centroid(&pts, &[1.0; 3]),
        Err(GeometryError::InvalidGeometry(_))
    ));
    assert!(H2Point::centroid(&pts, &[0.0; 5]).is_err());
}

#[test]
fn compose_is_function_composition() {
    for k in 0..20 {
        let tok = ReplayToken::new(5, 3 * k);
        let f = random_isometry(tok, 0.9);
        let g = random_isometry(tok.next(), 0.9);
        let z = random_point(tok.next().next(), 0.9).disk();
        assert!(close(
            (f * g).apply_disk(z),
            f.apply_disk(g.apply_disk(z)),
            1e-9
        ));
        assert!((f * f.inverse()).almost_equal(&H2Isometry::identity()));
        assert!((f.inverse() * f).error() < 1e-18);
        assert!((f * H2Isometry::identity()).almost_equal(&f));
    }
}

#[test]
fn classification_by_trace() {
    assert_eq!(H2Isometry::rotation(1.0).kind(), IsometryKind::Elliptic);
    assert!(H2Isometry::rotation(1.0).is_elliptic());
    assert_eq!(H2Isometry::identity().kind(), IsometryKind::Parabolic);
    let parabolic = H2Isometry::from_disk_coordinates(i(), Complex::new(0.5, 0.5));
    assert_eq!(parabolic.trace_squared(), 4.0);
    assert!(parabolic.is_parabolic());
    let t = H2Isometry::translation_length_normalized(1.3);
    assert!(t.is_hyperbolic());
    assert!((t.translation_length() - 1.3).abs() < 1e-12);
    assert!(H2Isometry::rotation(0.3).translation_length().is_nan());
}

#[test]
fn fixed_points_and_axis() {
    let f = H2Isometry::rotation(0.7);
    let (p, q) = f.fixed_points();
    assert_eq!(p, crate::planar::CP1Point::from_complex(re(0.0)));
    assert!(q.is_infinity());
    assert!(f.axis().is_none());

    let l = geodesic(unit(0.4), unit(2.5));
    let g = H2Isometry::from_translation_axis_and_length(&l, 0.9);
    let axis = g.axis().unwrap();
    let (a1, a2) = axis.endpoints();
    assert!(close(a1, unit(0.4), 1e-9));
    assert!(close(a2, unit(2.5), 1e-9));
    assert!(close(g.apply_disk(a1), a1, 1e-9));
    assert!(close(g.apply_disk(a2), a2, 1e-9));
    // reversed translation reverses the axis
    let back = g.inverse().axis().unwrap();
    assert!(close(back.endpoints().0, unit(2.5), 1e-9));
    assert!((g.translation_length() - 0.9).abs() < 1e-9);
}

#[test]
fn vertical_maps_send_endpoints_to_poles() {
    let l = geodesic(unit(-0.3), unit(1.9));
    let up = H2Isometry::mapping_to_vertical_up(&l);
    let down = H2Isometry::mapping_to_vertical_down(&l);
    let (z1, z2) = l.endpoints();
    assert!(close(up.apply_disk(z1), -i(), 1e-12));
    assert!(close(up.apply_disk(z2), i(), 1e-12));
    assert!(close(down.apply_disk(z1), i(), 1e-12));
    assert!(close(down.apply_disk(z2), -i(), 1e-12));

    let m = geodesic(unit(2.2), unit(3.5));
    let f = H2Isometry::mapping_geodesic(&l, &m);
    assert!(close(f.apply_disk(z1), unit(2.2), 1e-10));
    assert!(close(f.apply_disk(z2), unit(3.5), 1e-10));
}

#[test]
fn vertical_translations_add_like_tanh() {
    let (t1, t2, t3) = (0.2, -0.5, 0.35);
    let v = H2Isometry::vertical_translation;
    assert!(H2Isometry::vertical_translation2(t1, t2).almost_equal(&(v(t1) * v(t2))));
    assert!(H2Isometry::vertical_translation3(t1, t2, t3).almost_equal(&(v(t1) * v(t2) * v(t3))));
    assert!(close(v(0.4).apply_disk(-0.4 * i()), re(0.0), 1e-15));
}

#[test]
fn point_mappings() {
    let z_in = Complex::new(0.3, -0.2);
    let z_out = Complex::new(-0.5, 0.4);
    let f = H2Isometry::mapping_point_in_disk_normalized(z_in, z_out);
    assert!(close(f.apply_disk(z_in), z_out, 1e-12));
    let p = H2Point::from_disk(z_in);
    assert!(close((H2Isometry::mapping_point_to_origin(&p) * p).disk(), re(0.0), 1e-15));
    let h = H2Isometry::half_turn(&p);
    assert!(close((h * p).disk(), z_in, 1e-12));
    assert!((h * h).almost_equal(&H2Isometry::identity()));
}

#[test]
fn sl2r_round_trip_and_action() {
    for k in 0..10 {
        let f = random_isometry(ReplayToken::new(17, k), 0.8);
        let m = f.sl2r_matrix();
        assert!((m.determinant() - 1.0).abs() < 1e-9);
        assert!(H2Isometry::from_sl2r(&m).almost_equal(&f));
        // trace of the real matrix squares to trace²
        assert!((m.trace().powi(2) - f.trace_squared()).abs() < 1e-8 * f.trace_squared());
        let p = random_point(ReplayToken::new(18, k), 0.9);
        let z = p.upper_half_plane();
        let w = (re(m[(0, 0)]) * z + m[(0, 1)]) / (re(m[(1, 0)]) * z + m[(1, 1)]);
        assert!(close(w, (f * p).upper_half_plane(), 1e-7 * w.norm().max(1.0)));
    }
}

#[test]
fn gluing_conjugator_inverts_boundary() {
    let f1 = H2Isometry::from_translation_axis_and_length(&geodesic(unit(0.1), unit(1.2)), 1.1);
    let f1_left =
        H2Isometry::from_translation_axis_and_length(&geodesic(unit(2.0), unit(3.0)), 0.8);
    let f2 = H2Isometry::from_translation_axis_and_length(&geodesic(unit(4.0), unit(5.1)), 1.1);
    let f2_left =
        H2Isometry::from_translation_axis_and_length(&geodesic(unit(5.5), unit(3.5)), 0.6);
    for twist in [-0.4, 0.0, 0.3] {
        let c = H2Isometry::find_conjugator_for_gluing(&f1, &f1_left, &f2, &f2_left, twist).unwrap();
        assert!((c * f2 * c.inverse()).almost_equal(&f1.inverse()));
    }
    let f3 = H2Isometry::from_translation_axis_and_length(&geodesic(unit(4.0), unit(5.1)), 1.5);
    assert!(matches!(
        H2Isometry::find_conjugator_for_gluing(&f1, &f1_left, &f3, &f2_left, 0.0),
        Err(GeometryError::MismatchedTranslationLengths { .. })
    ));
}

#[test]
fn geodesic_circle_contains_endpoints() {
    let l = geodesic(unit(0.3), unit(1.4));
    assert!(l.is_circle_in_disk_model());
    let c = l.circle_in_disk_model().unwrap();
    let (z1, z2) = l.endpoints();
    assert!(c.contains(z1) && c.contains(z2));
    // orthogonal to the unit circle
    assert!((c.center.norm_sqr() - c.radius * c.radius - 1.0).abs() < 1e-12);
    assert!(l.contains(&H2Point::from_disk(l.closest_point_to_origin())));
    assert!(l.line_in_disk_model().is_none());

    let d = geodesic(re(1.0), re(-1.0));
    assert!(!d.is_circle_in_disk_model());
    assert!(d.contains(&H2Point::from_disk(re(0.3))));
    assert_eq!(d.closest_point_to_origin(), re(0.0));
    assert_eq!(l.swap_orientation().endpoints(), (z2, z1));
    assert!(H2Geodesic::new(z1, z1).is_err());
}

#[test]
fn intersections() {
    let l1 = geodesic(re(1.0), re(-1.0));
    let l2 = geodesic(i(), -i());
    assert_eq!(intersect(&l1, &l2), Some(H2Point::origin()));

    let c1 = geodesic(unit(-0.5), unit(1.0));
    let p = intersect(&l1, &c1).unwrap();
    assert!(l1.contains(&p) && c1.contains(&p));
    assert!(p.disk().norm() < 1.0);

    let c2 = geodesic(unit(0.0 + 0.2), unit(2.0));
    let q = intersect(&c1, &c2).unwrap();
    assert!(c1.contains(&q) && c2.contains(&q));

    let far = geodesic(unit(2.5), unit(3.5));
    assert!(!do_intersect(&c1, &far));
    assert!(intersect(&c1, &far).is_none());
}

#[test]
fn common_perpendicular_is_orthogonal_to_both() {
    let l1 = geodesic(unit(0.2), unit(1.0));
    let l2 = geodesic(unit(2.5), unit(4.0));
    let perp = common_perpendicular(&l1, &l2).unwrap();
    let (p1, p2) = closest_points(&l1, &l2).unwrap();
    assert!(perp.contains(&p1) && perp.contains(&p2));
    // moving along either geodesic increases the distance
    let d = distance_geodesics(&l1, &l2).unwrap();
    assert!((d - p1.distance(&p2)).abs() < 1e-12);
    for s in [-0.1, 0.1] {
        let a = H2Isometry::from_translation_axis_and_length(&l1, s) * p1;
        assert!(a.distance(&p2) > d);
    }
    assert_eq!(closest_point(&l1, &l2), Some(p1));
}

#[test]
fn shared_endpoint_and_crossing_distances() {
    let l1 = geodesic(unit(0.2), unit(1.0));
    let l2 = geodesic(unit(1.0), unit(3.0));
    assert!(common_endpoint(&l1, &l2));
    assert_eq!(common_endpoint_in_disk_model(&l1, &l2), Some(unit(1.0)));
    assert_eq!(distance_geodesics(&l1, &l2), None);
    assert!(common_perpendicular(&l1, &l2).is_none());

    let l3 = geodesic(unit(0.5), unit(3.0));
    assert_eq!(distance_geodesics(&l1, &l3), Some(0.0));
    let (a, b) = closest_points(&l1, &l3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn arc_geodesic_passes_through_endpoints() {
    let p = H2Point::from_disk(Complex::new(0.2, 0.1));
    let q = H2Point::from_disk(Complex::new(-0.3, 0.5));
    let arc = H2GeodesicArc::new(p, q);
    let l = arc.geodesic();
    assert!(l.contains(&p) && l.contains(&q));
    // oriented like the arc: p lies closer to z1
    let (z1, z2) = l.endpoints();
    assert!((z1 - p.disk()).norm() < (z2 - p.disk()).norm());
    let c = arc.circle_in_disk_model().unwrap();
    assert!(c.contains(p.disk()) && c.contains(q.disk()));
    assert!((arc.length() - p.distance(&q)).abs() < 1e-15);

    let diam = H2GeodesicArc::new(H2Point::from_disk(re(0.1)), H2Point::from_disk(re(0.5)));
    assert!(diam.is_line_segment_in_disk_model());
    assert!(diam.circle_in_disk_model().is_none());
    assert_eq!(diam.geodesic().endpoints(), (re(-1.0), re(1.0)));
}

#[test]
fn short_arc_away_from_origin_keeps_its_circle() {
    let p = H2Point::from_disk(re(0.9));
    let q = H2Point::from_disk(Complex::from_polar(0.9, 1e-12));
    let l = H2GeodesicArc::new(p, q).geodesic();
    assert!(l.is_circle_in_disk_model());
    assert!(l.contains(&p) && l.contains(&q));
    let (z1, z2) = l.endpoints();
    for z in [z1, z2] {
        assert!((z.norm() - 1.0).abs() < 1e-12);
        // the endpoints straddle the positive real axis, not ±i
        assert!(z.re > 0.5);
    }
}

#[test]
fn even_subdivision_is_evenly_spaced() {
    let p = H2Point::from_disk(Complex::new(0.6, -0.1));
    let q = H2Point::from_disk(Complex::new(-0.2, 0.7));
    let pts = H2GeodesicArc::new(p, q).even_subdivision(4);
    assert_eq!(pts.len(), 6);
    assert_eq!(pts[0], p);
    assert_eq!(pts[5], q);
    let step = p.distance(&q) / 5.0;
    for w in pts.windows(2) {
        assert!((w[0].distance(&w[1]) - step).abs() < 1e-9);
    }
}

#[test]
fn arc_box_contains_sampled_points() {
    for k in 0..20 {
        let pts = random_points(ReplayToken::new(23, k), 2, 0.9);
        let arc = H2GeodesicArc::new(pts[0], pts[1]);
        let (x0, x1, y0, y1) = arc.extremal_coordinates_in_hyperboloid_projection();
        for p in arc.even_subdivision(30) {
            let h = p.hyperboloid_projection();
            assert!(h.re >= x0 - 1e-7 && h.re <= x1 + 1e-7);
            assert!(h.im >= y0 - 1e-7 && h.im <= y1 + 1e-7);
        }
    }
}

#[test]
fn tangent_vectors() {
    let p = H2Point::from_disk(Complex::new(0.1, 0.4));
    let q = H2Point::from_disk(Complex::new(-0.5, -0.2));
    let v = H2TangentVector::from_points(&p, &q);
    assert!((v.length() - p.distance(&q)).abs() < 1e-12);
    assert!(close(v.exponentiate().disk(), q.disk(), 1e-12));
    let w = v.parallel_transport(1.0);
    assert!(close(w.root().disk(), q.disk(), 1e-12));
    assert!((w.length() - v.length()).abs() < 1e-12);
    // continuing along w lands on the extension of the geodesic
    let ext = w.exponentiate_at(0.5);
    assert!((p.distance(&ext) - 1.5 * v.length()).abs() < 1e-9);

    let f = random_isometry(ReplayToken::new(29, 0), 0.7);
    let fv = f * v;
    assert!((fv.length() - v.length()).abs() < 1e-10);
    assert!(close(fv.exponentiate().disk(), (f * q).disk(), 1e-10));

    assert!((H2TangentVector::scal_prod(&v, &v).unwrap() - v.length_squared()).abs() < 1e-12);
    assert!(H2TangentVector::scal_prod(&v, &w).is_err());
    assert!(v.checked_add(&w).is_err());
    let twice = v.checked_add(&v).unwrap();
    assert!((twice.length() - (2.0 * v).length()).abs() < 1e-15);
}

#[test]
fn triangle_angles_area_and_subdivision() {
    // equilateral triangle centered at the origin
    let r = 0.5;
    let t = H2Triangle::new(
        H2Point::from_disk(unit(0.0) * r),
        H2Point::from_disk(unit(TAU / 3.0) * r),
        H2Point::from_disk(unit(2.0 * TAU / 3.0) * r),
    );
    let [a, b, c] = t.angles();
    assert!((a - b).abs() < 1e-12 && (b - c).abs() < 1e-12);
    assert!(a < PI / 3.0);
    assert!((t.area() - (PI - 3.0 * a)).abs() < 1e-12);
    assert!(t.contains(&H2Point::origin()));
    assert!(!t.contains(&H2Point::from_disk(re(-0.9))));
    let parts = t.subdivide();
    let sum: f64 = parts.iter().map(H2Triangle::area).sum();
    assert!((sum - t.area()).abs() < 1e-10);
    // orientation does not change angles
    let rev = H2Triangle::new(t.points()[0], t.points()[2], t.points()[1]);
    assert!((rev.angles()[0] - a).abs() < 1e-12);
    let [la, lb, _] = t.side_lengths();
    assert!((la - lb).abs() < 1e-12);
}

fn regular_polygon(n: usize, r: f64, clockwise: bool) -> H2Polygon {
    let mut pts: Vec<H2Point> = (0..n)
        .map(|k| H2Point::from_disk(unit(TAU * k as f64 / n as f64) * r))
        .collect();
    if clockwise {
        pts.reverse();
    }
    H2Polygon::new(pts)
}

#[test]
fn polygon_angles_orientation_and_area() {
    // regular octagon with angles π/4: cosh R = cot(π/8)·cot(π/8)
    let n = 8.0;
    let cosh_r = 1.0 / ((PI / n).tan() * (PI / n).tan());
    let r = (0.5 * cosh_r.acosh()).tanh();
    for clockwise in [false, true] {
        let poly = regular_polygon(8, r, clockwise);
        assert_eq!(poly.is_positively_oriented(), !clockwise);
        for a in poly.interior_angles() {
            assert!((a - FRAC_PI_4).abs() < 1e-9);
        }
        assert!(poly.is_convex());
        assert!((poly.area() - 4.0 * PI).abs() < 1e-8);
        assert!(poly.contains(&H2Point::origin()));
        assert!(!poly.contains(&H2Point::from_disk(re(0.99))));
    }
    let square = regular_polygon(4, 0.3, false);
    assert_eq!(square.sides().len(), 4);
    assert_eq!(square.vertex(-1), square.vertex(3));
    assert!(square.interior_angles().iter().all(|a| *a < FRAC_PI_2));
}

#[test]
fn polygon_box_covers_vertices() {
    let poly = regular_polygon(6, 0.7, false);
    let (x0, x1, y0, y1) = poly.extremal_coordinates_in_hyperboloid_projection();
    for v in poly.vertices() {
        let h = v.hyperboloid_projection();
        assert!(h.re >= x0 && h.re <= x1 && h.im >= y0 && h.im <= y1);
    }
    let moved = random_isometry(ReplayToken::new(31, 0), 0.5) * &poly;
    assert_eq!(moved.nb_vertices(), 6);
    assert!((moved.area() - poly.area()).abs() < 1e-9);
}

#[test]
fn act_and_act_all() {
    let f = H2Isometry::rotation(FRAC_PI_2);
    let p = H2Point::from_disk(re(0.5));
    assert!(close(f.act(p).disk(), 0.5 * i(), 1e-15));
    let moved = f.act_all(&[p, H2Point::origin()]);
    assert_eq!(moved.len(), 2);
    assert_eq!(moved[1], H2Point::origin());
    let l = f.act(geodesic(re(1.0), re(-1.0)));
    assert!(close(l.endpoints().0, i(), 1e-15));
}

#[test]
fn display_mentions_kind() {
    let t = H2Isometry::translation_length_normalized(0.5);
    assert!(t.to_string().starts_with("Hyperbolic"));
    assert!(H2Isometry::rotation(0.5).to_string().starts_with("Elliptic"));
}

#[test]
fn distance_is_symmetric_and_vanishes_on_the_diagonal() {
    for k in 0..50 {
        let pts = random_points(ReplayToken::new(23, k), 2, 0.95);
        let (p, q) = (pts[0], pts[1]);
        assert!((p.distance(&q) - q.distance(&p)).abs() < 1e-12);
        assert_eq!(p.distance(&p), 0.0);
    }
    assert_eq!(H2Point::origin().distance(&H2Point::origin()), 0.0);
}

proptest! {
    #[test]
    fn distance_is_symmetric(
        x1 in -0.7f64..0.7, y1 in -0.7f64..0.7,
        x2 in -0.7f64..0.7, y2 in -0.7f64..0.7,
    ) {
        let p = H2Point::from_disk(Complex::new(x1, y1));
        let q = H2Point::from_disk(Complex::new(x2, y2));
        prop_assert!((p.distance(&q) - q.distance(&p)).abs() < 1e-12);
        prop_assert_eq!(p.distance(&p), 0.0);
    }

    #[test]
    fn inverse_undoes_action(
        seed in 0u64..1_000,
        x in -0.6f64..0.6,
        y in -0.6f64..0.6,
    ) {
        let f = random_isometry(ReplayToken::new(seed, 0), 0.9);
        let z = Complex::new(x, y);
        let back = f.inverse().apply_disk(f.apply_disk(z));
        prop_assert!((back - z).norm() < 1e-9);
    }

    #[test]
    fn translation_length_is_conjugation_invariant(seed in 0u64..1_000, len in 0.1f64..3.0) {
        let g = random_isometry(ReplayToken::new(seed, 1), 0.8);
        let t = H2Isometry::translation_length_normalized(len);
        let c = g * t * g.inverse();
        prop_assert!((c.translation_length() - len).abs() < 1e-6);
    }
}
