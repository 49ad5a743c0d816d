// Copyright 2025 Lars Brubaker
// Hostile input: extreme magnitudes, NaN, coincident and near-degenerate points.

mod helpers;

use approx::assert_relative_eq;
use glu_tess::{Real, TessError, Tessellator, WindingRule};
use helpers::{feed, regular_polygon, star, tessellate, tessellate_with, total_area, Recorder};
use proptest::prelude::*;
use proptest::test_runner::TestRunner;

fn run(contours: &[&[[Real; 2]]], rule: WindingRule) -> Recorder {
    let mut tess = Tessellator::new(Recorder::default());
    tess.set_winding_rule(rule);
    feed(&mut tess, contours);
    tess.into_visitor()
}

#[test]
fn single_line_gives_nothing() {
    let rec = run(&[&[[0.0, 0.0], [0.0, 1.0]]], WindingRule::Positive);
    assert!(rec.prims.is_empty());
}

#[test]
fn all_points_at_origin() {
    let rec = run(&[&[[0.0; 2]; 4]], WindingRule::Positive);
    assert!(rec.triangles().is_empty());
    assert!(rec.errors.is_empty());
}

#[test]
fn nan_quad_collapses_to_a_point() {
    let mut tess = Tessellator::new(Recorder::default());
    tess.set_winding_rule(WindingRule::Positive);
    tess.begin_polygon(());
    tess.begin_contour();
    for i in 0..4 {
        let pos = [Real::NAN, Real::NAN, 0.0];
        tess.add_vertex(pos, helpers::Vtx { pos, id: Some(i) })
            .expect("add_vertex");
    }
    tess.end_contour();
    tess.end_polygon().expect("end_polygon");
    let rec = tess.into_visitor();
    assert!(rec.triangles().is_empty());
    assert_eq!(rec.errors, vec![TessError::InvalidValue; 4]);
}

#[test]
fn float_range_quad() {
    let (lo, hi) = (f32::MIN as Real, f32::MAX as Real);
    let rec = run(&[&[[lo, lo], [lo, hi], [hi, hi], [hi, lo]]], WindingRule::Odd);
    assert_eq!(rec.triangles().len(), 2);
    assert!(rec.errors.is_empty());
}

#[test]
fn wide_tall_and_huge_triangles() {
    let cases: [[[Real; 2]; 3]; 3] = [
        [[-2e38, 0.0], [0.0, 0.0], [2e38, -1.0]],
        [[0.0, 0.0], [0.0, 2e38], [-1.0, -2e38]],
        [[-2e37, 0.0], [0.0, 5.0], [1e37, -5.0]],
    ];
    for tri in &cases {
        let rec = run(&[tri], WindingRule::NonZero);
        assert!(rec.triangles().len() <= 1, "{tri:?}");
        assert!(rec.errors.is_empty(), "{tri:?}");
    }
}

#[test]
fn giant_sliver_quad_does_not_panic() {
    let pts = [
        [0.0, 3.40282347e38],
        [0.64113313, -1.0],
        [-0.0, -0.0],
        [-3.40282347e38, 1.0],
    ];
    for rule in [WindingRule::Odd, WindingRule::Positive] {
        let rec = run(&[&pts], rule);
        assert!(rec.errors.is_empty());
    }
}

#[test]
fn many_coincident_vertices_merge() {
    // The same square fed three times, plus repeated corners.
    let square = [
        [0.0, 0.0],
        [0.0, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [1.0, 1.0],
        [0.0, 1.0],
    ];
    let rec = tessellate(&[&square, &square, &square], WindingRule::NonZero);
    let tris = rec.triangles();
    assert_eq!(tris.len(), 2);
    assert_relative_eq!(total_area(&tris), 1.0, epsilon = 1e-12);
    assert!(rec.combined.is_empty());

    let odd = tessellate(&[&square, &square, &square], WindingRule::Odd);
    assert_relative_eq!(total_area(&odd.triangles()), 1.0, epsilon = 1e-12);
    let even = tessellate(&[&square, &square], WindingRule::Odd);
    assert!(even.triangles().is_empty());
}

#[test]
fn vertex_touching_an_edge() {
    // The tip of the second triangle lies on the hypotenuse of the first.
    let a = [[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];
    let b = [[1.0, 1.0], [2.0, 1.5], [1.5, 2.0]];
    let rec = tessellate(&[&a, &b], WindingRule::NonZero);
    let expected = 2.0 + 0.5 * 0.75;
    assert_relative_eq!(total_area(&rec.triangles()), expected, epsilon = 1e-12);
    assert!(rec.combined.is_empty());
}

#[test]
fn rotated_star_overlays() {
    // Several rotated copies of a star: lots of crossings, no panics, and
    // the union never exceeds the circumscribed disc.
    let base = star(7, 3.0, 1.2);
    let copies: Vec<Vec<[Real; 2]>> = (0..4)
        .map(|k| {
            let a = 0.37 * k as Real;
            let (s, c) = a.sin_cos();
            base.iter().map(|p| [c * p[0] - s * p[1], s * p[0] + c * p[1]]).collect()
        })
        .collect();
    let refs: Vec<&[[Real; 2]]> = copies.iter().map(Vec::as_slice).collect();

    let union = tessellate(&refs, WindingRule::NonZero);
    let area = total_area(&union.triangles());
    let disc = std::f64::consts::PI * 9.0;
    assert!(area > 0.0 && area < disc, "area {area}");
    assert!(!union.combined.is_empty());
    assert!(union.errors.is_empty());

    // Intersections never introduce area outside the union.
    for rule in [WindingRule::Odd, WindingRule::AbsGeqTwo, WindingRule::Positive] {
        let part = total_area(&tessellate(&refs, rule).triangles());
        assert!(part <= area + 1e-9, "{rule:?}: {part} > {area}");
    }
}

#[test]
fn dense_circle_with_jitter() {
    // Nearly collinear neighbours along a large circle.
    let pts: Vec<[Real; 2]> = regular_polygon(400, 1e6)
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let j = if i % 2 == 0 { 1e-7 } else { -1e-7 };
            [p[0] + j, p[1] - j]
        })
        .collect();
    let rec = tessellate(&[&pts], WindingRule::NonZero);
    let area = total_area(&rec.triangles());
    let disc = std::f64::consts::PI * 1e12;
    assert!((area - disc).abs() / disc < 1e-3, "area {area}");
}

#[test]
fn small_grid_contours_match_with_and_without_edge_flags() {
    // Tiny integer grids produce folds, repeats and collinear runs. Without
    // edge flags a single contour may take the fan fast path; with them it
    // always goes through the sweep. Both must cover the same area.
    let rules = [
        WindingRule::Odd,
        WindingRule::NonZero,
        WindingRule::Positive,
        WindingRule::Negative,
        WindingRule::AbsGeqTwo,
    ];
    let contours = prop::collection::vec((0i32..6, 0i32..6), 3..10);
    let mut runner = TestRunner::deterministic();
    runner
        .run(&contours, |pts| {
            let contour: Vec<[Real; 2]> = pts.iter().map(|&(x, y)| [x as Real, y as Real]).collect();
            for rule in rules {
                let plain = tessellate(&[contour.as_slice()], rule);
                let flagged =
                    tessellate_with(Recorder::with_edge_flags(), &[contour.as_slice()], rule, false);
                let a = total_area(&plain.triangles());
                let b = total_area(&flagged.triangles());
                prop_assert!((a - b).abs() <= 1e-9 * (1.0 + b), "{:?}: {} vs {}", rule, a, b);
                prop_assert!(plain.errors.is_empty());
            }
            Ok(())
        })
        .expect("fast path and sweep agree");
}
