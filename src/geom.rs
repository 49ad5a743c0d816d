// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess geom.c/h
//
// Predicates on projected (s, t) positions. The sweep runs along s, so the
// event order is s first, then t. Every comparison in the crate funnels
// through these functions so that ties break identically everywhere.

/// Scalar type for coordinates and predicates.
pub type Real = f64;

/// Largest accepted coordinate magnitude; larger input is clamped.
pub const MAX_COORD: Real = 1.0e150;

/// A vertex position on the sweep plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub s: Real,
    pub t: Real,
}

impl Point {
    #[inline]
    pub const fn new(s: Real, t: Real) -> Self {
        Point { s, t }
    }
}

/// Sweep order: `u` is at or before `v`.
#[inline]
pub fn vert_leq(u: Point, v: Point) -> bool {
    u.s < v.s || (u.s == v.s && u.t <= v.t)
}

/// Exact coincidence.
#[inline]
pub fn vert_eq(u: Point, v: Point) -> bool {
    u.s == v.s && u.t == v.t
}

/// `vert_leq` with the axes swapped.
#[inline]
pub fn trans_leq(u: Point, v: Point) -> bool {
    u.t < v.t || (u.t == v.t && u.s <= v.s)
}

/// For `u <= v <= w` in sweep order, the signed vertical distance from the
/// segment uw to v, evaluated at `v.s`. Zero when uw is vertical.
///
/// The interpolation always starts from the nearer endpoint, which keeps
/// the result within `[min(u.t, w.t), max(u.t, w.t)]` when `v.t` is zeroed.
pub fn edge_eval(u: Point, v: Point, w: Point) -> Real {
    let gap_l = v.s - u.s;
    let gap_r = w.s - v.s;
    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (v.t - u.t) + (u.t - w.t) * (gap_l / (gap_l + gap_r))
        } else {
            (v.t - w.t) + (w.t - u.t) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// Same sign as [`edge_eval`] without the division.
pub fn edge_sign(u: Point, v: Point, w: Point) -> Real {
    let gap_l = v.s - u.s;
    let gap_r = w.s - v.s;
    if gap_l + gap_r > 0.0 {
        (v.t - w.t) * gap_l + (v.t - u.t) * gap_r
    } else {
        0.0
    }
}

pub fn trans_eval(u: Point, v: Point, w: Point) -> Real {
    let gap_l = v.t - u.t;
    let gap_r = w.t - v.t;
    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (v.s - u.s) + (u.s - w.s) * (gap_l / (gap_l + gap_r))
        } else {
            (v.s - w.s) + (w.s - u.s) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

pub fn trans_sign(u: Point, v: Point, w: Point) -> Real {
    let gap_l = v.t - u.t;
    let gap_r = w.t - v.t;
    if gap_l + gap_r > 0.0 {
        (v.s - w.s) * gap_l + (v.s - u.s) * gap_r
    } else {
        0.0
    }
}

#[inline]
pub fn vert_l1_dist(u: Point, v: Point) -> Real {
    (u.s - v.s).abs() + (u.t - v.t).abs()
}

/// `(b*x + a*y) / (a + b)`, or the midpoint when both weights are zero.
/// Negative weights are treated as zero. The result never leaves `[x, y]`.
#[inline]
pub fn real_interpolate(a: Real, x: Real, b: Real, y: Real) -> Real {
    let a = if a < 0.0 { 0.0 } else { a };
    let b = if b < 0.0 { 0.0 } else { b };
    if a <= b {
        if b == 0.0 {
            (x + y) / 2.0
        } else {
            x + (y - x) * (a / (a + b))
        }
    } else {
        y + (x - y) * (b / (a + b))
    }
}

/// Orders the four endpoints of two segments so that `o1 <= d1`, `o2 <= d2`
/// and `o1 <= o2` under `leq`.
fn order_segments(
    leq: fn(Point, Point) -> bool,
    mut o1: Point,
    mut d1: Point,
    mut o2: Point,
    mut d2: Point,
) -> (Point, Point, Point, Point) {
    if !leq(o1, d1) {
        std::mem::swap(&mut o1, &mut d1);
    }
    if !leq(o2, d2) {
        std::mem::swap(&mut o2, &mut d2);
    }
    if !leq(o1, o2) {
        std::mem::swap(&mut o1, &mut o2);
        std::mem::swap(&mut d1, &mut d2);
    }
    (o1, d1, o2, d2)
}

/// Intersection of segments (o1, d1) and (o2, d2).
///
/// Each coordinate is interpolated between the two middle endpoints of the
/// relevant ordering (sweep order for `s`, transposed order for `t`), so the
/// result always lies inside both segments' bounding boxes. Segments that do
/// not actually overlap yield the midpoint of the gap.
pub fn edge_intersect(o1: Point, d1: Point, o2: Point, d2: Point) -> Point {
    let (a, b, c, d) = order_segments(vert_leq, o1, d1, o2, d2);
    let s = if !vert_leq(c, b) {
        (c.s + b.s) / 2.0
    } else if vert_leq(b, d) {
        let (z1, z2) = same_sign(edge_eval(a, c, b), edge_eval(c, b, d));
        real_interpolate(z1, c.s, z2, b.s)
    } else {
        let (z1, z2) = same_sign(edge_sign(a, c, b), -edge_sign(a, d, b));
        real_interpolate(z1, c.s, z2, d.s)
    };

    let (a, b, c, d) = order_segments(trans_leq, o1, d1, o2, d2);
    let t = if !trans_leq(c, b) {
        (c.t + b.t) / 2.0
    } else if trans_leq(b, d) {
        let (z1, z2) = same_sign(trans_eval(a, c, b), trans_eval(c, b, d));
        real_interpolate(z1, c.t, z2, b.t)
    } else {
        let (z1, z2) = same_sign(trans_sign(a, c, b), -trans_sign(a, d, b));
        real_interpolate(z1, c.t, z2, d.t)
    };

    Point { s, t }
}

#[inline]
fn same_sign(z1: Real, z2: Real) -> (Real, Real) {
    if z1 + z2 < 0.0 {
        (-z1, -z2)
    } else {
        (z1, z2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(s: Real, t: Real) -> Point {
        Point::new(s, t)
    }

    #[test]
    fn sweep_order_is_s_then_t() {
        assert!(vert_leq(p(0.0, 5.0), p(1.0, 0.0)));
        assert!(vert_leq(p(0.0, 0.0), p(0.0, 1.0)));
        assert!(vert_leq(p(2.0, 2.0), p(2.0, 2.0)));
        assert!(!vert_leq(p(1.0, 0.0), p(0.0, 9.0)));
    }

    #[test]
    fn transposed_order_is_t_then_s() {
        assert!(trans_leq(p(5.0, 0.0), p(0.0, 1.0)));
        assert!(trans_leq(p(0.0, 0.0), p(1.0, 0.0)));
        assert!(!trans_leq(p(0.0, 1.0), p(9.0, 0.0)));
    }

    #[test]
    fn edge_eval_measures_vertical_gap() {
        let r = edge_eval(p(0.0, 0.0), p(0.5, 1.0), p(1.0, 0.0));
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);
        let below = edge_eval(p(0.0, 0.0), p(0.5, -0.25), p(1.0, 0.0));
        assert_abs_diff_eq!(below, -0.25, epsilon = 1e-12);
    }

    #[test]
    fn vertical_edge_gives_zero() {
        assert_eq!(edge_eval(p(0.0, 0.0), p(0.0, 0.5), p(0.0, 1.0)), 0.0);
        assert_eq!(edge_sign(p(0.0, 0.0), p(0.0, 0.5), p(0.0, 1.0)), 0.0);
    }

    #[test]
    fn edge_sign_agrees_with_edge_eval() {
        let cases = [
            (p(0.0, 0.0), p(0.3, 0.9), p(2.0, 0.1)),
            (p(-1.0, 4.0), p(0.0, 0.0), p(3.0, 1.0)),
            (p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)),
        ];
        for (u, v, w) in cases {
            let e = edge_eval(u, v, w);
            let s = edge_sign(u, v, w);
            assert_eq!(e > 0.0, s > 0.0, "{u:?} {v:?} {w:?}");
            assert_eq!(e < 0.0, s < 0.0, "{u:?} {v:?} {w:?}");
        }
    }

    #[test]
    fn interpolate_handles_zero_and_negative_weights() {
        assert_abs_diff_eq!(real_interpolate(0.0, 0.0, 0.0, 1.0), 0.5);
        assert_abs_diff_eq!(real_interpolate(1.0, 0.0, 1.0, 2.0), 1.0);
        assert_abs_diff_eq!(real_interpolate(-3.0, 4.0, 1.0, 8.0), 4.0);
        assert_abs_diff_eq!(real_interpolate(3.0, 0.0, 1.0, 4.0), 3.0);
    }

    #[test]
    fn crossing_diagonals_meet_in_the_middle() {
        let x = edge_intersect(p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(1.0, 0.0));
        assert_abs_diff_eq!(x.s, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(x.t, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn intersection_stays_inside_both_boxes() {
        let (o1, d1) = (p(0.0, 0.0), p(10.0, 1e-9));
        let (o2, d2) = (p(5.0, -1.0), p(5.000001, 1.0));
        let x = edge_intersect(o1, d1, o2, d2);
        assert!(x.s >= 5.0 && x.s <= 5.000001, "s = {}", x.s);
        assert!(x.t >= 0.0 && x.t <= 1e-9, "t = {}", x.t);
    }

    #[test]
    fn arguments_order_does_not_matter() {
        let a = edge_intersect(p(0.0, 0.0), p(4.0, 2.0), p(0.0, 2.0), p(4.0, 0.0));
        let b = edge_intersect(p(4.0, 0.0), p(0.0, 2.0), p(4.0, 2.0), p(0.0, 0.0));
        assert_abs_diff_eq!(a.s, b.s, epsilon = 1e-12);
        assert_abs_diff_eq!(a.t, b.t, epsilon = 1e-12);
        assert_abs_diff_eq!(a.s, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.t, 1.0, epsilon = 1e-12);
    }
}
