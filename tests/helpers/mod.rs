// Copyright 2025 Lars Brubaker
// Shared test utilities for glu-tess tests.

#![allow(dead_code)]

use glu_tess::{Primitive, Real, TessError, TessVisitor, Tessellator, WindingRule};

/// Vertex payload: position plus the input index (`None` for vertices the
/// tessellator synthesized through `combine`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vtx {
    pub pos: [Real; 3],
    pub id: Option<usize>,
}

/// Records everything the tessellator reports.
#[derive(Default)]
pub struct Recorder {
    pub prims: Vec<(Primitive, Vec<Vtx>)>,
    /// Edge flag in effect for each vertex, in output order.
    pub flags: Vec<bool>,
    pub errors: Vec<TessError>,
    /// Positions of synthesized intersection vertices.
    pub combined: Vec<[Real; 3]>,
    /// Answer `combine` calls with `None`.
    pub refuse_combine: bool,
    pub edge_flags: bool,
    current_flag: bool,
}

impl Recorder {
    pub fn with_edge_flags() -> Self {
        Recorder {
            edge_flags: true,
            current_flag: true,
            ..Recorder::default()
        }
    }

    pub fn refusing_combine() -> Self {
        Recorder {
            refuse_combine: true,
            ..Recorder::default()
        }
    }

    /// All emitted triangles, with fans and strips expanded.
    pub fn triangles(&self) -> Vec<[Vtx; 3]> {
        let mut out = Vec::new();
        for (kind, v) in &self.prims {
            match kind {
                Primitive::Triangles => {
                    for t in v.chunks(3) {
                        assert_eq!(t.len(), 3, "partial triangle");
                        out.push([t[0], t[1], t[2]]);
                    }
                }
                Primitive::TriangleFan => {
                    for i in 1..v.len().saturating_sub(1) {
                        out.push([v[0], v[i], v[i + 1]]);
                    }
                }
                Primitive::TriangleStrip => {
                    for i in 0..v.len().saturating_sub(2) {
                        if i % 2 == 0 {
                            out.push([v[i], v[i + 1], v[i + 2]]);
                        } else {
                            out.push([v[i + 1], v[i], v[i + 2]]);
                        }
                    }
                }
                Primitive::LineLoop => {}
            }
        }
        out
    }

    pub fn loops(&self) -> Vec<Vec<Vtx>> {
        self.prims
            .iter()
            .filter(|(k, _)| *k == Primitive::LineLoop)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl TessVisitor for Recorder {
    type VertexData = Vtx;
    type PolygonData = ();

    fn begin(&mut self, kind: Primitive) {
        self.prims.push((kind, Vec::new()));
    }

    fn edge_flag(&mut self, boundary: bool) {
        self.current_flag = boundary;
    }

    fn vertex(&mut self, data: &Vtx) {
        self.flags.push(self.current_flag);
        self.prims
            .last_mut()
            .expect("vertex outside begin/end")
            .1
            .push(*data);
    }

    fn error(&mut self, err: TessError) {
        self.errors.push(err);
    }

    fn combine(
        &mut self,
        coords: [Real; 3],
        data: [Option<&Vtx>; 4],
        _weights: [Real; 4],
    ) -> Option<Vtx> {
        if self.refuse_combine {
            return None;
        }
        if data[2].is_none() {
            // Two coincident vertices merged: keep the first.
            return data[0].copied();
        }
        self.combined.push(coords);
        Some(Vtx {
            pos: coords,
            id: None,
        })
    }

    fn wants_edge_flags(&self) -> bool {
        self.edge_flags
    }
}

/// Signed area of a triangle in the xy plane.
pub fn triangle_area(t: &[Vtx; 3]) -> Real {
    let [a, b, c] = [t[0].pos, t[1].pos, t[2].pos];
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

/// Area of a triangle in 3D.
pub fn triangle_area_3d(t: &[Vtx; 3]) -> Real {
    let [a, b, c] = [t[0].pos, t[1].pos, t[2].pos];
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    0.5 * (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
}

pub fn total_area(tris: &[[Vtx; 3]]) -> Real {
    tris.iter().map(|t| triangle_area(t).abs()).sum()
}

pub fn total_signed_area(tris: &[[Vtx; 3]]) -> Real {
    tris.iter().map(triangle_area).sum()
}

/// Signed area of a polygon given in the xy plane.
pub fn polygon_signed_area(pts: &[[Real; 2]]) -> Real {
    let n = pts.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += pts[i][0] * pts[j][1] - pts[j][0] * pts[i][1];
    }
    0.5 * area
}

/// Regular polygon, counter-clockwise.
pub fn regular_polygon(n: usize, r: Real) -> Vec<[Real; 2]> {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as Real / n as Real;
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}

/// Star with alternating outer and inner radii, counter-clockwise.
pub fn star(points: usize, outer: Real, inner: Real) -> Vec<[Real; 2]> {
    (0..points * 2)
        .map(|i| {
            let a = std::f64::consts::PI * i as Real / points as Real;
            let r = if i % 2 == 0 { outer } else { inner };
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}

/// Feed one polygon of 2D contours. Vertex ids count up across contours.
pub fn feed<V: TessVisitor<VertexData = Vtx, PolygonData = ()>>(
    tess: &mut Tessellator<V>,
    contours: &[&[[Real; 2]]],
) {
    let mut id = 0;
    tess.begin_polygon(());
    for c in contours {
        tess.begin_contour();
        for p in c.iter() {
            let pos = [p[0], p[1], 0.0];
            tess.add_vertex(pos, Vtx { pos, id: Some(id) })
                .expect("add_vertex");
            id += 1;
        }
        tess.end_contour();
    }
    tess.end_polygon().expect("end_polygon");
}

/// Tessellate 2D contours with a fixed +z normal and return the recording.
pub fn tessellate(contours: &[&[[Real; 2]]], rule: WindingRule) -> Recorder {
    tessellate_with(Recorder::default(), contours, rule, false)
}

pub fn tessellate_with(
    recorder: Recorder,
    contours: &[&[[Real; 2]]],
    rule: WindingRule,
    boundary_only: bool,
) -> Recorder {
    let mut tess = Tessellator::new(recorder);
    tess.set_winding_rule(rule);
    tess.set_boundary_only(boundary_only);
    tess.set_normal([0.0, 0.0, 1.0]);
    feed(&mut tess, contours);
    tess.into_visitor()
}

/// Rotate `v` so that it starts with its smallest id (cyclic comparison).
pub fn canonical_cycle(ids: &[usize]) -> Vec<usize> {
    let Some(start) = ids
        .iter()
        .enumerate()
        .min_by_key(|(_, &id)| id)
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    ids[start..].iter().chain(&ids[..start]).copied().collect()
}
