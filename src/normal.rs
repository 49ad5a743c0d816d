// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess normal.c
//
// Projects the 3D input onto a plane. When no normal is supplied one is
// estimated from the vertices, and the projection is flipped if needed so
// that positively wound contours come out counter-clockwise.

use crate::geom::Real;
use crate::mesh::Mesh;

#[inline]
fn dot(u: &[Real; 3], v: &[Real; 3]) -> Real {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

#[inline]
fn sub(u: &[Real; 3], v: &[Real; 3]) -> [Real; 3] {
    [u[0] - v[0], u[1] - v[1], u[2] - v[2]]
}

#[inline]
fn cross(u: &[Real; 3], v: &[Real; 3]) -> [Real; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// Index of the component with the largest magnitude.
pub fn long_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() > v[0].abs() {
        i = 1;
    }
    if v[2].abs() > v[i].abs() {
        i = 2;
    }
    i
}

/// Index of the component with the smallest magnitude.
pub fn short_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() < v[0].abs() {
        i = 1;
    }
    if v[2].abs() < v[i].abs() {
        i = 2;
    }
    i
}

/// Estimate a plane normal for the mesh vertices.
///
/// Takes the two vertices furthest apart along the axis of greatest extent
/// and picks the third vertex giving the largest triangle with them. The
/// sign of the result is arbitrary; `check_orientation` fixes it up.
pub fn compute_normal(mesh: &Mesh) -> [Real; 3] {
    let mut verts = mesh.vertices();
    let Some(first) = verts.next() else {
        return [0.0, 0.0, 1.0];
    };

    let c0 = mesh.verts[first as usize].coords;
    let mut min_val = c0;
    let mut max_val = c0;
    let mut min_vert = [first; 3];
    let mut max_vert = [first; 3];

    for v in verts {
        let c = mesh.verts[v as usize].coords;
        for i in 0..3 {
            if c[i] < min_val[i] {
                min_val[i] = c[i];
                min_vert[i] = v;
            }
            if c[i] > max_val[i] {
                max_val[i] = c[i];
                max_vert[i] = v;
            }
        }
    }

    let mut i = 0;
    if max_val[1] - min_val[1] > max_val[0] - min_val[0] {
        i = 1;
    }
    if max_val[2] - min_val[2] > max_val[i] - min_val[i] {
        i = 2;
    }
    if min_val[i] >= max_val[i] {
        // All vertices coincide; any normal will do.
        return [0.0, 0.0, 1.0];
    }

    let c1 = mesh.verts[min_vert[i] as usize].coords;
    let c2 = mesh.verts[max_vert[i] as usize].coords;
    let d1 = sub(&c1, &c2);

    let mut norm = [0.0; 3];
    let mut max_len2 = 0.0;
    for v in mesh.vertices() {
        let d2 = sub(&mesh.verts[v as usize].coords, &c2);
        let tn = cross(&d1, &d2);
        let len2 = dot(&tn, &tn);
        if len2 > max_len2 {
            max_len2 = len2;
            norm = tn;
        }
    }

    if max_len2 <= 0.0 {
        // Collinear input: any normal perpendicular to the line.
        norm = [0.0; 3];
        norm[short_axis(&d1)] = 1.0;
    }
    norm
}

/// Flip t if the positively wound contours have negative signed area.
/// Must run before the sweep, while every face is still a single contour.
fn check_orientation(mesh: &mut Mesh) {
    let mut area = 0.0;
    for f in mesh.faces() {
        let an = mesh.faces[f as usize].an_edge;
        if mesh.edges[an as usize].winding <= 0 {
            continue;
        }
        for e in mesh.face_loop(f) {
            let (o, d) = (mesh.point(mesh.org(e)), mesh.point(mesh.dst(e)));
            area += (o.s - d.s) * (o.t + d.t);
        }
    }
    if area < 0.0 {
        let verts: Vec<_> = mesh.vertices().collect();
        for v in verts {
            let t = &mut mesh.verts[v as usize].t;
            *t = -*t;
        }
    }
}

/// Assign each vertex its (s, t) position in the plane perpendicular to
/// `normal`. A zero normal means "estimate one".
pub fn project_polygon(mesh: &mut Mesh, normal: [Real; 3]) {
    let computed = normal == [0.0; 3];
    let norm = if computed { compute_normal(mesh) } else { normal };

    let i = long_axis(&norm);
    let mut s_unit = [0.0; 3];
    let mut t_unit = [0.0; 3];
    s_unit[(i + 1) % 3] = 1.0;
    t_unit[(i + 2) % 3] = if norm[i] > 0.0 { 1.0 } else { -1.0 };

    let verts: Vec<_> = mesh.vertices().collect();
    for v in verts {
        let vert = &mut mesh.verts[v as usize];
        vert.s = dot(&vert.coords, &s_unit);
        vert.t = dot(&vert.coords, &t_unit);
    }
    if computed {
        check_orientation(mesh);
    }
}
