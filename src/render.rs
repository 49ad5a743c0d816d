// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess render.c
//
// Turns the triangulated interior of the mesh into primitives. Each
// unmarked interior face seeds a search for the largest fan or strip
// through it; faces that end up alone are collected on a trail and emitted
// together as one Triangles primitive at the end.

use std::f64::consts::TAU;

use crate::config::WindingRule;
use crate::geom::Real;
use crate::mesh::{EdgeIdx, FaceIdx, Mesh, INVALID};
use crate::visitor::Primitive;

/// Where rendered primitives go. Vertices are reported by data index.
pub(crate) trait PrimitiveSink {
    fn begin(&mut self, kind: Primitive);
    fn edge_flag(&mut self, boundary: bool);
    fn vertex(&mut self, data: u32);
    fn end(&mut self);
}

/// A vertex held back for the single-contour fast path.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CachedVertex {
    pub coords: [Real; 3],
    pub data: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupKind {
    Triangle,
    Fan,
    Strip,
}

#[derive(Clone, Copy, Debug)]
struct FaceGroup {
    size: usize,
    e_start: EdgeIdx,
    kind: GroupKind,
}

struct Renderer<'a, S: PrimitiveSink> {
    mesh: &'a mut Mesh,
    sink: &'a mut S,
    flag_boundary: bool,
    lonely: FaceIdx,
}

impl<S: PrimitiveSink> Renderer<'_, S> {
    #[inline]
    fn marked(&self, f: FaceIdx) -> bool {
        let face = &self.mesh.faces[f as usize];
        !face.inside || face.marked
    }

    #[inline]
    fn add_to_trail(&mut self, f: FaceIdx, trail: &mut FaceIdx) {
        let face = &mut self.mesh.faces[f as usize];
        face.trail = *trail;
        face.marked = true;
        *trail = f;
    }

    fn free_trail(&mut self, mut trail: FaceIdx) {
        while trail != INVALID {
            let face = &mut self.mesh.faces[trail as usize];
            face.marked = false;
            trail = face.trail;
        }
    }

    fn maximum_fan(&mut self, e_orig: EdgeIdx) -> FaceGroup {
        let mut size = 0;
        let mut trail = INVALID;

        let mut e = e_orig;
        while !self.marked(self.mesh.lface(e)) {
            self.add_to_trail(self.mesh.lface(e), &mut trail);
            size += 1;
            e = self.mesh.onext(e);
        }
        e = e_orig;
        while !self.marked(self.mesh.rface(e)) {
            self.add_to_trail(self.mesh.rface(e), &mut trail);
            size += 1;
            e = self.mesh.oprev(e);
        }

        self.free_trail(trail);
        FaceGroup {
            size,
            e_start: e,
            kind: GroupKind::Fan,
        }
    }

    fn maximum_strip(&mut self, e_orig: EdgeIdx) -> FaceGroup {
        let mut tail_size = 0;
        let mut head_size = 0;
        let mut trail = INVALID;

        let mut e = e_orig;
        while !self.marked(self.mesh.lface(e)) {
            self.add_to_trail(self.mesh.lface(e), &mut trail);
            tail_size += 1;
            e = self.mesh.dprev(e);
            if self.marked(self.mesh.lface(e)) {
                break;
            }
            self.add_to_trail(self.mesh.lface(e), &mut trail);
            tail_size += 1;
            e = self.mesh.onext(e);
        }
        let e_tail = e;

        e = e_orig;
        while !self.marked(self.mesh.rface(e)) {
            self.add_to_trail(self.mesh.rface(e), &mut trail);
            head_size += 1;
            e = self.mesh.oprev(e);
            if self.marked(self.mesh.rface(e)) {
                break;
            }
            self.add_to_trail(self.mesh.rface(e), &mut trail);
            head_size += 1;
            e = self.mesh.dnext(e);
        }
        let e_head = e;

        // A strip must start with an even number of triangles walked back.
        let mut size = tail_size + head_size;
        let e_start = if tail_size % 2 == 0 {
            e_tail ^ 1
        } else if head_size % 2 == 0 {
            e_head
        } else {
            size -= 1;
            self.mesh.onext(e_head)
        };

        self.free_trail(trail);
        FaceGroup {
            size,
            e_start,
            kind: GroupKind::Strip,
        }
    }

    fn render_maximum_face_group(&mut self, f_orig: FaceIdx) {
        let e = self.mesh.faces[f_orig as usize].an_edge;
        let mut best = FaceGroup {
            size: 1,
            e_start: e,
            kind: GroupKind::Triangle,
        };

        if !self.flag_boundary {
            let (lnext, lprev) = (self.mesh.lnext(e), self.mesh.lprev(e));
            for start in [e, lnext, lprev] {
                let group = self.maximum_fan(start);
                if group.size > best.size {
                    best = group;
                }
            }
            for start in [e, lnext, lprev] {
                let group = self.maximum_strip(start);
                if group.size > best.size {
                    best = group;
                }
            }
        }

        match best.kind {
            GroupKind::Triangle => {
                let f = self.mesh.lface(best.e_start);
                let mut trail = self.lonely;
                self.add_to_trail(f, &mut trail);
                self.lonely = trail;
            }
            GroupKind::Fan => self.render_fan(best.e_start),
            GroupKind::Strip => self.render_strip(best.e_start),
        }
    }

    fn render_fan(&mut self, mut e: EdgeIdx) {
        self.sink.begin(Primitive::TriangleFan);
        self.emit_org(e);
        self.emit_dst(e);
        while !self.marked(self.mesh.lface(e)) {
            let f = self.mesh.lface(e);
            self.mesh.faces[f as usize].marked = true;
            e = self.mesh.onext(e);
            self.emit_dst(e);
        }
        self.sink.end();
    }

    fn render_strip(&mut self, mut e: EdgeIdx) {
        self.sink.begin(Primitive::TriangleStrip);
        self.emit_org(e);
        self.emit_dst(e);
        while !self.marked(self.mesh.lface(e)) {
            let f = self.mesh.lface(e);
            self.mesh.faces[f as usize].marked = true;
            e = self.mesh.dprev(e);
            self.emit_org(e);
            if self.marked(self.mesh.lface(e)) {
                break;
            }
            let f = self.mesh.lface(e);
            self.mesh.faces[f as usize].marked = true;
            e = self.mesh.onext(e);
            self.emit_dst(e);
        }
        self.sink.end();
    }

    fn render_lonely_triangles(&mut self) {
        let mut f = self.lonely;
        if f == INVALID {
            return;
        }
        // Flags are sent only when the boundary status changes.
        let mut edge_state: Option<bool> = None;
        self.sink.begin(Primitive::Triangles);
        while f != INVALID {
            for e in self.mesh.face_loop(f) {
                if self.flag_boundary {
                    let boundary = !self.mesh.faces[self.mesh.rface(e) as usize].inside;
                    if edge_state != Some(boundary) {
                        edge_state = Some(boundary);
                        self.sink.edge_flag(boundary);
                    }
                }
                self.sink.vertex(self.mesh.verts[self.mesh.org(e) as usize].data);
            }
            f = self.mesh.faces[f as usize].trail;
        }
        self.sink.end();
        self.lonely = INVALID;
    }

    fn emit_org(&mut self, e: EdgeIdx) {
        let v = self.mesh.org(e);
        self.sink.vertex(self.mesh.verts[v as usize].data);
    }

    fn emit_dst(&mut self, e: EdgeIdx) {
        let v = self.mesh.dst(e);
        self.sink.vertex(self.mesh.verts[v as usize].data);
    }
}

/// Emit every interior face as fans, strips and leftover triangles.
///
/// With `flag_boundary` set, only independent triangles are produced and
/// each vertex is preceded (when the status changes) by an edge flag telling
/// whether the edge leaving it lies on a boundary.
pub(crate) fn render_mesh<S: PrimitiveSink>(mesh: &mut Mesh, sink: &mut S, flag_boundary: bool) {
    let faces: Vec<FaceIdx> = mesh.faces().collect();
    for &f in &faces {
        mesh.faces[f as usize].marked = false;
    }

    let mut r = Renderer {
        mesh,
        sink,
        flag_boundary,
        lonely: INVALID,
    };
    for &f in &faces {
        let face = &r.mesh.faces[f as usize];
        if face.inside && !face.marked {
            r.render_maximum_face_group(f);
            debug_assert!(r.mesh.faces[f as usize].marked);
        }
    }
    r.render_lonely_triangles();
}

/// Emit one line loop per interior face.
pub(crate) fn render_boundary<S: PrimitiveSink>(mesh: &Mesh, sink: &mut S) {
    for f in mesh.faces().filter(|&f| mesh.faces[f as usize].inside) {
        sink.begin(Primitive::LineLoop);
        for e in mesh.face_loop(f) {
            sink.vertex(mesh.verts[mesh.org(e) as usize].data);
        }
        sink.end();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FanSign {
    Degenerate,
    Positive,
    Negative,
    Inconsistent,
}

/// Accumulate the fan normal around the first vertex, flipping triangles
/// that face away from the running total.
fn fan_normal(cache: &[CachedVertex]) -> [Real; 3] {
    let mut norm = [0.0; 3];
    for (n, _) in fan_triangles(cache) {
        let sign = if dot(&n, &norm) >= 0.0 { 1.0 } else { -1.0 };
        for (acc, c) in norm.iter_mut().zip(n) {
            *acc += sign * c;
        }
    }
    norm
}

/// Check that every fan triangle faces the same way relative to `norm`,
/// and that the fan turns less than once around the first vertex.
///
/// With `reject_flat` set, a zero-area triangle makes the fan inconsistent:
/// the contour may fold back along a fan diagonal.
fn fan_sign(cache: &[CachedVertex], norm: &[Real; 3], reject_flat: bool) -> FanSign {
    let mut sign = FanSign::Degenerate;
    let mut turn = 0.0;
    for (n, spokes) in fan_triangles(cache) {
        let d = dot(&n, norm);
        if d == 0.0 && reject_flat {
            return FanSign::Inconsistent;
        }
        if d > 0.0 {
            if sign == FanSign::Negative {
                return FanSign::Inconsistent;
            }
            sign = FanSign::Positive;
        } else if d < 0.0 {
            if sign == FanSign::Positive {
                return FanSign::Inconsistent;
            }
            sign = FanSign::Negative;
        }
        turn += dot(&n, &n).sqrt().atan2(spokes);
    }
    // A fan that wraps around covers part of the plane twice.
    if turn >= TAU {
        return FanSign::Inconsistent;
    }
    sign
}

fn dot(a: &[Real; 3], b: &[Real; 3]) -> Real {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Normal and spoke dot product of each fan triangle around `cache[0]`.
fn fan_triangles(cache: &[CachedVertex]) -> impl Iterator<Item = ([Real; 3], Real)> + '_ {
    let v0 = cache[0].coords;
    let rel = move |c: &CachedVertex| [c.coords[0] - v0[0], c.coords[1] - v0[1], c.coords[2] - v0[2]];
    cache[1..].windows(2).map(move |w| {
        let p = rel(&w[0]);
        let c = rel(&w[1]);
        let n = [
            p[1] * c[2] - p[2] * c[1],
            p[2] * c[0] - p[0] * c[2],
            p[0] * c[1] - p[1] * c[0],
        ];
        (n, dot(&p, &c))
    })
}

/// Fast path for a single contour that forms a consistently oriented fan
/// around its first vertex (every convex polygon does).
///
/// Returns false when the contour needs the full sweep. Returns true when
/// it was handled, including the cases that produce no output.
pub(crate) fn render_cache<S: PrimitiveSink>(
    cache: &[CachedVertex],
    normal: [Real; 3],
    rule: WindingRule,
    boundary_only: bool,
    sink: &mut S,
) -> bool {
    if cache.len() < 3 {
        // Degenerate contour.
        return true;
    }

    let norm = if normal == [0.0; 3] { fan_normal(cache) } else { normal };
    let sign = match fan_sign(cache, &norm, cache.len() > 3) {
        FanSign::Inconsistent => return false,
        // A single flat triangle.
        FanSign::Degenerate => return true,
        s => s,
    };

    let emit = match rule {
        WindingRule::Odd | WindingRule::NonZero => true,
        WindingRule::Positive => sign == FanSign::Positive,
        WindingRule::Negative => sign == FanSign::Negative,
        WindingRule::AbsGeqTwo => false,
    };
    if !emit {
        return true;
    }

    let kind = if boundary_only {
        Primitive::LineLoop
    } else if cache.len() > 3 {
        Primitive::TriangleFan
    } else {
        Primitive::Triangles
    };
    sink.begin(kind);
    sink.vertex(cache[0].data);
    if sign == FanSign::Positive {
        for v in &cache[1..] {
            sink.vertex(v.data);
        }
    } else {
        for v in cache[1..].iter().rev() {
            sink.vertex(v.data);
        }
    }
    sink.end();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Record {
        prims: Vec<(Primitive, Vec<u32>)>,
        flags: Vec<bool>,
    }

    impl PrimitiveSink for Record {
        fn begin(&mut self, kind: Primitive) {
            self.prims.push((kind, Vec::new()));
        }
        fn edge_flag(&mut self, boundary: bool) {
            self.flags.push(boundary);
        }
        fn vertex(&mut self, data: u32) {
            self.prims.last_mut().unwrap().1.push(data);
        }
        fn end(&mut self) {}
    }

    fn cache(pts: &[(Real, Real)]) -> Vec<CachedVertex> {
        pts.iter()
            .enumerate()
            .map(|(i, &(x, y))| CachedVertex {
                coords: [x, y, 0.0],
                data: i as u32,
            })
            .collect()
    }

    const SQUARE: [(Real, Real); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

    #[test]
    fn cache_square_is_one_fan() {
        let mut rec = Record::default();
        assert!(render_cache(&cache(&SQUARE), [0.0; 3], WindingRule::Odd, false, &mut rec));
        assert_eq!(rec.prims, vec![(Primitive::TriangleFan, vec![0, 1, 2, 3])]);
    }

    #[test]
    fn cache_triangle_and_boundary() {
        let tri = cache(&SQUARE[..3]);
        let mut rec = Record::default();
        assert!(render_cache(&tri, [0.0; 3], WindingRule::Odd, false, &mut rec));
        assert_eq!(rec.prims[0].0, Primitive::Triangles);

        let mut rec = Record::default();
        assert!(render_cache(&cache(&SQUARE), [0.0; 3], WindingRule::Odd, true, &mut rec));
        assert_eq!(rec.prims, vec![(Primitive::LineLoop, vec![0, 1, 2, 3])]);
    }

    #[test]
    fn cache_respects_normal_and_rule() {
        // Clockwise seen from +z.
        let mut rec = Record::default();
        assert!(render_cache(&cache(&SQUARE), [0.0, 0.0, -1.0], WindingRule::Positive, false, &mut rec));
        assert!(rec.prims.is_empty());

        assert!(render_cache(&cache(&SQUARE), [0.0, 0.0, -1.0], WindingRule::Negative, false, &mut rec));
        assert_eq!(rec.prims, vec![(Primitive::TriangleFan, vec![0, 3, 2, 1])]);

        let mut rec = Record::default();
        assert!(render_cache(&cache(&SQUARE), [0.0; 3], WindingRule::AbsGeqTwo, false, &mut rec));
        assert!(rec.prims.is_empty());
    }

    #[test]
    fn cache_rejects_bowtie_and_skips_degenerate() {
        let bowtie = cache(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        let mut rec = Record::default();
        assert!(!render_cache(&bowtie, [0.0; 3], WindingRule::Odd, false, &mut rec));

        let line = cache(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(render_cache(&line[..3], [0.0; 3], WindingRule::Odd, false, &mut rec));
        assert!(render_cache(&line[..2], [0.0; 3], WindingRule::Odd, false, &mut rec));
        assert!(rec.prims.is_empty());
        // Longer flat runs go to the sweep.
        assert!(!render_cache(&line, [0.0; 3], WindingRule::Odd, false, &mut rec));
    }

    #[test]
    fn cache_rejects_fan_with_a_flat_triangle() {
        // Folds back over (3, 4): every non-flat fan triangle agrees in sign.
        let folded = cache(&[
            (1.0, 4.0),
            (3.0, 4.0),
            (0.0, 4.0),
            (5.0, 0.0),
            (4.0, 3.0),
            (1.0, 5.0),
            (0.0, 0.0),
            (3.0, 4.0),
            (3.0, 4.0),
        ]);
        let mut rec = Record::default();
        for rule in [WindingRule::Odd, WindingRule::AbsGeqTwo] {
            assert!(!render_cache(&folded, [0.0; 3], rule, false, &mut rec));
        }
        assert!(rec.prims.is_empty());

        // Midpoints on the sides also leave the fast path.
        let square = cache(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert!(!render_cache(&square, [0.0; 3], WindingRule::Odd, false, &mut rec));
    }

    #[test]
    fn cache_rejects_fan_that_wraps_around() {
        // Every triangle turns 100 degrees counter-clockwise; the fan covers
        // 500 degrees around the origin.
        let mut pts = vec![(0.0, 0.0)];
        pts.extend((0..6).map(|i| {
            let a = (100.0 * i as Real).to_radians();
            (2.0 * a.cos(), 2.0 * a.sin())
        }));
        let spiral = cache(&pts);
        let mut rec = Record::default();
        assert!(!render_cache(&spiral, [0.0; 3], WindingRule::Odd, false, &mut rec));
        assert!(!render_cache(&spiral, [0.0, 0.0, 1.0], WindingRule::NonZero, false, &mut rec));

        // Five of them stay within one turn.
        assert!(render_cache(&spiral[..5], [0.0, 0.0, 1.0], WindingRule::NonZero, false, &mut rec));
        assert_eq!(rec.prims.len(), 1);
    }
}
