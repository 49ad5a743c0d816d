// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess mesh.c/h and tessmono.c
//
// The mesh is a half-edge data structure (similar to Guibas/Stolfi quad-edge).
// All pointers from the C code are replaced with u32 indices into Vec arenas.
//
// Design:
//   - INVALID: u32::MAX  (null pointer equivalent)
//   - Half-edges allocated in pairs: edges[i] and edges[i^1] are always a pair.
//     sym(e) = e ^ 1.  Even index = e, odd index = eSym.
//   - Sentinel/dummy nodes:
//     - verts[0] = vHead (dummy vertex)
//     - faces[0] = fHead (dummy face)
//     - edges[0] = eHead, edges[1] = eHeadSym (dummy edge pair)
//   - Deleted records stay in their arena, unlinked from the live lists.
//
// Every operation that creates records reserves its arena space up front, so
// an allocation failure leaves the mesh untouched.

use crate::error::{TessError, TessResult};
use crate::geom::{edge_sign, vert_leq, Point, Real};

pub const INVALID: u32 = u32::MAX;

/// Index into Mesh::verts
pub type VertIdx = u32;
/// Index into Mesh::faces
pub type FaceIdx = u32;
/// Index into Mesh::edges
pub type EdgeIdx = u32;

/// Compute the symmetric half-edge index (always the other half of the pair).
#[inline(always)]
pub fn sym(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub next: VertIdx,
    pub prev: VertIdx,
    /// A half-edge with this vertex as origin.
    pub an_edge: EdgeIdx,
    /// Caller coordinates.
    pub coords: [Real; 3],
    /// Projected position.
    pub s: Real,
    pub t: Real,
    /// Priority queue handle; zero when not queued.
    pub pq_handle: i32,
    /// Index of the caller's vertex data in the session's data store.
    pub data: u32,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            next: INVALID,
            prev: INVALID,
            an_edge: INVALID,
            coords: [0.0; 3],
            s: 0.0,
            t: 0.0,
            pq_handle: 0,
            data: INVALID,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub next: FaceIdx,
    pub prev: FaceIdx,
    pub an_edge: EdgeIdx,
    /// Stack link used while rendering.
    pub trail: FaceIdx,
    pub marked: bool,
    /// Region lies inside the polygon under the current winding rule.
    pub inside: bool,
}

impl Default for Face {
    fn default() -> Self {
        Self {
            next: INVALID,
            prev: INVALID,
            an_edge: INVALID,
            trail: INVALID,
            marked: false,
            inside: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Next in the global edge list (even-indexed edges link to even-indexed edges,
    /// odd-indexed edges link to odd-indexed edges).
    pub next: EdgeIdx,
    /// Next edge CCW around the origin vertex.
    pub onext: EdgeIdx,
    /// Next edge CCW around the left face.
    pub lnext: EdgeIdx,
    /// Origin vertex index.
    pub org: VertIdx,
    /// Left face index.
    pub lface: FaceIdx,
    /// Active region index (INVALID if not in the edge dictionary).
    pub active_region: u32,
    /// Winding number change when crossing this edge from right to left.
    pub winding: i32,
}

impl Default for HalfEdge {
    fn default() -> Self {
        Self {
            next: INVALID,
            onext: INVALID,
            lnext: INVALID,
            org: INVALID,
            lface: INVALID,
            active_region: INVALID,
            winding: 0,
        }
    }
}

/// The half-edge mesh.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub verts: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub edges: Vec<HalfEdge>,
}

// ──────────────────────────────── Sentinel indices ────────────────────────────
pub const V_HEAD: VertIdx = 0;
pub const F_HEAD: FaceIdx = 0;
pub const E_HEAD: EdgeIdx = 0;
pub const E_HEAD_SYM: EdgeIdx = 1;

#[inline]
fn grow<T>(arena: &mut Vec<T>, additional: usize) -> TessResult<()> {
    arena
        .try_reserve(additional)
        .map_err(|_| TessError::OutOfMemory)
}

impl Mesh {
    /// Create a new empty mesh with dummy sentinel nodes.
    pub fn new() -> Self {
        let v_head = Vertex {
            next: V_HEAD,
            prev: V_HEAD,
            ..Vertex::default()
        };
        let f_head = Face {
            next: F_HEAD,
            prev: F_HEAD,
            ..Face::default()
        };
        let e_head = HalfEdge {
            next: E_HEAD,
            ..HalfEdge::default()
        };
        let e_head_sym = HalfEdge {
            next: E_HEAD_SYM,
            ..HalfEdge::default()
        };
        Mesh {
            verts: vec![v_head],
            faces: vec![f_head],
            edges: vec![e_head, e_head_sym],
        }
    }

    // ──────────────── Navigation helpers (C macro translations) ────────────────

    #[inline]
    pub fn org(&self, e: EdgeIdx) -> VertIdx {
        self.edges[e as usize].org
    }

    /// Destination vertex of e (= org of Sym).
    #[inline]
    pub fn dst(&self, e: EdgeIdx) -> VertIdx {
        self.edges[(e ^ 1) as usize].org
    }

    #[inline]
    pub fn lface(&self, e: EdgeIdx) -> FaceIdx {
        self.edges[e as usize].lface
    }

    /// Right face of e (= lface of Sym).
    #[inline]
    pub fn rface(&self, e: EdgeIdx) -> FaceIdx {
        self.edges[(e ^ 1) as usize].lface
    }

    #[inline]
    pub fn onext(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].onext
    }

    #[inline]
    pub fn lnext(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].lnext
    }

    /// Oprev: Sym->Lnext
    #[inline]
    pub fn oprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[(e ^ 1) as usize].lnext
    }

    /// Lprev: Onext->Sym
    #[inline]
    pub fn lprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].onext ^ 1
    }

    /// Dprev: Lnext->Sym
    #[inline]
    pub fn dprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].lnext ^ 1
    }

    /// Rprev: Sym->Onext
    #[inline]
    pub fn rprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[(e ^ 1) as usize].onext
    }

    /// Dnext: Rprev->Sym
    #[inline]
    pub fn dnext(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[(e ^ 1) as usize].onext ^ 1
    }

    /// Projected position of a vertex.
    #[inline]
    pub fn point(&self, v: VertIdx) -> Point {
        let vx = &self.verts[v as usize];
        Point::new(vx.s, vx.t)
    }

    /// EdgeGoesLeft: VertLeq(Dst, Org)
    #[inline]
    pub fn edge_goes_left(&self, e: EdgeIdx) -> bool {
        vert_leq(self.point(self.dst(e)), self.point(self.org(e)))
    }

    /// EdgeGoesRight: VertLeq(Org, Dst)
    #[inline]
    pub fn edge_goes_right(&self, e: EdgeIdx) -> bool {
        vert_leq(self.point(self.org(e)), self.point(self.dst(e)))
    }

    // ──────────────────────────────── Iteration ──────────────────────────────

    /// Live vertices in list order.
    pub fn vertices(&self) -> impl Iterator<Item = VertIdx> + '_ {
        let mut v = self.verts[V_HEAD as usize].next;
        std::iter::from_fn(move || {
            if v == V_HEAD {
                return None;
            }
            let cur = v;
            v = self.verts[v as usize].next;
            Some(cur)
        })
    }

    /// Live faces in list order.
    pub fn faces(&self) -> impl Iterator<Item = FaceIdx> + '_ {
        let mut f = self.faces[F_HEAD as usize].next;
        std::iter::from_fn(move || {
            if f == F_HEAD {
                return None;
            }
            let cur = f;
            f = self.faces[f as usize].next;
            Some(cur)
        })
    }

    /// One half-edge of every live edge pair.
    pub fn edge_pairs(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        let mut e = self.edges[E_HEAD as usize].next;
        std::iter::from_fn(move || {
            if e == E_HEAD {
                return None;
            }
            let cur = e;
            e = self.edges[e as usize].next;
            Some(cur)
        })
    }

    /// The half-edges bounding a face, following `lnext`.
    pub fn face_loop(&self, f: FaceIdx) -> impl Iterator<Item = EdgeIdx> + '_ {
        let start = self.faces[f as usize].an_edge;
        let mut e = start;
        let mut done = start == INVALID;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let cur = e;
            e = self.edges[e as usize].lnext;
            done = e == start;
            Some(cur)
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    pub fn face_count(&self) -> usize {
        self.faces().count()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_pairs().count()
    }

    // ──────────────────────── Private allocation helpers ─────────────────────

    /// Allocate a new half-edge pair.  Returns the index of `e` (even); sym is `e ^ 1`.
    /// The new pair is inserted in the global edge list before `e_next`.
    fn make_edge_pair(&mut self, e_next: EdgeIdx) -> EdgeIdx {
        let e_next = e_next & !1;
        let e_new = self.edges.len() as EdgeIdx;
        let e_sym = e_new ^ 1;

        // ePrev = eNext->Sym->next
        let e_prev = self.edges[(e_next ^ 1) as usize].next;

        self.edges.push(HalfEdge {
            next: e_next,
            onext: e_new,
            lnext: e_sym,
            ..HalfEdge::default()
        });
        self.edges.push(HalfEdge {
            next: e_prev,
            onext: e_sym,
            lnext: e_new,
            ..HalfEdge::default()
        });

        self.edges[(e_prev ^ 1) as usize].next = e_new;
        self.edges[(e_next ^ 1) as usize].next = e_sym;

        e_new
    }

    /// Allocate a new vertex and insert it before `v_next` in the vertex list.
    fn make_vertex(&mut self, e_orig: EdgeIdx, v_next: VertIdx) -> VertIdx {
        let v_new = self.verts.len() as VertIdx;
        let v_prev = self.verts[v_next as usize].prev;

        self.verts.push(Vertex {
            prev: v_prev,
            next: v_next,
            an_edge: e_orig,
            ..Vertex::default()
        });
        self.verts[v_prev as usize].next = v_new;
        self.verts[v_next as usize].prev = v_new;

        let mut e = e_orig;
        loop {
            self.edges[e as usize].org = v_new;
            e = self.edges[e as usize].onext;
            if e == e_orig {
                break;
            }
        }
        v_new
    }

    /// Allocate a new face and insert it before `f_next` in the face list.
    /// The new face inherits `inside` from `f_next`.
    fn make_face(&mut self, e_orig: EdgeIdx, f_next: FaceIdx) -> FaceIdx {
        let f_new = self.faces.len() as FaceIdx;
        let f_prev = self.faces[f_next as usize].prev;
        let inside = self.faces[f_next as usize].inside;

        self.faces.push(Face {
            prev: f_prev,
            next: f_next,
            an_edge: e_orig,
            inside,
            ..Face::default()
        });
        self.faces[f_prev as usize].next = f_new;
        self.faces[f_next as usize].prev = f_new;

        let mut e = e_orig;
        loop {
            self.edges[e as usize].lface = f_new;
            e = self.edges[e as usize].lnext;
            if e == e_orig {
                break;
            }
        }
        f_new
    }

    /// Unlink a vertex and re-point its origin ring at `new_org`.
    fn kill_vertex(&mut self, v_del: VertIdx, new_org: VertIdx) {
        let e_start = self.verts[v_del as usize].an_edge;
        let mut e = e_start;
        loop {
            self.edges[e as usize].org = new_org;
            e = self.edges[e as usize].onext;
            if e == e_start {
                break;
            }
        }

        let v_prev = self.verts[v_del as usize].prev;
        let v_next = self.verts[v_del as usize].next;
        self.verts[v_next as usize].prev = v_prev;
        self.verts[v_prev as usize].next = v_next;

        let v = &mut self.verts[v_del as usize];
        v.next = INVALID;
        v.prev = INVALID;
        v.an_edge = INVALID;
    }

    /// Unlink a face and re-point its edge loop at `new_lface`.
    fn kill_face(&mut self, f_del: FaceIdx, new_lface: FaceIdx) {
        let e_start = self.faces[f_del as usize].an_edge;
        let mut e = e_start;
        loop {
            self.edges[e as usize].lface = new_lface;
            e = self.edges[e as usize].lnext;
            if e == e_start {
                break;
            }
        }

        let f_prev = self.faces[f_del as usize].prev;
        let f_next = self.faces[f_del as usize].next;
        self.faces[f_next as usize].prev = f_prev;
        self.faces[f_prev as usize].next = f_next;

        let f = &mut self.faces[f_del as usize];
        f.next = INVALID;
        f.prev = INVALID;
        f.an_edge = INVALID;
    }

    /// Unlink an edge pair from the global edge list.
    fn kill_edge(&mut self, e_del: EdgeIdx) {
        let e_del = e_del & !1;
        let e_next = self.edges[e_del as usize].next;
        let e_prev = self.edges[(e_del ^ 1) as usize].next;
        self.edges[(e_next ^ 1) as usize].next = e_prev;
        self.edges[(e_prev ^ 1) as usize].next = e_next;

        self.edges[e_del as usize].next = INVALID;
        self.edges[(e_del ^ 1) as usize].next = INVALID;
    }

    /// Exchanges a->Onext and b->Onext, fixing the Lnext pointers.
    fn raw_splice(&mut self, a: EdgeIdx, b: EdgeIdx) {
        let a_onext = self.edges[a as usize].onext;
        let b_onext = self.edges[b as usize].onext;
        self.edges[(a_onext ^ 1) as usize].lnext = b;
        self.edges[(b_onext ^ 1) as usize].lnext = a;
        self.edges[a as usize].onext = b_onext;
        self.edges[b as usize].onext = a_onext;
    }

    // ──────────────────────── Public mesh operations ──────────────────────────

    /// __gl_meshMakeEdge: one edge, two vertices and a single loop.
    pub fn make_edge(&mut self) -> TessResult<EdgeIdx> {
        grow(&mut self.edges, 2)?;
        grow(&mut self.verts, 2)?;
        grow(&mut self.faces, 1)?;

        let e = self.make_edge_pair(E_HEAD);
        self.make_vertex(e, V_HEAD);
        self.make_vertex(e ^ 1, V_HEAD);
        self.make_face(e, F_HEAD);
        Ok(e)
    }

    /// __gl_meshSplice: exchanges eOrg->Onext and eDst->Onext.
    ///
    /// If the two origins differ they are merged into `e_org`'s origin,
    /// otherwise the ring is split and a new vertex created. Faces are
    /// joined or split the same way.
    pub fn splice(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) -> TessResult<()> {
        if e_org == e_dst {
            return Ok(());
        }
        grow(&mut self.verts, 1)?;
        grow(&mut self.faces, 1)?;

        let mut joining_vertices = false;
        let mut joining_loops = false;

        if self.org(e_dst) != self.org(e_org) {
            joining_vertices = true;
            self.kill_vertex(self.org(e_dst), self.org(e_org));
        }
        if self.lface(e_dst) != self.lface(e_org) {
            joining_loops = true;
            self.kill_face(self.lface(e_dst), self.lface(e_org));
        }

        self.raw_splice(e_dst, e_org);

        if !joining_vertices {
            let org = self.org(e_org);
            self.make_vertex(e_dst, org);
            self.verts[org as usize].an_edge = e_org;
        }
        if !joining_loops {
            let lface = self.lface(e_org);
            self.make_face(e_dst, lface);
            self.faces[lface as usize].an_edge = e_org;
        }
        Ok(())
    }

    /// __gl_meshDelete: remove edge `e_del`, joining or splitting faces and
    /// discarding vertices left without edges.
    pub fn delete_edge(&mut self, e_del: EdgeIdx) -> TessResult<()> {
        grow(&mut self.faces, 1)?;
        let e_del_sym = e_del ^ 1;
        let mut joining_loops = false;

        if self.lface(e_del) != self.rface(e_del) {
            joining_loops = true;
            self.kill_face(self.lface(e_del), self.rface(e_del));
        }

        if self.onext(e_del) == e_del {
            self.kill_vertex(self.org(e_del), INVALID);
        } else {
            let rface = self.rface(e_del);
            self.faces[rface as usize].an_edge = self.oprev(e_del);
            let org = self.org(e_del);
            self.verts[org as usize].an_edge = self.onext(e_del);

            self.raw_splice(e_del, self.oprev(e_del));
            if !joining_loops {
                let lface = self.lface(e_del);
                self.make_face(e_del, lface);
            }
        }

        if self.onext(e_del_sym) == e_del_sym {
            self.kill_vertex(self.org(e_del_sym), INVALID);
            self.kill_face(self.lface(e_del_sym), INVALID);
        } else {
            let lface = self.lface(e_del);
            self.faces[lface as usize].an_edge = self.oprev(e_del_sym);
            let org = self.org(e_del_sym);
            self.verts[org as usize].an_edge = self.onext(e_del_sym);
            self.raw_splice(e_del_sym, self.oprev(e_del_sym));
        }

        self.kill_edge(e_del);
        Ok(())
    }

    /// __gl_meshAddEdgeVertex: new edge eNew = eOrg->Lnext whose destination
    /// is a new vertex. eOrg and eNew share the same left face.
    pub fn add_edge_vertex(&mut self, e_org: EdgeIdx) -> TessResult<EdgeIdx> {
        grow(&mut self.edges, 2)?;
        grow(&mut self.verts, 1)?;

        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = e_new ^ 1;

        self.raw_splice(e_new, self.lnext(e_org));

        let org = self.dst(e_org);
        self.edges[e_new as usize].org = org;
        self.make_vertex(e_new_sym, org);

        let lface = self.lface(e_org);
        self.edges[e_new as usize].lface = lface;
        self.edges[e_new_sym as usize].lface = lface;
        Ok(e_new)
    }

    /// __gl_meshSplitEdge: split eOrg into eOrg and eNew = eOrg->Lnext,
    /// with a new vertex between them. Winding values carry over.
    pub fn split_edge(&mut self, e_org: EdgeIdx) -> TessResult<EdgeIdx> {
        let temp = self.add_edge_vertex(e_org)?;
        let e_new = temp ^ 1;
        let e_org_sym = e_org ^ 1;

        self.raw_splice(e_org_sym, self.oprev(e_org_sym));
        self.raw_splice(e_org_sym, e_new);

        let new_org = self.org(e_new);
        self.edges[e_org_sym as usize].org = new_org;
        let new_dst = self.dst(e_new);
        self.verts[new_dst as usize].an_edge = e_new ^ 1;
        let rface = self.rface(e_org);
        self.edges[(e_new ^ 1) as usize].lface = rface;

        self.edges[e_new as usize].winding = self.edges[e_org as usize].winding;
        self.edges[(e_new ^ 1) as usize].winding = self.edges[e_org_sym as usize].winding;
        Ok(e_new)
    }

    /// __gl_meshConnect: new edge from eOrg->Dst to eDst->Org.
    ///
    /// When both edges share a left face the face is split and the new face
    /// lies to the left of the returned edge.
    pub fn connect(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) -> TessResult<EdgeIdx> {
        grow(&mut self.edges, 2)?;
        grow(&mut self.faces, 1)?;

        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = e_new ^ 1;
        let mut joining_loops = false;

        if self.lface(e_dst) != self.lface(e_org) {
            joining_loops = true;
            self.kill_face(self.lface(e_dst), self.lface(e_org));
        }

        self.raw_splice(e_new, self.lnext(e_org));
        self.raw_splice(e_new_sym, e_dst);

        self.edges[e_new as usize].org = self.dst(e_org);
        self.edges[e_new_sym as usize].org = self.org(e_dst);
        let lface = self.lface(e_org);
        self.edges[e_new as usize].lface = lface;
        self.edges[e_new_sym as usize].lface = lface;

        self.faces[lface as usize].an_edge = e_new_sym;

        if !joining_loops {
            self.make_face(e_new, lface);
        }
        Ok(e_new)
    }

    /// __gl_meshZapFace: remove a face. Edges whose other side is also
    /// faceless are deleted, along with any vertex they leave isolated.
    pub fn zap_face(&mut self, f_zap: FaceIdx) {
        let e_start = self.faces[f_zap as usize].an_edge;
        let mut e_next = self.lnext(e_start);
        loop {
            let e = e_next;
            e_next = self.lnext(e);

            self.edges[e as usize].lface = INVALID;
            if self.rface(e) == INVALID {
                if self.onext(e) == e {
                    self.kill_vertex(self.org(e), INVALID);
                } else {
                    let org = self.org(e);
                    self.verts[org as usize].an_edge = self.onext(e);
                    self.raw_splice(e, self.oprev(e));
                }
                let e_sym = e ^ 1;
                if self.onext(e_sym) == e_sym {
                    self.kill_vertex(self.org(e_sym), INVALID);
                } else {
                    let org = self.org(e_sym);
                    self.verts[org as usize].an_edge = self.onext(e_sym);
                    self.raw_splice(e_sym, self.oprev(e_sym));
                }
                self.kill_edge(e);
            }
            if e == e_start {
                break;
            }
        }

        let f_prev = self.faces[f_zap as usize].prev;
        let f_next = self.faces[f_zap as usize].next;
        self.faces[f_next as usize].prev = f_prev;
        self.faces[f_prev as usize].next = f_next;
        let f = &mut self.faces[f_zap as usize];
        f.next = INVALID;
        f.prev = INVALID;
        f.an_edge = INVALID;
    }

    // ──────────────────────── Post-sweep passes ────────────────────────────

    /// Triangulate one x-monotone face (__gl_meshTessellateMonoRegion).
    ///
    /// The face must have at least three edges. Triangles are cut off from
    /// the left end, walking the upper and lower chains together.
    pub fn tessellate_mono_region(&mut self, face: FaceIdx) -> TessResult<()> {
        let mut up = self.faces[face as usize].an_edge;
        debug_assert!(self.lnext(up) != up && self.lnext(self.lnext(up)) != up);

        while vert_leq(self.point(self.dst(up)), self.point(self.org(up))) {
            up = self.lprev(up);
        }
        while vert_leq(self.point(self.org(up)), self.point(self.dst(up))) {
            up = self.lnext(up);
        }
        let mut lo = self.lprev(up);

        while self.lnext(up) != lo {
            if vert_leq(self.point(self.dst(up)), self.point(self.org(lo))) {
                // up->Dst is on the left; make triangles from lo->Org.
                while self.lnext(lo) != up {
                    let lo_lnext = self.lnext(lo);
                    let convex = self.edge_goes_left(lo_lnext)
                        || edge_sign(
                            self.point(self.org(lo)),
                            self.point(self.dst(lo)),
                            self.point(self.dst(lo_lnext)),
                        ) <= 0.0;
                    if !convex {
                        break;
                    }
                    lo = self.connect(lo_lnext, lo)? ^ 1;
                }
                lo = self.lprev(lo);
            } else {
                // lo->Org is on the left; make triangles from up->Dst.
                while self.lnext(lo) != up {
                    let up_lprev = self.lprev(up);
                    let convex = self.edge_goes_right(up_lprev)
                        || edge_sign(
                            self.point(self.dst(up)),
                            self.point(self.org(up)),
                            self.point(self.org(up_lprev)),
                        ) >= 0.0;
                    if !convex {
                        break;
                    }
                    up = self.connect(up, up_lprev)? ^ 1;
                }
                up = self.lnext(up);
            }
        }

        debug_assert!(self.lnext(lo) != up);
        while self.lnext(self.lnext(lo)) != up {
            lo = self.connect(self.lnext(lo), lo)? ^ 1;
        }
        Ok(())
    }

    /// Triangulate every interior face.
    pub fn tessellate_interior(&mut self) -> TessResult<()> {
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            // Faces created here are inserted before `f`, so `next` stays valid.
            let next = self.faces[f as usize].next;
            if self.faces[f as usize].inside {
                self.tessellate_mono_region(f)?;
            }
            f = next;
        }
        Ok(())
    }

    /// Zap every face not marked inside.
    pub fn discard_exterior(&mut self) {
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            let next = self.faces[f as usize].next;
            if !self.faces[f as usize].inside {
                self.zap_face(f);
            }
            f = next;
        }
    }

    /// Give boundary edges winding `value` (positive on the interior side)
    /// and interior edges winding 0, or delete the latter when
    /// `keep_only_boundary` is set.
    pub fn set_winding_number(&mut self, value: i32, keep_only_boundary: bool) -> TessResult<()> {
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let e_next = self.edges[e as usize].next;
            let l_inside = self.faces[self.lface(e) as usize].inside;
            let r_inside = self.faces[self.rface(e) as usize].inside;
            if l_inside != r_inside {
                self.edges[e as usize].winding = if l_inside { value } else { -value };
            } else if !keep_only_boundary {
                self.edges[e as usize].winding = 0;
            } else {
                self.delete_edge(e)?;
            }
            e = e_next;
        }
        Ok(())
    }

    // ──────────────────────────── Consistency ──────────────────────────────

    /// Verify the topological invariants of every live record
    /// (__gl_meshCheckMesh). Faceless edges left by `zap_face` are allowed.
    pub fn check(&self) -> Result<(), String> {
        let ensure = |cond: bool, what: &str, idx: u32| -> Result<(), String> {
            if cond {
                Ok(())
            } else {
                Err(format!("{what} (record {idx})"))
            }
        };

        let mut f_prev = F_HEAD;
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            ensure(f != INVALID, "face list broken", f_prev)?;
            ensure(self.faces[f as usize].prev == f_prev, "face prev link", f)?;
            let start = self.faces[f as usize].an_edge;
            ensure(start != INVALID, "face without edge", f)?;
            let mut e = start;
            let mut steps = 0usize;
            loop {
                self.check_edge_links(e)?;
                ensure(self.lface(e) == f, "edge lface mismatch", e)?;
                e = self.lnext(e);
                steps += 1;
                ensure(steps <= self.edges.len(), "face loop does not close", f)?;
                if e == start {
                    break;
                }
            }
            f_prev = f;
            f = self.faces[f as usize].next;
        }
        ensure(self.faces[F_HEAD as usize].prev == f_prev, "face head prev", F_HEAD)?;

        let mut v_prev = V_HEAD;
        let mut v = self.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            ensure(v != INVALID, "vertex list broken", v_prev)?;
            ensure(self.verts[v as usize].prev == v_prev, "vertex prev link", v)?;
            let start = self.verts[v as usize].an_edge;
            ensure(start != INVALID, "vertex without edge", v)?;
            let mut e = start;
            let mut steps = 0usize;
            loop {
                self.check_edge_links(e)?;
                ensure(self.org(e) == v, "edge org mismatch", e)?;
                e = self.onext(e);
                steps += 1;
                ensure(steps <= self.edges.len(), "vertex ring does not close", v)?;
                if e == start {
                    break;
                }
            }
            v_prev = v;
            v = self.verts[v as usize].next;
        }
        ensure(self.verts[V_HEAD as usize].prev == v_prev, "vertex head prev", V_HEAD)?;

        let mut e_prev = E_HEAD;
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            ensure(e != INVALID, "edge list broken", e_prev)?;
            ensure(self.edges[(e ^ 1) as usize].next == e_prev ^ 1, "edge prev link", e)?;
            ensure(self.org(e) != INVALID && self.dst(e) != INVALID, "edge without endpoints", e)?;
            self.check_edge_links(e)?;
            e_prev = e;
            e = self.edges[e as usize].next;
        }
        ensure(
            self.edges[E_HEAD_SYM as usize].next == e_prev ^ 1,
            "edge head prev",
            E_HEAD,
        )?;
        Ok(())
    }

    fn check_edge_links(&self, e: EdgeIdx) -> Result<(), String> {
        if self.onext(self.lnext(e)) ^ 1 != e {
            return Err(format!("lnext/onext mismatch (record {e})"));
        }
        if self.lnext(self.onext(e) ^ 1) != e {
            return Err(format!("onext/lnext mismatch (record {e})"));
        }
        Ok(())
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_pos(m: &mut Mesh, v: VertIdx, s: Real, t: Real) {
        m.verts[v as usize].s = s;
        m.verts[v as usize].t = t;
        m.verts[v as usize].coords = [s, t, 0.0];
    }

    /// Closed contour through the given points, the way the tessellator
    /// builds one from `add_vertex` calls.
    fn contour(m: &mut Mesh, pts: &[(Real, Real)]) -> EdgeIdx {
        let mut last = INVALID;
        for &(s, t) in pts {
            let e = if last == INVALID {
                let e = m.make_edge().unwrap();
                m.splice(e, e ^ 1).unwrap();
                e
            } else {
                m.split_edge(last).unwrap();
                m.lnext(last)
            };
            let org = m.org(e);
            set_pos(m, org, s, t);
            m.edges[e as usize].winding = 1;
            m.edges[(e ^ 1) as usize].winding = -1;
            last = e;
        }
        last
    }

    #[test]
    fn make_edge_creates_single_edge() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        assert_eq!(m.vertex_count(), 2);
        assert_eq!(m.face_count(), 1);
        assert_eq!(m.edge_count(), 1);
        assert_eq!(m.lface(e), m.rface(e));
        assert_ne!(m.org(e), m.dst(e));
        m.check().unwrap();
    }

    #[test]
    fn sym_involution() {
        for e in [0u32, 1, 2, 3, 100, 101] {
            assert_eq!(sym(sym(e)), e);
            assert_ne!(sym(e), e);
        }
    }

    #[test]
    fn self_splice_makes_a_loop() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        m.splice(e, e ^ 1).unwrap();
        assert_eq!(m.vertex_count(), 1);
        assert_eq!(m.face_count(), 2);
        assert_eq!(m.org(e), m.dst(e));
        m.check().unwrap();
    }

    #[test]
    fn contour_has_two_faces() {
        let mut m = Mesh::new();
        contour(&mut m, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.edge_count(), 4);
        assert_eq!(m.face_count(), 2);
        for f in m.faces() {
            assert_eq!(m.face_loop(f).count(), 4);
        }
        m.check().unwrap();
    }

    #[test]
    fn split_edge_keeps_winding() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        m.edges[e as usize].winding = 3;
        m.edges[(e ^ 1) as usize].winding = -3;
        let e_new = m.split_edge(e).unwrap();
        assert_eq!(m.lnext(e), e_new);
        assert_eq!(m.dst(e), m.org(e_new));
        assert_eq!(m.edges[e_new as usize].winding, 3);
        assert_eq!(m.edges[(e_new ^ 1) as usize].winding, -3);
        assert_eq!(m.vertex_count(), 3);
        m.check().unwrap();
    }

    #[test]
    fn connect_splits_and_delete_rejoins() {
        let mut m = Mesh::new();
        let e = contour(&mut m, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let before = m.face_count();
        let diag = m.connect(e, m.lnext(m.lnext(e))).unwrap();
        assert_eq!(m.face_count(), before + 1);
        assert_ne!(m.lface(diag), m.rface(diag));
        m.check().unwrap();

        m.delete_edge(diag).unwrap();
        assert_eq!(m.face_count(), before);
        assert_eq!(m.edge_count(), 4);
        m.check().unwrap();
    }

    #[test]
    fn deleting_lone_edge_empties_mesh() {
        let mut m = Mesh::new();
        let e = m.make_edge().unwrap();
        m.delete_edge(e).unwrap();
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.edge_count(), 0);
        m.check().unwrap();
    }

    #[test]
    fn zap_face_removes_faceless_edges() {
        let mut m = Mesh::new();
        contour(&mut m, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let faces: Vec<_> = m.faces().collect();
        m.zap_face(faces[0]);
        assert_eq!(m.face_count(), 1);
        assert_eq!(m.edge_count(), 3);
        m.zap_face(faces[1]);
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.edge_count(), 0);
        assert_eq!(m.vertex_count(), 0);
        m.check().unwrap();
    }

    #[test]
    fn monotone_region_becomes_triangles() {
        let mut m = Mesh::new();
        let pts = [(0.0, 0.0), (1.0, -1.0), (2.0, -0.5), (3.0, 0.0), (2.0, 1.0), (1.0, 0.8)];
        contour(&mut m, &pts);
        // Mark the CCW face (the one to the left of the winding +1 edges).
        let inner = m
            .faces()
            .find(|&f| m.edges[m.faces[f as usize].an_edge as usize].winding == 1)
            .unwrap();
        m.faces[inner as usize].inside = true;
        m.tessellate_interior().unwrap();
        m.check().unwrap();
        let tris: Vec<_> = m.faces().filter(|&f| m.faces[f as usize].inside).collect();
        assert_eq!(tris.len(), pts.len() - 2);
        for f in tris {
            assert_eq!(m.face_loop(f).count(), 3);
        }
    }

    #[test]
    fn winding_number_keeps_only_boundary() {
        let mut m = Mesh::new();
        let e = contour(&mut m, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let inner = m.lface(e);
        m.faces[inner as usize].inside = true;
        m.connect(e, m.lnext(m.lnext(e))).unwrap();
        assert_eq!(m.edge_count(), 5);
        m.set_winding_number(1, true).unwrap();
        assert_eq!(m.edge_count(), 4);
        for e in m.edge_pairs() {
            let w = m.edges[e as usize].winding;
            let l_inside = m.faces[m.lface(e) as usize].inside;
            assert_eq!(w, if l_inside { 1 } else { -1 });
        }
        m.check().unwrap();
    }
}
