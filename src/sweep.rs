// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess sweep.c/h
//
// The Bentley-Ottmann style sweep that computes the planar arrangement of
// the input contours. Vertices are processed in `vert_leq` order; the edges
// crossing the sweep line live in a dictionary ordered bottom to top, and
// each gap between two dictionary edges is an ActiveRegion carrying the
// winding number of that part of the plane.
//
// When the sweep finishes, every face of the mesh is x-monotone and marked
// inside or outside according to the winding rule.
//
// Re-processing an event and walking the dirty regions after an
// intersection are loops here rather than recursive calls: sweep_event
// repeats while a left vertex asks for it, and check_for_intersect hands the
// region to restart from back to walk_dirty_regions.

use tracing::{debug, trace};

use crate::config::WindingRule;
use crate::dict::{Dict, NodeIdx, DICT_HEAD};
use crate::error::{TessError, TessResult};
use crate::geom::{
    edge_eval, edge_intersect, edge_sign, vert_eq, vert_l1_dist, vert_leq, Point, Real, MAX_COORD,
};
use crate::mesh::{EdgeIdx, Mesh, VertIdx, E_HEAD, F_HEAD, INVALID};
use crate::priorityq::PriorityQ;

/// Sentinel edges sit far outside any clamped input coordinate.
pub const SENTINEL_COORD: Real = 4.0 * MAX_COORD;

/// Index into Sweep::regions
pub type RegionIdx = u32;

/// An active region: the area between two adjacent edges crossing the sweep line.
#[derive(Clone, Debug)]
pub struct ActiveRegion {
    /// Upper edge, directed right to left.
    pub e_up: EdgeIdx,
    /// Node in the edge dictionary for this region.
    pub node_up: NodeIdx,
    /// Winding number of the region.
    pub winding_number: i32,
    /// Inside the polygon under the winding rule.
    pub inside: bool,
    /// Marks the fake edges at t = ±SENTINEL_COORD.
    pub sentinel: bool,
    /// Upper or lower edge changed; check for splices and intersections.
    pub dirty: bool,
    /// Upper edge is a temporary connection that may be replaced.
    pub fix_upper_edge: bool,
}

impl Default for ActiveRegion {
    fn default() -> Self {
        ActiveRegion {
            e_up: INVALID,
            node_up: INVALID,
            winding_number: 0,
            inside: false,
            sentinel: false,
            dirty: false,
            fix_upper_edge: false,
        }
    }
}

/// Supplies vertex data for vertices the sweep creates or merges.
///
/// `parents` are data indices of the contributing vertices (INVALID when
/// unused), `weights` their interpolation weights. The return value is the
/// data index to store on the vertex. `needed` is false when merging
/// coincident vertices, where keeping `parents[0]` is always acceptable.
pub(crate) trait VertexCombiner {
    fn combine(
        &mut self,
        coords: [Real; 3],
        parents: [u32; 4],
        weights: [Real; 4],
        needed: bool,
    ) -> TessResult<u32>;
}

/// Run the sweep over `mesh`, whose vertices must already carry projected
/// (s, t) positions. On success every face is monotone and has its `inside`
/// flag set.
pub(crate) fn compute_interior<C: VertexCombiner>(
    mesh: &mut Mesh,
    rule: WindingRule,
    combiner: &mut C,
) -> TessResult<()> {
    let mut sweep = Sweep {
        mesh,
        combiner,
        rule,
        dict: Dict::new(),
        pq: PriorityQ::new(),
        regions: Vec::new(),
        region_free: Vec::new(),
        event: INVALID,
    };

    sweep.remove_degenerate_edges()?;
    sweep.init_priority_queue()?;
    sweep.init_edge_dict()?;

    let mut events = 0usize;
    while let Some(v) = sweep.pq_extract_min() {
        while let Some(next) = sweep.pq_minimum() {
            if !vert_eq(sweep.pt(next), sweep.pt(v)) {
                break;
            }
            // Merge together all vertices at exactly the same location.
            sweep.pq_extract_min();
            let (a, b) = (sweep.an_edge(v), sweep.an_edge(next));
            sweep.splice_merge_vertices(a, b)?;
        }
        sweep.sweep_event(v)?;
        events += 1;
    }
    debug_assert!(sweep.pq.is_empty());

    sweep.done_edge_dict();
    remove_degenerate_faces(sweep.mesh)?;
    debug!(events, faces = sweep.mesh.face_count(), "sweep finished");

    #[cfg(debug_assertions)]
    if let Err(msg) = sweep.mesh.check() {
        tracing::warn!(%msg, "mesh inconsistent after sweep");
    }
    Ok(())
}

/// Delete faces with only two edges, folding their winding into the
/// surviving edge.
fn remove_degenerate_faces(mesh: &mut Mesh) -> TessResult<()> {
    let mut f = mesh.faces[F_HEAD as usize].next;
    while f != F_HEAD {
        let f_next = mesh.faces[f as usize].next;
        let e = mesh.faces[f as usize].an_edge;
        if mesh.lnext(mesh.lnext(e)) == e {
            let keep = mesh.onext(e);
            add_winding(mesh, keep, e);
            mesh.delete_edge(e)?;
        }
        f = f_next;
    }
    Ok(())
}

#[inline]
fn add_winding(mesh: &mut Mesh, e_dst: EdgeIdx, e_src: EdgeIdx) {
    let w = mesh.edges[e_src as usize].winding;
    let w_sym = mesh.edges[(e_src ^ 1) as usize].winding;
    mesh.edges[e_dst as usize].winding += w;
    mesh.edges[(e_dst ^ 1) as usize].winding += w_sym;
}

/// Both region upper edges go through or lie to the left of `event`.
/// True when `r1`'s edge is at or below `r2`'s at the sweep line.
fn edge_leq(mesh: &Mesh, regions: &[ActiveRegion], event: VertIdx, r1: u32, r2: u32) -> bool {
    let e1 = regions[r1 as usize].e_up;
    let e2 = regions[r2 as usize].e_up;
    let ev = mesh.point(event);
    let (o1, d1) = (mesh.point(mesh.org(e1)), mesh.point(mesh.dst(e1)));
    let (o2, d2) = (mesh.point(mesh.org(e2)), mesh.point(mesh.dst(e2)));

    if mesh.dst(e1) == event {
        if mesh.dst(e2) == event {
            // Two edges right of the sweep line meeting at the event:
            // compare their slopes.
            if vert_leq(o1, o2) {
                return edge_sign(d2, o1, o2) <= 0.0;
            }
            return edge_sign(d1, o2, o1) >= 0.0;
        }
        return edge_sign(d2, ev, o2) <= 0.0;
    }
    if mesh.dst(e2) == event {
        return edge_sign(d1, ev, o1) >= 0.0;
    }
    edge_eval(d1, ev, o1) >= edge_eval(d2, ev, o2)
}

struct Sweep<'a, C: VertexCombiner> {
    mesh: &'a mut Mesh,
    combiner: &'a mut C,
    rule: WindingRule,
    dict: Dict,
    pq: PriorityQ,
    regions: Vec<ActiveRegion>,
    region_free: Vec<RegionIdx>,
    /// Vertex currently being processed.
    event: VertIdx,
}

impl<'a, C: VertexCombiner> Sweep<'a, C> {
    // ─────── Small accessors ──────────────────────────────────────────────────

    #[inline]
    fn pt(&self, v: VertIdx) -> Point {
        self.mesh.point(v)
    }

    #[inline]
    fn an_edge(&self, v: VertIdx) -> EdgeIdx {
        self.mesh.verts[v as usize].an_edge
    }

    #[inline]
    fn e_up(&self, reg: RegionIdx) -> EdgeIdx {
        self.regions[reg as usize].e_up
    }

    #[inline]
    fn reg(&mut self, reg: RegionIdx) -> &mut ActiveRegion {
        &mut self.regions[reg as usize]
    }

    fn region_above(&self, reg: RegionIdx) -> RegionIdx {
        let node = self.regions[reg as usize].node_up;
        self.dict.key(self.dict.succ(node))
    }

    fn region_below(&self, reg: RegionIdx) -> RegionIdx {
        let node = self.regions[reg as usize].node_up;
        self.dict.key(self.dict.pred(node))
    }

    fn mark_dirty(&mut self, reg: RegionIdx) {
        if reg != INVALID {
            self.regions[reg as usize].dirty = true;
        }
    }

    // ─────── Priority queue ───────────────────────────────────────────────────

    fn pq_insert(&mut self, v: VertIdx) -> TessResult<i32> {
        let mesh = &*self.mesh;
        self.pq
            .insert(v, &|a, b| vert_leq(mesh.point(a), mesh.point(b)))
    }

    fn pq_delete(&mut self, handle: i32) {
        let mesh = &*self.mesh;
        self.pq
            .delete(handle, &|a, b| vert_leq(mesh.point(a), mesh.point(b)));
    }

    fn pq_extract_min(&mut self) -> Option<VertIdx> {
        let mesh = &*self.mesh;
        self.pq
            .extract_min(&|a, b| vert_leq(mesh.point(a), mesh.point(b)))
    }

    fn pq_minimum(&self) -> Option<VertIdx> {
        let mesh = &*self.mesh;
        self.pq
            .minimum(&|a, b| vert_leq(mesh.point(a), mesh.point(b)))
    }

    fn init_priority_queue(&mut self) -> TessResult<()> {
        let verts: Vec<VertIdx> = self.mesh.vertices().collect();
        for v in verts {
            let handle = self.pq_insert(v)?;
            self.mesh.verts[v as usize].pq_handle = handle;
        }
        let mesh = &*self.mesh;
        self.pq
            .init(&|a, b| vert_leq(mesh.point(a), mesh.point(b)))
    }

    // ─────── Region bookkeeping ───────────────────────────────────────────────

    fn alloc_region(&mut self, region: ActiveRegion) -> TessResult<RegionIdx> {
        if let Some(idx) = self.region_free.pop() {
            self.regions[idx as usize] = region;
            return Ok(idx);
        }
        self.regions
            .try_reserve(1)
            .map_err(|_| TessError::OutOfMemory)?;
        self.regions.push(region);
        Ok((self.regions.len() - 1) as RegionIdx)
    }

    fn free_region(&mut self, reg: RegionIdx) {
        self.regions[reg as usize] = ActiveRegion::default();
        self.region_free.push(reg);
    }

    /// Insert `reg` in the dictionary, searching down from `node`.
    fn dict_insert_before(&mut self, node: NodeIdx, reg: RegionIdx) -> TessResult<NodeIdx> {
        let (mesh, regions, event) = (&*self.mesh, &self.regions, self.event);
        self.dict
            .insert_before(node, reg, &|a, b| edge_leq(mesh, regions, event, a, b))
    }

    /// New region below `reg_above` whose upper edge is `e_new_up`.
    /// The winding number is left for the caller.
    fn add_region_below(&mut self, reg_above: RegionIdx, e_new_up: EdgeIdx) -> TessResult<RegionIdx> {
        let reg_new = self.alloc_region(ActiveRegion {
            e_up: e_new_up,
            ..ActiveRegion::default()
        })?;
        let node_above = self.regions[reg_above as usize].node_up;
        let node = match self.dict_insert_before(node_above, reg_new) {
            Ok(node) => node,
            Err(err) => {
                self.free_region(reg_new);
                return Err(err);
            }
        };
        self.reg(reg_new).node_up = node;
        self.mesh.edges[e_new_up as usize].active_region = reg_new;
        Ok(reg_new)
    }

    fn delete_region(&mut self, reg: RegionIdx) {
        let region = &self.regions[reg as usize];
        debug_assert!(!region.fix_upper_edge || self.mesh.edges[region.e_up as usize].winding == 0);
        let (e_up, node) = (region.e_up, region.node_up);
        self.mesh.edges[e_up as usize].active_region = INVALID;
        self.dict.delete(node);
        self.free_region(reg);
    }

    /// Replace a temporary upper edge with `new_edge`.
    fn fix_upper_edge(&mut self, reg: RegionIdx, new_edge: EdgeIdx) -> TessResult<()> {
        debug_assert!(self.regions[reg as usize].fix_upper_edge);
        self.mesh.delete_edge(self.e_up(reg))?;
        let r = self.reg(reg);
        r.fix_upper_edge = false;
        r.e_up = new_edge;
        self.mesh.edges[new_edge as usize].active_region = reg;
        Ok(())
    }

    fn compute_winding(&mut self, reg: RegionIdx) {
        let above = self.region_above(reg);
        let w = self.regions[above as usize].winding_number
            + self.mesh.edges[self.e_up(reg) as usize].winding;
        let inside = self.rule.is_inside(w);
        let r = self.reg(reg);
        r.winding_number = w;
        r.inside = inside;
    }

    /// Close off a region: its face gets the region's inside flag.
    fn finish_region(&mut self, reg: RegionIdx) {
        let e = self.e_up(reg);
        let f = self.mesh.lface(e);
        let inside = self.regions[reg as usize].inside;
        let face = &mut self.mesh.faces[f as usize];
        face.inside = inside;
        face.an_edge = e;
        self.delete_region(reg);
    }

    /// The region above the uppermost edge with the same origin as `reg`'s
    /// upper edge. A temporary edge found there is fixed first.
    fn top_left_region(&mut self, reg: RegionIdx) -> TessResult<RegionIdx> {
        let org = self.mesh.org(self.e_up(reg));
        let mut reg = reg;
        loop {
            reg = self.region_above(reg);
            if self.mesh.org(self.e_up(reg)) != org {
                break;
            }
        }

        if self.regions[reg as usize].fix_upper_edge {
            let below = self.region_below(reg);
            let e_org = self.e_up(below) ^ 1;
            let e_dst = self.mesh.lnext(self.e_up(reg));
            let e = self.mesh.connect(e_org, e_dst)?;
            self.fix_upper_edge(reg, e)?;
            reg = self.region_above(reg);
        }
        Ok(reg)
    }

    fn top_right_region(&self, reg: RegionIdx) -> RegionIdx {
        let dst = self.mesh.dst(self.e_up(reg));
        let mut reg = reg;
        loop {
            reg = self.region_above(reg);
            if self.mesh.dst(self.e_up(reg)) != dst {
                return reg;
            }
        }
    }

    // ─────── Vertex data ─────────────────────────────────────────────────────

    fn call_combine(
        &mut self,
        v: VertIdx,
        parents: [u32; 4],
        weights: [Real; 4],
        needed: bool,
    ) -> TessResult<()> {
        let coords = self.mesh.verts[v as usize].coords;
        let data = self.combiner.combine(coords, parents, weights, needed)?;
        self.mesh.verts[v as usize].data = data;
        Ok(())
    }

    /// Merge the origin of `e2` into the origin of `e1`.
    fn splice_merge_vertices(&mut self, e1: EdgeIdx, e2: EdgeIdx) -> TessResult<()> {
        let v1 = self.mesh.org(e1);
        let v2 = self.mesh.org(e2);
        let parents = [
            self.mesh.verts[v1 as usize].data,
            self.mesh.verts[v2 as usize].data,
            INVALID,
            INVALID,
        ];
        self.call_combine(v1, parents, [0.5, 0.5, 0.0, 0.0], false)?;
        self.mesh.splice(e1, e2)
    }

    /// Weights of the endpoints of (org, dst) for a point on that segment,
    /// inversely proportional to L1 distance and summing to 0.5. The
    /// weighted endpoint coordinates are added into `coords`.
    fn vertex_weights(&self, isect: Point, org: VertIdx, dst: VertIdx, coords: &mut [Real; 3]) -> [Real; 2] {
        let t1 = vert_l1_dist(self.pt(org), isect);
        let t2 = vert_l1_dist(self.pt(dst), isect);
        let w = if t1 + t2 > 0.0 {
            [0.5 * t2 / (t1 + t2), 0.5 * t1 / (t1 + t2)]
        } else {
            [0.25, 0.25]
        };
        let oc = self.mesh.verts[org as usize].coords;
        let dc = self.mesh.verts[dst as usize].coords;
        for (c, (o, d)) in coords.iter_mut().zip(oc.iter().zip(dc.iter())) {
            *c += w[0] * o + w[1] * d;
        }
        w
    }

    fn get_intersect_data(
        &mut self,
        isect: VertIdx,
        org_up: VertIdx,
        dst_up: VertIdx,
        org_lo: VertIdx,
        dst_lo: VertIdx,
    ) -> TessResult<()> {
        let at = self.pt(isect);
        let mut coords = [0.0; 3];
        let w_up = self.vertex_weights(at, org_up, dst_up, &mut coords);
        let w_lo = self.vertex_weights(at, org_lo, dst_lo, &mut coords);
        self.mesh.verts[isect as usize].coords = coords;

        let data = |v: VertIdx| self.mesh.verts[v as usize].data;
        let parents = [data(org_up), data(dst_up), data(org_lo), data(dst_lo)];
        trace!(s = at.s, t = at.t, "intersection vertex");
        self.call_combine(isect, parents, [w_up[0], w_up[1], w_lo[0], w_lo[1]], true)
    }

    // ─────── Left side of the event ──────────────────────────────────────────

    /// Finish the regions from `reg_first` down to (not including)
    /// `reg_last`, or until the edges stop sharing an origin when `reg_last`
    /// is INVALID. Returns the lowest left-going edge of the event.
    fn finish_left_regions(&mut self, reg_first: RegionIdx, reg_last: RegionIdx) -> TessResult<EdgeIdx> {
        let mut reg_prev = reg_first;
        let mut e_prev = self.e_up(reg_first);
        while reg_prev != reg_last {
            self.reg(reg_prev).fix_upper_edge = false;
            let reg = self.region_below(reg_prev);
            let mut e = self.e_up(reg);
            if self.mesh.org(e) != self.mesh.org(e_prev) {
                if !self.regions[reg as usize].fix_upper_edge {
                    // Ran out of edges from the event.
                    self.finish_region(reg_prev);
                    break;
                }
                // A temporary edge below: replace it with a real one from the event.
                let e_org = self.mesh.lprev(e_prev);
                e = self.mesh.connect(e_org, e ^ 1)?;
                self.fix_upper_edge(reg, e)?;
            }

            // Relink edges so that e_prev->Onext == e.
            if self.mesh.onext(e_prev) != e {
                let oprev = self.mesh.oprev(e);
                self.mesh.splice(oprev, e)?;
                self.mesh.splice(e_prev, e)?;
            }
            self.finish_region(reg_prev);
            e_prev = self.e_up(reg);
            reg_prev = reg;
        }
        Ok(e_prev)
    }

    // ─────── Right side of the event ─────────────────────────────────────────

    /// Add the right-going edges `e_first .. e_last` (an onext range at the
    /// event) below `reg_up`, compute their winding numbers and merge edges
    /// that turn out to coincide. `e_top_left` is the edge just CW of
    /// `e_first`, or INVALID when the event has no left-going edges.
    ///
    /// Returns the lowest region touched; the caller walks the dirty
    /// regions from there.
    fn add_right_edges(
        &mut self,
        reg_up: RegionIdx,
        e_first: EdgeIdx,
        e_last: EdgeIdx,
        e_top_left: EdgeIdx,
    ) -> TessResult<RegionIdx> {
        let mut e = e_first;
        loop {
            self.add_region_below(reg_up, e ^ 1)?;
            e = self.mesh.onext(e);
            if e == e_last {
                break;
            }
        }

        let e_top_left = if e_top_left == INVALID {
            let below = self.region_below(reg_up);
            self.mesh.rprev(self.e_up(below))
        } else {
            e_top_left
        };

        let mut reg_prev = reg_up;
        let mut e_prev = e_top_left;
        let mut first_time = true;
        loop {
            let reg = self.region_below(reg_prev);
            let e = self.e_up(reg) ^ 1;
            if self.mesh.org(e) != self.mesh.org(e_prev) {
                break;
            }

            if self.mesh.onext(e) != e_prev {
                // Unlink e from its current position and relink below e_prev.
                let oprev = self.mesh.oprev(e);
                self.mesh.splice(oprev, e)?;
                let oprev = self.mesh.oprev(e_prev);
                self.mesh.splice(oprev, e)?;
            }

            let w = self.regions[reg_prev as usize].winding_number - self.mesh.edges[e as usize].winding;
            let inside = self.rule.is_inside(w);
            let r = self.reg(reg);
            r.winding_number = w;
            r.inside = inside;

            // Check for two outgoing edges with the same slope.
            self.reg(reg_prev).dirty = true;
            if !first_time && self.check_for_right_splice(reg_prev)? {
                add_winding(self.mesh, e, e_prev);
                self.delete_region(reg_prev);
                self.mesh.delete_edge(e_prev)?;
            }
            first_time = false;
            reg_prev = reg;
            e_prev = e;
        }
        self.reg(reg_prev).dirty = true;
        Ok(reg_prev)
    }

    // ─────── Splices and intersections ───────────────────────────────────────

    /// Fix the ordering at the origins of `reg_up`'s upper and lower edges
    /// by splicing the one that lies on the wrong side into the other.
    fn check_for_right_splice(&mut self, reg_up: RegionIdx) -> TessResult<bool> {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let org_up = self.mesh.org(e_up);
        let org_lo = self.mesh.org(e_lo);

        if vert_leq(self.pt(org_up), self.pt(org_lo)) {
            if edge_sign(self.pt(self.mesh.dst(e_lo)), self.pt(org_up), self.pt(org_lo)) > 0.0 {
                return Ok(false);
            }
            if !vert_eq(self.pt(org_up), self.pt(org_lo)) {
                // Splice e_up->Org into e_lo.
                self.mesh.split_edge(e_lo ^ 1)?;
                let oprev = self.mesh.oprev(e_lo);
                self.mesh.splice(e_up, oprev)?;
                self.reg(reg_up).dirty = true;
                self.reg(reg_lo).dirty = true;
            } else if org_up != org_lo {
                // Merge the two vertices, discarding e_up->Org.
                let handle = self.mesh.verts[org_up as usize].pq_handle;
                self.pq_delete(handle);
                let oprev = self.mesh.oprev(e_lo);
                self.splice_merge_vertices(oprev, e_up)?;
            }
        } else {
            if edge_sign(self.pt(self.mesh.dst(e_up)), self.pt(org_lo), self.pt(org_up)) < 0.0 {
                return Ok(false);
            }
            // e_lo->Org is above e_up: splice it into e_up.
            let above = self.region_above(reg_up);
            self.mark_dirty(above);
            self.reg(reg_up).dirty = true;
            self.mesh.split_edge(e_up ^ 1)?;
            let oprev = self.mesh.oprev(e_lo);
            self.mesh.splice(oprev, e_up)?;
        }
        Ok(true)
    }

    /// Same as check_for_right_splice, at the destinations.
    fn check_for_left_splice(&mut self, reg_up: RegionIdx) -> TessResult<bool> {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let dst_up = self.pt(self.mesh.dst(e_up));
        let dst_lo = self.pt(self.mesh.dst(e_lo));

        if vert_leq(dst_up, dst_lo) {
            if edge_sign(dst_up, dst_lo, self.pt(self.mesh.org(e_up))) < 0.0 {
                return Ok(false);
            }
            // e_lo->Dst is above e_up: splice it into e_up.
            let above = self.region_above(reg_up);
            self.mark_dirty(above);
            self.reg(reg_up).dirty = true;
            let e = self.mesh.split_edge(e_up)?;
            self.mesh.splice(e_lo ^ 1, e)?;
            let inside = self.regions[reg_up as usize].inside;
            let f = self.mesh.lface(e);
            self.mesh.faces[f as usize].inside = inside;
        } else {
            if edge_sign(dst_lo, dst_up, self.pt(self.mesh.org(e_lo))) > 0.0 {
                return Ok(false);
            }
            // e_up->Dst is below e_lo: splice it into e_lo.
            self.reg(reg_up).dirty = true;
            self.reg(reg_lo).dirty = true;
            let e = self.mesh.split_edge(e_lo)?;
            let lnext = self.mesh.lnext(e_up);
            self.mesh.splice(lnext, e_lo ^ 1)?;
            let inside = self.regions[reg_up as usize].inside;
            let f = self.mesh.rface(e);
            self.mesh.faces[f as usize].inside = inside;
        }
        Ok(true)
    }

    /// Check the upper and lower edges of `reg_up` for an intersection right
    /// of the sweep line and, if there is one, split both edges at a new
    /// queued vertex.
    ///
    /// Returns `Some(region)` when the degenerate cases re-added right edges
    /// at the event; dirty regions must then be walked from that region and
    /// the current walk abandoned.
    fn check_for_intersect(&mut self, reg_up: RegionIdx) -> TessResult<Option<RegionIdx>> {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let org_up = self.mesh.org(e_up);
        let org_lo = self.mesh.org(e_lo);
        let dst_up = self.mesh.dst(e_up);
        let dst_lo = self.mesh.dst(e_lo);
        let (p_org_up, p_org_lo) = (self.pt(org_up), self.pt(org_lo));
        let (p_dst_up, p_dst_lo) = (self.pt(dst_up), self.pt(dst_lo));
        let ev = self.pt(self.event);

        if org_up == org_lo {
            // Right endpoints are the same.
            return Ok(None);
        }

        let t_min_up = p_org_up.t.min(p_dst_up.t);
        let t_max_lo = p_org_lo.t.max(p_dst_lo.t);
        if t_min_up > t_max_lo {
            return Ok(None);
        }

        if vert_leq(p_org_up, p_org_lo) {
            if edge_sign(p_dst_lo, p_org_up, p_org_lo) > 0.0 {
                return Ok(None);
            }
        } else if edge_sign(p_dst_up, p_org_lo, p_org_up) < 0.0 {
            return Ok(None);
        }

        // The edges intersect, at least marginally.
        let mut isect = edge_intersect(p_dst_up, p_org_up, p_dst_lo, p_org_lo);

        // Keep the intersection right of the sweep line.
        if vert_leq(isect, ev) {
            isect = ev;
        }
        // And no further right than the leftmost origin.
        let org_min = if vert_leq(p_org_up, p_org_lo) { p_org_up } else { p_org_lo };
        if vert_leq(org_min, isect) {
            isect = org_min;
        }

        if vert_eq(isect, p_org_up) || vert_eq(isect, p_org_lo) {
            // Intersection at one of the right endpoints.
            self.check_for_right_splice(reg_up)?;
            return Ok(None);
        }

        if (!vert_eq(p_dst_up, ev) && edge_sign(p_dst_up, ev, isect) >= 0.0)
            || (!vert_eq(p_dst_lo, ev) && edge_sign(p_dst_lo, ev, isect) <= 0.0)
        {
            // The new upper or lower edge would pass on the wrong side of
            // the event, or through it.
            if dst_lo == self.event {
                // Splice dst_lo into e_up and process the new regions.
                self.mesh.split_edge(e_up ^ 1)?;
                self.mesh.splice(e_lo ^ 1, e_up)?;
                let reg_up = self.top_left_region(reg_up)?;
                let below = self.region_below(reg_up);
                let e_up = self.e_up(below);
                self.finish_left_regions(below, reg_lo)?;
                let e_first = self.mesh.oprev(e_up);
                let reg = self.add_right_edges(reg_up, e_first, e_up, e_up)?;
                return Ok(Some(reg));
            }
            if dst_up == self.event {
                // Splice dst_up into e_lo and process the new regions.
                self.mesh.split_edge(e_lo ^ 1)?;
                let a = self.mesh.lnext(e_up);
                let b = self.mesh.oprev(e_lo);
                self.mesh.splice(a, b)?;
                let reg_lo = reg_up;
                let reg_up = self.top_right_region(reg_up);
                let below = self.region_below(reg_up);
                let e = self.mesh.rprev(self.e_up(below));
                self.reg(reg_lo).e_up = self.mesh.oprev(e_lo);
                let e_lo = self.finish_left_regions(reg_lo, INVALID)?;
                let e_first = self.mesh.onext(e_lo);
                let e_last = self.mesh.rprev(e_up);
                let reg = self.add_right_edges(reg_up, e_first, e_last, e)?;
                return Ok(Some(reg));
            }

            // Only reachable from connect_right_vertex: split the edge that
            // passes on the wrong side and leave the splice to the caller.
            if edge_sign(p_dst_up, ev, isect) >= 0.0 {
                let above = self.region_above(reg_up);
                self.mark_dirty(above);
                self.reg(reg_up).dirty = true;
                self.mesh.split_edge(e_up ^ 1)?;
                let v = self.mesh.org(e_up);
                self.mesh.verts[v as usize].s = ev.s;
                self.mesh.verts[v as usize].t = ev.t;
            }
            if edge_sign(p_dst_lo, ev, isect) <= 0.0 {
                self.reg(reg_up).dirty = true;
                self.reg(reg_lo).dirty = true;
                self.mesh.split_edge(e_lo ^ 1)?;
                let v = self.mesh.org(e_lo);
                self.mesh.verts[v as usize].s = ev.s;
                self.mesh.verts[v as usize].t = ev.t;
            }
            return Ok(None);
        }

        // General case: split both edges and splice them at a new vertex.
        self.mesh.split_edge(e_up ^ 1)?;
        self.mesh.split_edge(e_lo ^ 1)?;
        let oprev = self.mesh.oprev(e_lo);
        self.mesh.splice(oprev, e_up)?;
        let v = self.mesh.org(e_up);
        self.mesh.verts[v as usize].s = isect.s;
        self.mesh.verts[v as usize].t = isect.t;
        let handle = self.pq_insert(v)?;
        self.mesh.verts[v as usize].pq_handle = handle;
        self.get_intersect_data(v, org_up, dst_up, org_lo, dst_lo)?;

        let above = self.region_above(reg_up);
        self.mark_dirty(above);
        self.reg(reg_up).dirty = true;
        self.reg(reg_lo).dirty = true;
        Ok(None)
    }

    /// Process dirty regions bottom-up until none remain, restoring the
    /// dictionary ordering and finding new intersections.
    fn walk_dirty_regions(&mut self, reg_up: RegionIdx) -> TessResult<()> {
        let mut reg_up = reg_up;
        let mut reg_lo = self.region_below(reg_up);

        loop {
            // Find the lowest dirty region.
            while reg_lo != INVALID && self.regions[reg_lo as usize].dirty {
                reg_up = reg_lo;
                reg_lo = self.region_below(reg_lo);
            }
            if !self.regions[reg_up as usize].dirty {
                reg_lo = reg_up;
                reg_up = self.region_above(reg_up);
                if reg_up == INVALID || !self.regions[reg_up as usize].dirty {
                    return Ok(());
                }
            }
            self.reg(reg_up).dirty = false;
            let mut e_up = self.e_up(reg_up);
            let mut e_lo = self.e_up(reg_lo);

            if self.mesh.dst(e_up) != self.mesh.dst(e_lo) && self.check_for_left_splice(reg_up)? {
                // A temporary edge that was spliced away is no longer needed.
                if self.regions[reg_lo as usize].fix_upper_edge {
                    self.delete_region(reg_lo);
                    self.mesh.delete_edge(e_lo)?;
                    reg_lo = self.region_below(reg_up);
                    e_lo = self.e_up(reg_lo);
                } else if self.regions[reg_up as usize].fix_upper_edge {
                    self.delete_region(reg_up);
                    self.mesh.delete_edge(e_up)?;
                    reg_up = self.region_above(reg_lo);
                    e_up = self.e_up(reg_up);
                }
            }

            if self.mesh.org(e_up) != self.mesh.org(e_lo) {
                let check_intersect = self.mesh.dst(e_up) != self.mesh.dst(e_lo)
                    && !self.regions[reg_up as usize].fix_upper_edge
                    && !self.regions[reg_lo as usize].fix_upper_edge
                    && (self.mesh.dst(e_up) == self.event || self.mesh.dst(e_lo) == self.event);
                if check_intersect {
                    if let Some(restart) = self.check_for_intersect(reg_up)? {
                        reg_up = restart;
                        reg_lo = self.region_below(restart);
                        continue;
                    }
                } else {
                    self.check_for_right_splice(reg_up)?;
                }
            }

            if self.mesh.org(e_up) == self.mesh.org(e_lo) && self.mesh.dst(e_up) == self.mesh.dst(e_lo) {
                // A degenerate loop of two edges: delete one.
                add_winding(self.mesh, e_lo, e_up);
                self.delete_region(reg_up);
                self.mesh.delete_edge(e_up)?;
                reg_up = self.region_above(reg_lo);
            }
        }
    }

    // ─────── Event handling ───────────────────────────────────────────────────

    /// The event has left-going edges but no right-going ones. Add a
    /// temporary edge so the region it closes stays connected to the rest.
    fn connect_right_vertex(&mut self, reg_up: RegionIdx, e_bottom_left: EdgeIdx) -> TessResult<()> {
        let mut reg_up = reg_up;
        let mut e_bottom_left = e_bottom_left;
        let mut e_top_left = self.mesh.onext(e_bottom_left);
        let reg_lo = self.region_below(reg_up);
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let mut degenerate = false;

        if self.mesh.dst(e_up) != self.mesh.dst(e_lo) {
            if let Some(restart) = self.check_for_intersect(reg_up)? {
                self.walk_dirty_regions(restart)?;
            }
        }

        // The upper or lower edge may now pass through the event.
        let ev = self.pt(self.event);
        if vert_eq(self.pt(self.mesh.org(e_up)), ev) {
            let oprev = self.mesh.oprev(e_top_left);
            self.mesh.splice(oprev, e_up)?;
            reg_up = self.top_left_region(reg_up)?;
            let below = self.region_below(reg_up);
            e_top_left = self.e_up(below);
            self.finish_left_regions(below, reg_lo)?;
            degenerate = true;
        }
        if vert_eq(self.pt(self.mesh.org(e_lo)), ev) {
            let oprev = self.mesh.oprev(e_lo);
            self.mesh.splice(e_bottom_left, oprev)?;
            e_bottom_left = self.finish_left_regions(reg_lo, INVALID)?;
            degenerate = true;
        }
        if degenerate {
            let e_first = self.mesh.onext(e_bottom_left);
            let reg = self.add_right_edges(reg_up, e_first, e_top_left, e_top_left)?;
            return self.walk_dirty_regions(reg);
        }

        // Connect to the closer of e_lo->Org and e_up->Org.
        let target = if vert_leq(self.pt(self.mesh.org(e_lo)), self.pt(self.mesh.org(e_up))) {
            self.mesh.oprev(e_lo)
        } else {
            e_up
        };
        let e_org = self.mesh.lprev(e_bottom_left);
        let e_new = self.mesh.connect(e_org, target)?;

        // No walk yet: e_new must be marked temporary before anything can
        // delete it.
        let e_next = self.mesh.onext(e_new);
        self.add_right_edges(reg_up, e_new, e_next, e_next)?;
        let reg_new = self.mesh.edges[(e_new ^ 1) as usize].active_region;
        self.reg(reg_new).fix_upper_edge = true;
        self.walk_dirty_regions(reg_up)
    }

    /// The event lies on the upper edge of `reg_up`. Returns true when the
    /// event must be processed again.
    fn connect_left_degenerate(&mut self, reg_up: RegionIdx, v_event: VertIdx) -> TessResult<bool> {
        let e = self.e_up(reg_up);
        let ev = self.pt(v_event);

        if vert_eq(self.pt(self.mesh.org(e)), ev) {
            // e->Org is unprocessed: merge and wait for it to be dequeued.
            let an = self.an_edge(v_event);
            self.splice_merge_vertices(e, an)?;
            return Ok(false);
        }

        if !vert_eq(self.pt(self.mesh.dst(e)), ev) {
            // Splice the event into the edge passing through it.
            self.mesh.split_edge(e ^ 1)?;
            if self.regions[reg_up as usize].fix_upper_edge {
                // Drop the unused part of the temporary edge.
                let onext = self.mesh.onext(e);
                self.mesh.delete_edge(onext)?;
                self.reg(reg_up).fix_upper_edge = false;
            }
            let an = self.an_edge(v_event);
            self.mesh.splice(an, e)?;
            return Ok(true);
        }

        // The event coincides with e->Dst, which is already processed:
        // splice in the additional right-going edges.
        let reg_up = self.top_right_region(reg_up);
        let reg = self.region_below(reg_up);
        let mut e_top_right = self.e_up(reg) ^ 1;
        let e_last = self.mesh.onext(e_top_right);
        let mut e_top_left = e_last;
        if self.regions[reg as usize].fix_upper_edge {
            // e->Dst only had a temporary right-going edge; real ones replace it.
            debug_assert!(e_top_left != e_top_right);
            self.delete_region(reg);
            self.mesh.delete_edge(e_top_right)?;
            e_top_right = self.mesh.oprev(e_top_left);
        }
        let an = self.an_edge(v_event);
        self.mesh.splice(an, e_top_right)?;
        if !self.mesh.edge_goes_left(e_top_left) {
            e_top_left = INVALID;
        }
        let e_first = self.mesh.onext(e_top_right);
        let reg = self.add_right_edges(reg_up, e_first, e_last, e_top_left)?;
        self.walk_dirty_regions(reg)?;
        Ok(false)
    }

    /// The event has only right-going edges. Find the region containing it
    /// and, if that region is inside (or bounded by a temporary edge),
    /// connect the event to the rest of the mesh. Returns true when the
    /// event must be processed again.
    fn connect_left_vertex(&mut self, v_event: VertIdx) -> TessResult<bool> {
        let an = self.an_edge(v_event);
        let probe = self.alloc_region(ActiveRegion {
            e_up: an ^ 1,
            ..ActiveRegion::default()
        })?;
        let node = {
            let (mesh, regions, event) = (&*self.mesh, &self.regions, self.event);
            self.dict
                .search(probe, &|a, b| edge_leq(mesh, regions, event, a, b))
        };
        self.free_region(probe);

        let reg_up = self.dict.key(node);
        if node == DICT_HEAD || reg_up == INVALID {
            return Ok(false);
        }
        let reg_lo = self.region_below(reg_up);
        if reg_lo == INVALID {
            return Ok(false);
        }
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let ev = self.pt(v_event);

        if edge_sign(self.pt(self.mesh.dst(e_up)), ev, self.pt(self.mesh.org(e_up))) == 0.0 {
            return self.connect_left_degenerate(reg_up, v_event);
        }

        // Connect to the closer of e_lo->Dst and e_up->Dst, but only when
        // the region is inside or bounded by a temporary edge.
        let reg = if vert_leq(self.pt(self.mesh.dst(e_lo)), self.pt(self.mesh.dst(e_up))) {
            reg_up
        } else {
            reg_lo
        };

        if self.regions[reg_up as usize].inside || self.regions[reg as usize].fix_upper_edge {
            let e_new = if reg == reg_up {
                let e_dst = self.mesh.lnext(e_up);
                self.mesh.connect(an ^ 1, e_dst)?
            } else {
                let e_org = self.mesh.dnext(e_lo);
                self.mesh.connect(e_org, an)? ^ 1
            };
            if self.regions[reg as usize].fix_upper_edge {
                self.fix_upper_edge(reg, e_new)?;
            } else {
                let reg_new = self.add_region_below(reg_up, e_new)?;
                self.compute_winding(reg_new);
            }
            return Ok(true);
        }

        // Outside the polygon: the event needs no connection.
        let reg = self.add_right_edges(reg_up, an, an, INVALID)?;
        self.walk_dirty_regions(reg)?;
        Ok(false)
    }

    fn sweep_event(&mut self, v_event: VertIdx) -> TessResult<()> {
        self.event = v_event;
        loop {
            trace!(s = self.pt(v_event).s, t = self.pt(v_event).t, "sweep event");

            // Find an edge of the event that is already in the dictionary.
            let an = self.an_edge(v_event);
            let mut e = an;
            let mut in_dict = true;
            while self.mesh.edges[e as usize].active_region == INVALID {
                e = self.mesh.onext(e);
                if e == an {
                    in_dict = false;
                    break;
                }
            }

            if !in_dict {
                // All edges go right.
                if self.connect_left_vertex(v_event)? {
                    continue;
                }
                return Ok(());
            }

            // Finish the regions closed off by the event, then add the
            // right-going edges.
            let reg_up = self.top_left_region(self.mesh.edges[e as usize].active_region)?;
            let reg = self.region_below(reg_up);
            let e_top_left = self.e_up(reg);
            let e_bottom_left = self.finish_left_regions(reg, INVALID)?;

            if self.mesh.onext(e_bottom_left) == e_top_left {
                self.connect_right_vertex(reg_up, e_bottom_left)?;
            } else {
                let e_first = self.mesh.onext(e_bottom_left);
                let reg = self.add_right_edges(reg_up, e_first, e_top_left, e_top_left)?;
                self.walk_dirty_regions(reg)?;
            }
            return Ok(());
        }
    }

    // ─────── Setup and teardown ──────────────────────────────────────────────

    /// Remove zero-length edges and contours with fewer than three edges.
    fn remove_degenerate_edges(&mut self) -> TessResult<()> {
        let mut e = self.mesh.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let mut e_next = self.mesh.edges[e as usize].next;
            let mut e_lnext = self.mesh.lnext(e);

            if vert_eq(self.pt(self.mesh.org(e)), self.pt(self.mesh.dst(e)))
                && self.mesh.lnext(e_lnext) != e
            {
                // Zero-length edge in a contour of at least three edges.
                self.splice_merge_vertices(e_lnext, e)?;
                self.mesh.delete_edge(e)?;
                e = e_lnext;
                e_lnext = self.mesh.lnext(e);
            }

            if self.mesh.lnext(e_lnext) == e {
                // Contour of one or two edges.
                if e_lnext != e {
                    if e_lnext == e_next || e_lnext == (e_next ^ 1) {
                        e_next = self.mesh.edges[e_next as usize].next;
                    }
                    self.mesh.delete_edge(e_lnext)?;
                }
                if e == e_next || e == (e_next ^ 1) {
                    e_next = self.mesh.edges[e_next as usize].next;
                }
                self.mesh.delete_edge(e)?;
            }
            e = e_next;
        }
        Ok(())
    }

    fn add_sentinel(&mut self, t: Real) -> TessResult<()> {
        let e = self.mesh.make_edge()?;
        let org = self.mesh.org(e);
        let dst = self.mesh.dst(e);
        self.mesh.verts[org as usize].s = SENTINEL_COORD;
        self.mesh.verts[org as usize].t = t;
        self.mesh.verts[dst as usize].s = -SENTINEL_COORD;
        self.mesh.verts[dst as usize].t = t;
        self.event = dst;

        let reg = self.alloc_region(ActiveRegion {
            e_up: e,
            sentinel: true,
            ..ActiveRegion::default()
        })?;
        let node = {
            let (mesh, regions, event) = (&*self.mesh, &self.regions, self.event);
            self.dict
                .insert(reg, &|a, b| edge_leq(mesh, regions, event, a, b))?
        };
        self.reg(reg).node_up = node;
        Ok(())
    }

    fn init_edge_dict(&mut self) -> TessResult<()> {
        self.add_sentinel(-SENTINEL_COORD)?;
        self.add_sentinel(SENTINEL_COORD)
    }

    fn done_edge_dict(&mut self) {
        let mut fixed_edges = 0;
        while !self.dict.is_empty() {
            let reg = self.dict.key(self.dict.min());
            let region = &self.regions[reg as usize];
            // Besides the sentinels, at most one temporary edge survives.
            if !region.sentinel {
                debug_assert!(region.fix_upper_edge);
                fixed_edges += 1;
                debug_assert!(fixed_edges == 1);
            }
            debug_assert!(region.winding_number == 0);
            self.delete_region(reg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keeps every combined vertex so tests can inspect them.
    #[derive(Default)]
    struct Recorder {
        created: Vec<[Real; 3]>,
    }

    impl VertexCombiner for Recorder {
        fn combine(
            &mut self,
            coords: [Real; 3],
            parents: [u32; 4],
            _weights: [Real; 4],
            needed: bool,
        ) -> TessResult<u32> {
            if needed {
                self.created.push(coords);
                Ok(1000 + self.created.len() as u32)
            } else {
                Ok(parents[0])
            }
        }
    }

    fn add_contour(m: &mut Mesh, pts: &[(Real, Real)]) {
        let mut last = INVALID;
        for (i, &(s, t)) in pts.iter().enumerate() {
            let e = if last == INVALID {
                let e = m.make_edge().unwrap();
                m.splice(e, e ^ 1).unwrap();
                e
            } else {
                m.split_edge(last).unwrap();
                m.lnext(last)
            };
            let v = m.org(e);
            m.verts[v as usize].s = s;
            m.verts[v as usize].t = t;
            m.verts[v as usize].coords = [s, t, 0.0];
            m.verts[v as usize].data = i as u32;
            m.edges[e as usize].winding = 1;
            m.edges[(e ^ 1) as usize].winding = -1;
            last = e;
        }
    }

    fn inside_area(m: &Mesh) -> Real {
        let mut total = 0.0;
        for f in m.faces().filter(|&f| m.faces[f as usize].inside) {
            let mut a = 0.0;
            for e in m.face_loop(f) {
                let (o, d) = (m.point(m.org(e)), m.point(m.dst(e)));
                a += o.s * d.t - d.s * o.t;
            }
            total += a / 2.0;
        }
        total
    }

    fn run(pts: &[&[(Real, Real)]], rule: WindingRule) -> (Mesh, Recorder) {
        let mut m = Mesh::new();
        for c in pts {
            add_contour(&mut m, c);
        }
        let mut rec = Recorder::default();
        compute_interior(&mut m, rule, &mut rec).unwrap();
        m.check().unwrap();
        (m, rec)
    }

    #[test]
    fn square_has_one_inside_face() {
        let (m, rec) = run(&[&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]], WindingRule::Odd);
        let inside = m.faces().filter(|&f| m.faces[f as usize].inside).count();
        assert_eq!(inside, 1);
        assert!((inside_area(&m) - 1.0).abs() < 1e-12);
        assert!(rec.created.is_empty());
    }

    #[test]
    fn edge_dict_holds_only_sentinels_at_rest() {
        let mut m = Mesh::new();
        let mut rec = Recorder::default();
        let mut sweep = Sweep {
            mesh: &mut m,
            combiner: &mut rec,
            rule: WindingRule::Odd,
            dict: Dict::new(),
            pq: PriorityQ::new(),
            regions: Vec::new(),
            region_free: Vec::new(),
            event: INVALID,
        };
        sweep.init_edge_dict().unwrap();
        let first = sweep.dict.min();
        let second = sweep.dict.succ(first);
        for node in [first, second] {
            assert!(sweep.regions[sweep.dict.key(node) as usize].sentinel);
        }
        assert_eq!(sweep.dict.succ(second), DICT_HEAD);
        sweep.done_edge_dict();
        assert!(sweep.dict.is_empty());
    }

    #[test]
    fn sentinels_are_removed() {
        let (m, _) = run(&[&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0)]], WindingRule::Odd);
        assert_eq!(m.vertex_count(), 3);
        for v in m.vertices() {
            assert!(m.verts[v as usize].s.abs() < SENTINEL_COORD);
        }
    }

    #[test]
    fn bowtie_gets_one_intersection() {
        let (m, rec) = run(&[&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]], WindingRule::NonZero);
        assert_eq!(rec.created.len(), 1);
        let c = rec.created[0];
        assert!((c[0] - 1.0).abs() < 1e-12 && (c[1] - 1.0).abs() < 1e-12, "{c:?}");
        assert!((inside_area(&m).abs() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn faces_are_monotone_and_triangulate() {
        let star: Vec<(Real, Real)> = (0..10)
            .map(|i| {
                let a = std::f64::consts::PI * 2.0 * i as Real / 10.0;
                let r = if i % 2 == 0 { 2.0 } else { 0.8 };
                (r * a.cos(), r * a.sin())
            })
            .collect();
        let (mut m, _) = run(&[&star], WindingRule::Odd);
        let area = inside_area(&m);
        m.tessellate_interior().unwrap();
        m.check().unwrap();
        for f in m.faces().filter(|&f| m.faces[f as usize].inside) {
            assert_eq!(m.face_loop(f).count(), 3);
        }
        assert!((inside_area(&m) - area).abs() < 1e-9);
    }

    #[test]
    fn degenerate_contours_vanish() {
        let (m, _) = run(
            &[&[(0.0, 0.0), (1.0, 1.0)], &[(5.0, 5.0)], &[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]],
            WindingRule::Odd,
        );
        assert_eq!(m.faces().filter(|&f| m.faces[f as usize].inside).count(), 0);
    }

    #[test]
    fn hole_is_outside_under_odd() {
        let outer = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let hole = [(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)];
        let (m, _) = run(&[&outer, &hole], WindingRule::Odd);
        assert!((inside_area(&m) - 12.0).abs() < 1e-12);
        let (m, _) = run(&[&outer, &hole], WindingRule::Positive);
        assert!((inside_area(&m) - 12.0).abs() < 1e-12);
    }
}
