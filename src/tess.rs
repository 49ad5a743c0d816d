// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess tess.c/h
//
// The public tessellator: property setters, the begin/contour/vertex/end
// state machine, the small-polygon vertex cache and the end_polygon
// pipeline (project, sweep, triangulate, render).

use tracing::{debug, warn};

use crate::config::{TessConfig, WindingRule};
use crate::error::{TessError, TessResult};
use crate::geom::{Real, MAX_COORD};
use crate::mesh::{EdgeIdx, Mesh, INVALID};
use crate::normal::project_polygon;
use crate::render::{render_boundary, render_cache, render_mesh, CachedVertex, PrimitiveSink};
use crate::sweep::{compute_interior, VertexCombiner};
use crate::visitor::{Primitive, TessVisitor};

/// Vertices of a single contour held back for the fan fast path.
pub const MAX_CACHE: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    Dormant,
    InPolygon,
    InContour,
}

/// A polygon tessellator writing its output to a [`TessVisitor`].
///
/// ```
/// use glu_tess::{TessVisitor, Tessellator};
///
/// #[derive(Default)]
/// struct Collect(Vec<u32>);
///
/// impl TessVisitor for Collect {
///     type VertexData = u32;
///     type PolygonData = ();
///     fn vertex(&mut self, data: &u32) {
///         self.0.push(*data);
///     }
/// }
///
/// let mut tess = Tessellator::new(Collect::default());
/// tess.begin_polygon(());
/// tess.begin_contour();
/// for (i, p) in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]].into_iter().enumerate() {
///     tess.add_vertex(p, i as u32).unwrap();
/// }
/// tess.end_contour();
/// tess.end_polygon().unwrap();
/// assert_eq!(tess.visitor().0.len(), 3);
/// ```
pub struct Tessellator<V: TessVisitor> {
    visitor: V,
    config: TessConfig,
    state: State,

    polygon_data: Option<V::PolygonData>,
    /// Caller vertex data; mesh vertices and cache entries index into it.
    vertex_data: Vec<V::VertexData>,
    mesh: Option<Mesh>,
    last_edge: EdgeIdx,
    cache: Vec<CachedVertex>,
    /// A second contour began while vertices were cached.
    empty_cache: bool,
    contours: usize,
    /// NeedCombineCallback was already reported for this polygon.
    combine_reported: bool,
}

impl<V: TessVisitor> Tessellator<V> {
    pub fn new(visitor: V) -> Self {
        Tessellator {
            visitor,
            config: TessConfig::default(),
            state: State::Dormant,
            polygon_data: None,
            vertex_data: Vec::new(),
            mesh: None,
            last_edge: INVALID,
            cache: Vec::new(),
            empty_cache: false,
            contours: 0,
            combine_reported: false,
        }
    }

    /// Like [`new`](Self::new) with explicit settings. Fails with
    /// `InvalidValue` if the tolerance is outside `[0, 1]`.
    pub fn with_config(visitor: V, config: TessConfig) -> TessResult<Self> {
        config.validate()?;
        let mut tess = Self::new(visitor);
        tess.config = config;
        Ok(tess)
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    pub fn config(&self) -> &TessConfig {
        &self.config
    }

    // ─────── Properties ───────────────────────────────────────────────────────

    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.config.winding_rule = rule;
    }

    /// Emit region outlines as line loops instead of triangles.
    pub fn set_boundary_only(&mut self, boundary_only: bool) {
        self.config.boundary_only = boundary_only;
    }

    /// Projection normal; `[0, 0, 0]` (the default) estimates one per polygon.
    pub fn set_normal(&mut self, normal: [Real; 3]) {
        self.config.normal = normal;
    }

    /// Accepted for compatibility. Coincident vertices are merged exactly;
    /// the tolerance does not widen that.
    pub fn set_tolerance(&mut self, tolerance: Real) -> TessResult<()> {
        if !(0.0..=1.0).contains(&tolerance) {
            self.report(TessError::InvalidValue);
            return Err(TessError::InvalidValue);
        }
        self.config.tolerance = tolerance;
        Ok(())
    }

    /// GLU-style numeric property setter (`GLU_TESS_WINDING_RULE`,
    /// `GLU_TESS_BOUNDARY_ONLY`, `GLU_TESS_TOLERANCE`).
    pub fn set_property(&mut self, which: u32, value: f64) -> TessResult<()> {
        let result = self.config.set(which, value);
        if let Err(err) = result {
            self.report(err);
        }
        result
    }

    pub fn property(&mut self, which: u32) -> TessResult<f64> {
        let result = self.config.get(which);
        if let Err(err) = result {
            self.report(err);
        }
        result
    }

    // ─────── State machine ────────────────────────────────────────────────────

    /// Step towards `target` one state at a time, synthesizing the missing
    /// calls and reporting each one.
    fn goto_state(&mut self, target: State) {
        while self.state != target {
            if self.state < target {
                match self.state {
                    State::Dormant => {
                        self.report(TessError::MissingBeginPolygon);
                        self.start_polygon(None);
                    }
                    _ => {
                        self.report(TessError::MissingBeginContour);
                        self.begin_contour();
                    }
                }
            } else {
                match self.state {
                    State::InContour => {
                        self.report(TessError::MissingEndContour);
                        self.end_contour();
                    }
                    _ => {
                        self.report(TessError::MissingEndPolygon);
                        self.make_dormant();
                    }
                }
            }
        }
    }

    #[inline]
    fn require_state(&mut self, state: State) {
        if self.state != state {
            self.goto_state(state);
        }
    }

    /// Drop everything belonging to the current polygon.
    fn make_dormant(&mut self) {
        self.state = State::Dormant;
        self.polygon_data = None;
        self.vertex_data.clear();
        self.mesh = None;
        self.last_edge = INVALID;
        self.cache.clear();
        self.empty_cache = false;
        self.contours = 0;
        self.combine_reported = false;
    }

    fn report(&mut self, err: TessError) {
        warn!(code = err.code(), "{err}");
        self.visitor.error_data(err, self.polygon_data.as_mut());
    }

    /// Start a polygon. `data` is passed to every `*_data` visitor method.
    pub fn begin_polygon(&mut self, data: V::PolygonData) {
        self.start_polygon(Some(data));
    }

    fn start_polygon(&mut self, data: Option<V::PolygonData>) {
        self.require_state(State::Dormant);
        self.make_dormant();
        self.state = State::InPolygon;
        self.polygon_data = data;
    }

    pub fn begin_contour(&mut self) {
        self.require_state(State::InPolygon);
        self.state = State::InContour;
        self.last_edge = INVALID;
        self.contours += 1;
        if !self.cache.is_empty() {
            // Only a single contour can use the fast path.
            self.empty_cache = true;
        }
    }

    /// Add a vertex to the current contour. Coordinates beyond ±1e150 are
    /// clamped and reported as `CoordTooLarge`.
    ///
    /// Only `OutOfMemory` is returned as an error; it also abandons the
    /// polygon.
    pub fn add_vertex(&mut self, coords: [Real; 3], data: V::VertexData) -> TessResult<()> {
        self.require_state(State::InContour);
        let result = self.push_vertex(coords, data);
        if let Err(err) = result {
            self.report(err);
            self.make_dormant();
        }
        result
    }

    fn push_vertex(&mut self, coords: [Real; 3], data: V::VertexData) -> TessResult<()> {
        if self.empty_cache {
            self.mesh = Some(self.cache_into_mesh()?);
            self.last_edge = INVALID;
        }

        let mut clamped = coords;
        let mut too_large = false;
        let mut not_a_number = false;
        for c in clamped.iter_mut() {
            if c.is_nan() {
                *c = 0.0;
                not_a_number = true;
            } else if *c < -MAX_COORD {
                *c = -MAX_COORD;
                too_large = true;
            } else if *c > MAX_COORD {
                *c = MAX_COORD;
                too_large = true;
            }
        }
        if too_large {
            self.report(TessError::CoordTooLarge);
        }
        if not_a_number {
            self.report(TessError::InvalidValue);
        }

        self.vertex_data
            .try_reserve(1)
            .map_err(|_| TessError::OutOfMemory)?;
        self.vertex_data.push(data);
        let data = (self.vertex_data.len() - 1) as u32;

        if self.mesh.is_none() {
            if self.cache.len() < MAX_CACHE {
                self.cache.try_reserve(1).map_err(|_| TessError::OutOfMemory)?;
                self.cache.push(CachedVertex {
                    coords: clamped,
                    data,
                });
                return Ok(());
            }
            // The cached vertices become the start of this contour.
            self.mesh = Some(self.cache_into_mesh()?);
        }
        match self.mesh.as_mut() {
            Some(mesh) => add_mesh_vertex(mesh, &mut self.last_edge, clamped, data),
            None => Ok(()),
        }
    }

    /// Build a mesh from the cached vertices, leaving `last_edge` at the
    /// last of them.
    fn cache_into_mesh(&mut self) -> TessResult<Mesh> {
        let mut mesh = Mesh::new();
        self.last_edge = INVALID;
        for v in &self.cache {
            add_mesh_vertex(&mut mesh, &mut self.last_edge, v.coords, v.data)?;
        }
        self.cache.clear();
        self.empty_cache = false;
        Ok(mesh)
    }

    pub fn end_contour(&mut self) {
        self.require_state(State::InContour);
        self.state = State::InPolygon;
    }

    /// GLU 1.0 `gluNextContour`: close the current contour and start another.
    pub fn next_contour(&mut self) {
        if self.state == State::InContour {
            self.end_contour();
        }
        self.begin_contour();
    }

    /// Tessellate the polygon and send the result to the visitor.
    ///
    /// Errors other than `OutOfMemory` have already been reported through
    /// the visitor and do not fail the call.
    pub fn end_polygon(&mut self) -> TessResult<()> {
        self.require_state(State::InPolygon);
        let result = self.finish_polygon();
        if let Err(err) = result {
            self.report(err);
        }
        self.make_dormant();
        result
    }

    fn finish_polygon(&mut self) -> TessResult<()> {
        let flag_boundary = self.visitor.wants_edge_flags();
        let wants_mesh = self.visitor.wants_mesh();
        let boundary_only = self.config.boundary_only;

        let mut mesh = match self.mesh.take() {
            Some(mesh) => mesh,
            None => {
                if !flag_boundary && !wants_mesh {
                    let mut sink = VisitorSink {
                        visitor: &mut self.visitor,
                        store: &self.vertex_data,
                        polygon: self.polygon_data.as_mut(),
                    };
                    let cfg = &self.config;
                    if render_cache(&self.cache, cfg.normal, cfg.winding_rule, boundary_only, &mut sink) {
                        debug!(vertices = self.cache.len(), "single contour rendered without sweep");
                        return Ok(());
                    }
                }
                self.cache_into_mesh()?
            }
        };

        project_polygon(&mut mesh, self.config.normal);
        debug!(
            contours = self.contours,
            vertices = mesh.vertex_count(),
            rule = ?self.config.winding_rule,
            "sweeping polygon"
        );

        let mut combiner = DataCombiner {
            visitor: &mut self.visitor,
            store: &mut self.vertex_data,
            polygon: self.polygon_data.as_mut(),
            reported: &mut self.combine_reported,
        };
        compute_interior(&mut mesh, self.config.winding_rule, &mut combiner)?;

        if boundary_only {
            mesh.set_winding_number(1, true)?;
        } else {
            mesh.tessellate_interior()?;
        }

        #[cfg(debug_assertions)]
        if let Err(msg) = mesh.check() {
            warn!(%msg, "mesh inconsistent after triangulation");
        }

        if wants_mesh {
            mesh.discard_exterior();
            let data = std::mem::take(&mut self.vertex_data);
            self.visitor.mesh_data(mesh, data, self.polygon_data.as_mut());
            return Ok(());
        }

        let mut sink = VisitorSink {
            visitor: &mut self.visitor,
            store: &self.vertex_data,
            polygon: self.polygon_data.as_mut(),
        };
        if boundary_only {
            render_boundary(&mesh, &mut sink);
        } else {
            render_mesh(&mut mesh, &mut sink, flag_boundary);
        }
        Ok(())
    }
}

/// Append a vertex to the contour ending at `last_edge` (or start a new
/// contour when it is INVALID).
fn add_mesh_vertex(mesh: &mut Mesh, last_edge: &mut EdgeIdx, coords: [Real; 3], data: u32) -> TessResult<()> {
    let e = if *last_edge == INVALID {
        // A one-edge loop: both ends are the same vertex.
        let e = mesh.make_edge()?;
        mesh.splice(e, e ^ 1)?;
        e
    } else {
        mesh.split_edge(*last_edge)?;
        mesh.lnext(*last_edge)
    };

    let v = mesh.org(e);
    mesh.verts[v as usize].coords = coords;
    mesh.verts[v as usize].data = data;
    // Positive winding on the left of the contour direction.
    mesh.edges[e as usize].winding = 1;
    mesh.edges[(e ^ 1) as usize].winding = -1;
    *last_edge = e;
    Ok(())
}

/// Forwards rendered primitives to the visitor, resolving data indices.
struct VisitorSink<'a, V: TessVisitor> {
    visitor: &'a mut V,
    store: &'a [V::VertexData],
    polygon: Option<&'a mut V::PolygonData>,
}

impl<V: TessVisitor> PrimitiveSink for VisitorSink<'_, V> {
    fn begin(&mut self, kind: Primitive) {
        self.visitor.begin_data(kind, self.polygon.as_deref_mut());
    }

    fn edge_flag(&mut self, boundary: bool) {
        self.visitor.edge_flag_data(boundary, self.polygon.as_deref_mut());
    }

    fn vertex(&mut self, data: u32) {
        match self.store.get(data as usize) {
            Some(d) => self.visitor.vertex_data(d, self.polygon.as_deref_mut()),
            None => {
                debug_assert!(false, "vertex data index {data} out of range");
                warn!(index = data, len = self.store.len(), "vertex without data skipped");
            }
        }
    }

    fn end(&mut self) {
        self.visitor.end_data(self.polygon.as_deref_mut());
    }
}

/// Supplies data for merged and intersection vertices through the
/// visitor's combine method.
struct DataCombiner<'a, V: TessVisitor> {
    visitor: &'a mut V,
    store: &'a mut Vec<V::VertexData>,
    polygon: Option<&'a mut V::PolygonData>,
    reported: &'a mut bool,
}

impl<V: TessVisitor> VertexCombiner for DataCombiner<'_, V> {
    fn combine(
        &mut self,
        coords: [Real; 3],
        parents: [u32; 4],
        weights: [Real; 4],
        needed: bool,
    ) -> TessResult<u32> {
        let store = &*self.store;
        let data = parents.map(|p| store.get(p as usize));
        let created = self
            .visitor
            .combine_data(coords, data, weights, self.polygon.as_deref_mut());

        match created {
            Some(d) => {
                self.store.try_reserve(1).map_err(|_| TessError::OutOfMemory)?;
                self.store.push(d);
                Ok((self.store.len() - 1) as u32)
            }
            None => {
                if needed && !*self.reported {
                    *self.reported = true;
                    let err = TessError::NeedCombineCallback;
                    warn!(code = err.code(), "{err}");
                    self.visitor.error_data(err, self.polygon.as_deref_mut());
                }
                Ok(parents[0])
            }
        }
    }
}
