// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// The output interface of the tessellator.
//
// GLU registers one function pointer per callback slot, each with a "_DATA"
// twin that also receives the polygon token. Here a single trait carries
// every slot with a no-op default, and each `*_data` method forwards to its
// plain counterpart unless overridden.

use crate::error::TessError;
use crate::geom::Real;
use crate::mesh::Mesh;

/// Kind of primitive announced by [`TessVisitor::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Triangles,
    TriangleFan,
    TriangleStrip,
    LineLoop,
}

impl Primitive {
    /// The matching OpenGL enum value.
    pub fn gl_enum(self) -> u32 {
        match self {
            Primitive::LineLoop => 0x0002,
            Primitive::Triangles => 0x0004,
            Primitive::TriangleStrip => 0x0005,
            Primitive::TriangleFan => 0x0006,
        }
    }
}

/// Receives the tessellator's output.
///
/// Vertices are reported by reference to the data passed to
/// [`crate::Tessellator::add_vertex`] (or returned from [`combine`]).
///
/// [`combine`]: TessVisitor::combine
#[allow(unused_variables)]
pub trait TessVisitor {
    /// Per-vertex data handed to `add_vertex` and echoed back in `vertex`.
    type VertexData;
    /// Token handed to `begin_polygon` and passed to every `*_data` method.
    type PolygonData;

    fn begin(&mut self, kind: Primitive) {}

    fn begin_data(&mut self, kind: Primitive, polygon: Option<&mut Self::PolygonData>) {
        self.begin(kind)
    }

    /// Called before each vertex whose following edge changes boundary
    /// status: `true` when that edge lies on a region boundary. Only used
    /// when [`wants_edge_flags`](TessVisitor::wants_edge_flags) returns true.
    fn edge_flag(&mut self, boundary: bool) {}

    fn edge_flag_data(&mut self, boundary: bool, polygon: Option<&mut Self::PolygonData>) {
        self.edge_flag(boundary)
    }

    fn vertex(&mut self, data: &Self::VertexData) {}

    fn vertex_data(&mut self, data: &Self::VertexData, polygon: Option<&mut Self::PolygonData>) {
        self.vertex(data)
    }

    fn end(&mut self) {}

    fn end_data(&mut self, polygon: Option<&mut Self::PolygonData>) {
        self.end()
    }

    fn error(&mut self, err: TessError) {}

    fn error_data(&mut self, err: TessError, polygon: Option<&mut Self::PolygonData>) {
        self.error(err)
    }

    /// Create data for a vertex the tessellator synthesized at `coords`.
    ///
    /// `data` holds up to four contributing vertices (`None` for unused
    /// slots) and `weights` their interpolation weights, which sum to 1.
    /// Returning `None` where a new vertex is required reports
    /// [`TessError::NeedCombineCallback`] and reuses the first parent.
    fn combine(
        &mut self,
        coords: [Real; 3],
        data: [Option<&Self::VertexData>; 4],
        weights: [Real; 4],
    ) -> Option<Self::VertexData> {
        None
    }

    fn combine_data(
        &mut self,
        coords: [Real; 3],
        data: [Option<&Self::VertexData>; 4],
        weights: [Real; 4],
        polygon: Option<&mut Self::PolygonData>,
    ) -> Option<Self::VertexData> {
        self.combine(coords, data, weights)
    }

    /// Receives the final mesh, exterior faces removed, when
    /// [`wants_mesh`](TessVisitor::wants_mesh) returns true. Vertex `data`
    /// fields index into `vertex_data`.
    fn mesh(&mut self, mesh: Mesh, vertex_data: Vec<Self::VertexData>) {}

    fn mesh_data(
        &mut self,
        mesh: Mesh,
        vertex_data: Vec<Self::VertexData>,
        polygon: Option<&mut Self::PolygonData>,
    ) {
        self.mesh(mesh, vertex_data)
    }

    /// Emit only independent triangles, with edge flags.
    fn wants_edge_flags(&self) -> bool {
        false
    }

    /// Deliver the mesh through `mesh`.
    fn wants_mesh(&self) -> bool {
        false
    }
}

/// A visitor that ignores all output. Useful for checking input for errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullVisitor;

impl TessVisitor for NullVisitor {
    type VertexData = ();
    type PolygonData = ();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        plain: usize,
        begins: Vec<Primitive>,
    }

    impl TessVisitor for Counting {
        type VertexData = u32;
        type PolygonData = u32;

        fn begin(&mut self, kind: Primitive) {
            self.begins.push(kind);
        }

        fn vertex(&mut self, _data: &u32) {
            self.plain += 1;
        }

        fn vertex_data(&mut self, data: &u32, polygon: Option<&mut u32>) {
            if let Some(p) = polygon {
                *p += *data;
            }
            self.vertex(data);
        }
    }

    #[test]
    fn gl_values() {
        assert_eq!(Primitive::Triangles.gl_enum(), 4);
        assert_eq!(Primitive::TriangleFan.gl_enum(), 6);
        assert_eq!(Primitive::TriangleStrip.gl_enum(), 5);
        assert_eq!(Primitive::LineLoop.gl_enum(), 2);
    }

    #[test]
    fn data_variants_forward() {
        let mut v = Counting::default();
        let mut token = 10;
        v.begin_data(Primitive::TriangleFan, Some(&mut token));
        v.vertex_data(&5, Some(&mut token));
        v.vertex_data(&1, None);
        assert_eq!(v.begins, vec![Primitive::TriangleFan]);
        assert_eq!(v.plain, 2);
        assert_eq!(token, 15);
        assert_eq!(v.combine([0.0; 3], [None; 4], [0.0; 4]), None);
        assert!(!v.wants_mesh());
    }
}
