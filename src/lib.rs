// glu-tess: Pure Rust port of the SGI GLU polygon tessellator
// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

//! Sweep-line polygon tessellation in the style of GLU's `gluTess*` API.
//!
//! Contours (possibly self-intersecting, possibly overlapping) are fed
//! vertex by vertex to a [`Tessellator`]. At `end_polygon` the input is
//! projected to a plane, its planar arrangement is computed, regions are
//! classified with a [`WindingRule`], and the interior is reported to a
//! [`TessVisitor`] as triangle fans, strips and triangles, or as boundary
//! line loops.

pub mod config;
pub mod dict;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod normal;
pub mod priorityq;
mod render;
mod sweep;
pub mod tess;
pub mod visitor;

pub use config::{TessConfig, TessProperty, WindingRule};
pub use error::{TessError, TessResult};
pub use geom::{Real, MAX_COORD};
pub use mesh::Mesh;
pub use tess::{Tessellator, MAX_CACHE};
pub use visitor::{NullVisitor, Primitive, TessVisitor};
