//! Geometry kind tags for reference elements.
//!
//! A [`GeometryKind`] is a [`BasicType`] plus a dimension. Below dimension 2
//! every basic type describes the same shape (a vertex or a line segment), so
//! equality ignores the basic type there.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Basic shape families.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum BasicType {
    /// Triangles, tetrahedra and their higher-dimensional analogues.
    Simplex,
    /// Quadrilaterals, hexahedra and their higher-dimensional analogues.
    Cube,
    /// 3D pyramid.
    Pyramid,
    /// 3D wedge/prism.
    Prism,
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BasicType::Simplex => "simplex",
            BasicType::Cube => "cube",
            BasicType::Pyramid => "pyramid",
            BasicType::Prism => "prism",
        };
        f.write_str(name)
    }
}

/// Geometry kind of a reference element: basic type plus dimension.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GeometryKind {
    basic: BasicType,
    dim: usize,
}

impl GeometryKind {
    /// Creates a kind from its parts.
    pub const fn new(basic: BasicType, dim: usize) -> Self {
        Self { basic, dim }
    }

    /// 0D vertex.
    pub const fn vertex() -> Self {
        Self::new(BasicType::Cube, 0)
    }

    /// 1D segment.
    pub const fn line() -> Self {
        Self::new(BasicType::Cube, 1)
    }

    /// 2D simplex.
    pub const fn triangle() -> Self {
        Self::new(BasicType::Simplex, 2)
    }

    /// 2D tensor-product cell.
    pub const fn quadrilateral() -> Self {
        Self::new(BasicType::Cube, 2)
    }

    /// 3D simplex.
    pub const fn tetrahedron() -> Self {
        Self::new(BasicType::Simplex, 3)
    }

    /// 3D tensor-product cell.
    pub const fn hexahedron() -> Self {
        Self::new(BasicType::Cube, 3)
    }

    /// 3D pyramid.
    pub const fn pyramid() -> Self {
        Self::new(BasicType::Pyramid, 3)
    }

    /// 3D prism.
    pub const fn prism() -> Self {
        Self::new(BasicType::Prism, 3)
    }

    /// Simplex of dimension `dim`.
    pub const fn simplex(dim: usize) -> Self {
        Self::new(BasicType::Simplex, dim)
    }

    /// Hypercube of dimension `dim`.
    pub const fn cube(dim: usize) -> Self {
        Self::new(BasicType::Cube, dim)
    }

    /// The basic type tag.
    pub const fn basic_type(self) -> BasicType {
        self.basic
    }

    /// Topological dimension.
    pub const fn dim(self) -> usize {
        self.dim
    }

    /// True for simplices of any dimension (vertices and lines included).
    pub fn is_simplex(self) -> bool {
        self.dim < 2 || self.basic == BasicType::Simplex
    }

    /// True for hypercubes of any dimension (vertices and lines included).
    pub fn is_cube(self) -> bool {
        self.dim < 2 || self.basic == BasicType::Cube
    }

    /// Number of corners of the reference element.
    pub fn corner_count(self) -> usize {
        if self.dim < 2 {
            return self.dim + 1;
        }
        match self.basic {
            BasicType::Simplex => self.dim + 1,
            BasicType::Cube => 1 << self.dim,
            BasicType::Pyramid => 5,
            BasicType::Prism => 6,
        }
    }
}

impl PartialEq for GeometryKind {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim && (self.dim < 2 || self.basic == other.basic)
    }
}

impl Eq for GeometryKind {}

impl Hash for GeometryKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dim.hash(state);
        if self.dim >= 2 {
            self.basic.hash(state);
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.dim, self.basic) {
            (0, _) => f.write_str("vertex"),
            (1, _) => f.write_str("line"),
            (2, BasicType::Simplex) => f.write_str("triangle"),
            (2, BasicType::Cube) => f.write_str("quadrilateral"),
            (3, BasicType::Simplex) => f.write_str("tetrahedron"),
            (3, BasicType::Cube) => f.write_str("hexahedron"),
            (3, BasicType::Pyramid) => f.write_str("pyramid"),
            (3, BasicType::Prism) => f.write_str("prism"),
            (dim, basic) => write!(f, "{basic}({dim})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn low_dimensions_ignore_basic_type() {
        assert_eq!(GeometryKind::simplex(1), GeometryKind::cube(1));
        assert_eq!(GeometryKind::simplex(0), GeometryKind::vertex());
        assert_ne!(GeometryKind::triangle(), GeometryKind::quadrilateral());
        assert_ne!(GeometryKind::simplex(2), GeometryKind::simplex(3));
    }

    #[test]
    fn hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(GeometryKind::simplex(1));
        set.insert(GeometryKind::line());
        set.insert(GeometryKind::triangle());
        set.insert(GeometryKind::simplex(2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn names_and_corners() {
        assert_eq!(GeometryKind::hexahedron().to_string(), "hexahedron");
        assert_eq!(GeometryKind::cube(4).to_string(), "cube(4)");
        assert_eq!(GeometryKind::pyramid().corner_count(), 5);
        assert_eq!(GeometryKind::cube(4).corner_count(), 16);
        assert_eq!(GeometryKind::tetrahedron().corner_count(), 4);
        assert!(GeometryKind::line().is_simplex() && GeometryKind::line().is_cube());
    }

    #[test]
    fn json_roundtrip() {
        let kind = GeometryKind::prism();
        let s = serde_json::to_string(&kind).unwrap();
        let back: GeometryKind = serde_json::from_str(&s).unwrap();
        assert_eq!(back, kind);
        assert_eq!(back.basic_type(), BasicType::Prism);
    }
}
