//! # Geometry Primitives
//!
//! Plain value types describing a textured triangle mesh.
//!
//! Triangles are stored in a [`TriangleSet`] as parallel coordinate arrays;
//! triangle `i` occupies coordinate slots `[3i, 3i + 3)`. Textures are shared
//! through `Arc` so many triangles (and worker threads) can sample one image.

use std::ops::Sub;
use std::sync::Arc;

use crate::color::Rgba;
use crate::error::{CoreError, CoreResult};
use crate::texture::Texture;

/// A mesh vertex: spatial position plus texture coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Horizontal texture coordinate.
    pub u: f64,
    /// Vertical texture coordinate.
    pub v: f64,
}

impl Point {
    /// Creates a point with zero texture coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::with_uv(x, y, z, 0.0, 0.0)
    }

    /// Creates a point with texture coordinates.
    #[inline]
    #[must_use]
    pub const fn with_uv(x: f64, y: f64, z: f64, u: f64, v: f64) -> Self {
        Self { x, y, z, u, v }
    }

    /// Returns a copy with the spatial axes scaled independently.
    ///
    /// Texture coordinates are left untouched.
    #[inline]
    #[must_use]
    pub fn scaled(self, sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            z: self.z * sz,
            ..self
        }
    }

    /// Returns `[x, y, z, u, v]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 5] {
        [self.x, self.y, self.z, self.u, self.v]
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::with_uv(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.u - rhs.u,
            self.v - rhs.v,
        )
    }
}

/// A triangle with an optional shared texture.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// First vertex.
    pub p0: Point,
    /// Second vertex.
    pub p1: Point,
    /// Third vertex; both rasterizer edges converge here.
    pub p2: Point,
    /// Texture sampled for this face, if any.
    pub texture: Option<Arc<dyn Texture>>,
}

impl Triangle {
    /// Creates an untextured triangle.
    #[must_use]
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            p0,
            p1,
            p2,
            texture: None,
        }
    }

    /// Attaches a texture.
    #[must_use]
    pub fn with_texture(mut self, texture: Arc<dyn Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Returns the three vertices in order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Returns a copy with every vertex scaled per axis.
    #[must_use]
    pub fn scaled(&self, sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            p0: self.p0.scaled(sx, sy, sz),
            p1: self.p1.scaled(sx, sy, sz),
            p2: self.p2.scaled(sx, sy, sz),
            texture: self.texture.clone(),
        }
    }

    /// Color of the surface at texture coordinate `(u, v)`.
    ///
    /// Untextured triangles are opaque white.
    #[inline]
    #[must_use]
    pub fn color(&self, u: f64, v: f64) -> Rgba {
        self.texture
            .as_ref()
            .map_or(Rgba::WHITE, |texture| texture.color_at(u, v))
    }
}

impl Sub<Point> for &Triangle {
    type Output = Triangle;

    /// Translates every vertex by `-rhs`, keeping the texture.
    fn sub(self, rhs: Point) -> Triangle {
        Triangle {
            p0: self.p0 - rhs,
            p1: self.p1 - rhs,
            p2: self.p2 - rhs,
            texture: self.texture.clone(),
        }
    }
}

impl Sub<Point> for Triangle {
    type Output = Triangle;

    fn sub(self, rhs: Point) -> Triangle {
        &self - rhs
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner `[x, y, z]`.
    pub min: [f64; 3],
    /// Maximum corner `[x, y, z]`.
    pub max: [f64; 3],
}

impl Aabb {
    /// Creates a box from its two corners.
    #[must_use]
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Extent along X.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    /// Extent along Y.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Extent along Z.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max[2] - self.min[2]
    }

    /// The minimum corner as a point (zero texture coordinates).
    #[inline]
    #[must_use]
    pub const fn min_corner(&self) -> Point {
        Point::new(self.min[0], self.min[1], self.min[2])
    }
}

/// An ordered sequence of triangles stored as parallel arrays.
///
/// The five coordinate arrays always hold exactly three entries per
/// texture reference.
#[derive(Debug, Clone, Default)]
pub struct TriangleSet {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
    us: Vec<f64>,
    vs: Vec<f64>,
    textures: Vec<Option<Arc<dyn Texture>>>,
}

impl TriangleSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `triangles` triangles.
    #[must_use]
    pub fn with_capacity(triangles: usize) -> Self {
        let points = triangles * 3;
        Self {
            xs: Vec::with_capacity(points),
            ys: Vec::with_capacity(points),
            zs: Vec::with_capacity(points),
            us: Vec::with_capacity(points),
            vs: Vec::with_capacity(points),
            textures: Vec::with_capacity(triangles),
        }
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns true if no triangles are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Returns triangle `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> CoreResult<Triangle> {
        if index >= self.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.triangle_at(index))
    }

    /// Iterates over all triangles in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.len()).map(|i| self.triangle_at(i))
    }

    /// Appends a triangle.
    pub fn append(&mut self, tri: &Triangle) {
        for p in tri.vertices() {
            self.xs.push(p.x);
            self.ys.push(p.y);
            self.zs.push(p.z);
            self.us.push(p.u);
            self.vs.push(p.v);
        }
        self.textures.push(tri.texture.clone());
    }

    /// Removes every triangle.
    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.zs.clear();
        self.us.clear();
        self.vs.clear();
        self.textures.clear();
    }

    /// Smallest X over all vertices (0.0 when empty).
    #[must_use]
    pub fn min_x(&self) -> f64 {
        min_of(&self.xs)
    }

    /// Largest X over all vertices (0.0 when empty).
    #[must_use]
    pub fn max_x(&self) -> f64 {
        max_of(&self.xs)
    }

    /// Smallest Y over all vertices (0.0 when empty).
    #[must_use]
    pub fn min_y(&self) -> f64 {
        min_of(&self.ys)
    }

    /// Largest Y over all vertices (0.0 when empty).
    #[must_use]
    pub fn max_y(&self) -> f64 {
        max_of(&self.ys)
    }

    /// Smallest Z over all vertices (0.0 when empty).
    #[must_use]
    pub fn min_z(&self) -> f64 {
        min_of(&self.zs)
    }

    /// Largest Z over all vertices (0.0 when empty).
    #[must_use]
    pub fn max_z(&self) -> f64 {
        max_of(&self.zs)
    }

    /// Bounding box of every stored vertex.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            [self.min_x(), self.min_y(), self.min_z()],
            [self.max_x(), self.max_y(), self.max_z()],
        )
    }

    fn point_at(&self, slot: usize) -> Point {
        Point::with_uv(
            self.xs[slot],
            self.ys[slot],
            self.zs[slot],
            self.us[slot],
            self.vs[slot],
        )
    }

    fn triangle_at(&self, index: usize) -> Triangle {
        let base = index * 3;
        Triangle {
            p0: self.point_at(base),
            p1: self.point_at(base + 1),
            p2: self.point_at(base + 2),
            texture: self.textures[index].clone(),
        }
    }
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}
