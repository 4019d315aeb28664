//! Triangle rasterization.
//!
//! The two edges `p0 -> p2` and `p1 -> p2` are swept together as one 10-D
//! line, so both edge points reach `p2` on the same step. Each pair of edge
//! points is joined by a 5-D fill line, and every fill point splats its
//! texture color into the 8 grid cells around it.

use crate::geometry::Triangle;
use crate::line::LineStepper;

use super::grid::{clamp_cell, GridSlab};

/// Widest texture-coordinate span, in texture periods, walked as given.
const MAX_TEXTURE_SPAN: f64 = 4096.0;

/// Rasterizes a triangle already translated and scaled into grid space.
pub(crate) fn rasterize(tri: &Triangle, slab: &mut GridSlab<'_>) {
    let mut vertices = tri.vertices().map(|p| p.to_array());
    rebase_texture_axis(&mut vertices, 3);
    rebase_texture_axis(&mut vertices, 4);
    let [a, b, c] = vertices;

    for edge in LineStepper::<10>::new(concat(a, b), concat(c, c)) {
        let (from, to) = split(edge);

        for [x, y, z, u, v] in LineStepper::<5>::new(from, to) {
            let color = tri.color(nan_to_zero(u), nan_to_zero(v));
            slab.splat_corners(nan_to_zero(x), nan_to_zero(y), nan_to_zero(z), color);
        }
    }
}

/// True if the triangle can splat into `slab`.
///
/// Uses the vertex z-range widened by one cell each way. A NaN z is
/// treated as touching every slab.
pub(crate) fn touches(tri: &Triangle, slab: &GridSlab<'_>) -> bool {
    let zs = [tri.p0.z, tri.p1.z, tri.p2.z];
    if zs.iter().any(|z| z.is_nan()) {
        return true;
    }

    let depth = slab.dims().depth;
    let lo = zs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = zs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    slab.overlaps(
        clamp_cell((lo - 1.0).floor(), depth),
        clamp_cell((hi + 1.0).ceil(), depth),
    )
}

/// Shifts one texture axis by whole periods so its minimum lies in `[0, 1)`.
///
/// Textures wrap, so the sampled texels do not change. An infinite value or
/// a span wider than [`MAX_TEXTURE_SPAN`] flattens the axis to 0; texture
/// coordinates are not grid-scaled and would otherwise size the walk.
fn rebase_texture_axis(vertices: &mut [[f64; 5]; 3], axis: usize) {
    let values = vertices.map(|p| p[axis]);
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if values.iter().any(|v| v.is_infinite()) || hi - lo > MAX_TEXTURE_SPAN {
        for p in vertices.iter_mut() {
            p[axis] = 0.0;
        }
        return;
    }
    if !lo.is_finite() {
        // all NaN
        return;
    }

    let shift = lo.floor();
    for p in vertices.iter_mut() {
        p[axis] -= shift;
    }
}

#[inline]
fn nan_to_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

fn concat(a: [f64; 5], b: [f64; 5]) -> [f64; 10] {
    let mut out = [0.0; 10];
    out[..5].copy_from_slice(&a);
    out[5..].copy_from_slice(&b);
    out
}

fn split(p: [f64; 10]) -> ([f64; 5], [f64; 5]) {
    let mut a = [0.0; 5];
    let mut b = [0.0; 5];
    a.copy_from_slice(&p[..5]);
    b.copy_from_slice(&p[5..]);
    (a, b)
}
