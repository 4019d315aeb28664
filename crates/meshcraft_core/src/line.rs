//! # N-Dimensional Line Stepper
//!
//! Walks the straight segment between two N-dimensional points so that the
//! dominant axis (largest absolute displacement) advances by exactly one unit
//! per step; every other axis advances proportionally. This is the DDA
//! precondition for gap-free rasterization along the dominant axis.
//!
//! ```rust
//! use meshcraft_core::LineStepper;
//!
//! let points: Vec<[f64; 2]> = LineStepper::new([0.0, 0.0], [4.0, 2.0]).collect();
//! assert_eq!(points.len(), 5);
//! assert_eq!(points[2], [2.0, 1.0]);
//! ```

/// A finite, lazy walk from one point towards another.
///
/// Yields `floor(m) + 1` points where `m` is the largest absolute component
/// of the displacement. Zero or infinite displacement yields the start
/// point once.
#[derive(Debug, Clone)]
pub struct LineStepper<const N: usize> {
    point: [f64; N],
    step: [f64; N],
    pos: usize,
    count: usize,
}

impl<const N: usize> LineStepper<N> {
    /// Creates a stepper from `from` towards `to`.
    #[must_use]
    pub fn new(from: [f64; N], to: [f64; N]) -> Self {
        let mut step = [0.0; N];
        for (s, (a, b)) in step.iter_mut().zip(from.iter().zip(to.iter())) {
            *s = b - a;
        }

        // f64::max ignores NaN, so a NaN component never sizes the walk.
        let m = step.iter().fold(0.0_f64, |m, s| m.max(s.abs()));

        if m > 0.0 {
            for s in &mut step {
                *s /= m;
            }
        } else {
            step = [0.0; N];
        }

        // An infinite displacement has no unit walk; it degenerates to the start.
        let count = if m.is_finite() {
            (m.floor() as usize).saturating_add(1)
        } else {
            1
        };

        Self {
            point: from,
            step,
            pos: 0,
            count,
        }
    }

    /// Total number of points this stepper yields.
    #[inline]
    #[must_use]
    pub const fn count_total(&self) -> usize {
        self.count
    }

    /// Per-step increment vector.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> &[f64; N] {
        &self.step
    }
}

impl<const N: usize> Iterator for LineStepper<N> {
    type Item = [f64; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.count {
            return None;
        }

        let current = self.point;
        for (p, s) in self.point.iter_mut().zip(self.step.iter()) {
            *p += s;
        }
        self.pos += 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.pos;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for LineStepper<N> {}

impl<const N: usize> std::iter::FusedIterator for LineStepper<N> {}
