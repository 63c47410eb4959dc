//! Real roots of `a·t² + b·t + c = 0`.

use lumen_math::Tolerance;

/// Up to two real roots, stored inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots {
    values: [f64; 2],
    len: usize,
}

impl Roots {
    fn none() -> Self {
        Self {
            values: [0.0; 2],
            len: 0,
        }
    }

    fn one(t: f64) -> Self {
        Self {
            values: [t, 0.0],
            len: 1,
        }
    }

    fn two(t0: f64, t1: f64) -> Self {
        Self {
            values: [t0, t1],
            len: 2,
        }
    }

    /// Number of real roots (0, 1 or 2).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there are no real roots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The roots, unordered.
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    /// Iterate over the roots.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    /// Smallest root strictly greater than zero.
    pub fn smallest_positive(&self) -> Option<f64> {
        self.iter().filter(|&t| t > 0.0).reduce(f64::min)
    }
}

/// Solve `a·t² + b·t + c = 0` with the default tolerances.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    solve_quadratic_with(a, b, c, &Tolerance::DEFAULT)
}

/// Solve `a·t² + b·t + c = 0`.
///
/// A vanishing `a` degrades to the linear equation `b·t + c = 0`. A
/// discriminant within `tol.discriminant` of zero, relative to the size of
/// `b²` and `4ac`, yields a single repeated root so grazing rays are not
/// lost to rounding.
pub fn solve_quadratic_with(a: f64, b: f64, c: f64, tol: &Tolerance) -> Roots {
    if a.abs() < tol.quadratic {
        if b.abs() > tol.quadratic {
            return Roots::one(-c / b);
        }
        return Roots::none();
    }

    let four_ac = 4.0 * a * c;
    let disc = b * b - four_ac;
    if tol.is_zero_discriminant(disc, b * b + four_ac.abs()) {
        return Roots::one(-b / (2.0 * a));
    }
    if disc < 0.0 {
        return Roots::none();
    }

    let sqrt_disc = disc.sqrt();
    Roots::two(
        (-b - sqrt_disc) / (2.0 * a),
        (-b + sqrt_disc) / (2.0 * a),
    )
}
