//! Cox-de Boor recursion over an expanded knot vector `t`.
//!
//! Degree 0 basis functions are indicators of the half-open intervals `[t[i], t[i+1])`; higher degrees blend
//! two neighbouring functions of the degree below. Terms whose knot span is empty (repeated knots at the
//! clamped ends) contribute zero instead of `0/0`.

use nalgebra::{DMatrix, DVector};

/// Value of the `i`-th basis function of degree `p` at `x`, by plain recursion.
/// Indices whose support runs past the end of `t` are zero.
pub(crate) fn basis_function(t: &[f64], i: usize, p: usize, x: f64) -> f64 {
    if i + p + 1 >= t.len() {
        return 0.0;
    }
    if p == 0 {
        return if t[i] <= x && x < t[i + 1] { 1.0 } else { 0.0 };
    }

    let mut left = 0.0;
    if t[i + p] != t[i] {
        left = (x - t[i]) / (t[i + p] - t[i]) * basis_function(t, i, p - 1, x);
    }

    let mut right = 0.0;
    if t[i + p + 1] != t[i + 1] {
        right = (t[i + p + 1] - x) / (t[i + p + 1] - t[i + 1]) * basis_function(t, i + 1, p - 1, x);
    }
    left + right
}

/// All basis functions of `degree` at every position, one row per position and one column per basis index.
///
/// Each degree level is computed once for every position and index from the level below, so the cost is
/// `O(degree * positions * knots)`. The result has `t.len() - degree - 1` columns, i.e. one per control point.
pub(crate) fn basis_table(t: &[f64], degree: usize, positions: &DVector<f64>) -> DMatrix<f64> {
    let n = t.len();
    let mut level = DMatrix::from_fn(positions.len(), n - 1, |r, k| {
        let x = positions[r];
        if t[k] <= x && x < t[k + 1] {
            1.0
        } else {
            0.0
        }
    });

    for p in 1..=degree {
        let below = level;
        level = DMatrix::from_fn(positions.len(), n - p - 1, |r, k| {
            let x = positions[r];
            let mut value = 0.0;
            if t[k + p] != t[k] {
                value += (x - t[k]) / (t[k + p] - t[k]) * below[(r, k)];
            }
            if t[k + p + 1] != t[k + 1] {
                value += (t[k + p + 1] - x) / (t[k + p + 1] - t[k + 1]) * below[(r, k + 1)];
            }
            value
        });
    }
    level
}
