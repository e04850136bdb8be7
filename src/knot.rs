use crate::error::BSplineError;

/// Clamped knot vector of a B-spline of a given degree.
/// - `degree` - polynomial degree of every basis segment,
/// - `expanded` - original knots with `degree` copies of the first and last knot prepended and appended.
///
/// The original knots are strictly increasing, so the expanded vector only repeats values at its ends.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KnotVector {
    degree: usize,
    expanded: Vec<f64>,
}

impl KnotVector {
    /// Validates `knots` and clamps them for `degree`.
    /// # Errors
    /// [BSplineError::InvalidArgument] when there are fewer than 2 knots, or they are not finite and strictly
    /// increasing.
    pub fn new(degree: usize, knots: &[f64]) -> Result<Self, BSplineError> {
        if knots.len() < 2 {
            return Err(BSplineError::argument(format!(
                "at least 2 knots are required, got {}",
                knots.len()
            )));
        }
        if knots.iter().any(|k| !k.is_finite()) {
            return Err(BSplineError::argument(format!("knots must be finite, got {:?}", knots)));
        }
        if !knots.windows(2).all(|w| w[0] < w[1]) {
            return Err(BSplineError::argument(format!(
                "knots must be strictly increasing (no repeats), got {:?}",
                knots
            )));
        }

        let first = knots[0];
        let last = knots[knots.len() - 1];
        let mut expanded = Vec::with_capacity(knots.len() + 2 * degree);
        expanded.extend(std::iter::repeat(first).take(degree));
        expanded.extend_from_slice(knots);
        expanded.extend(std::iter::repeat(last).take(degree));

        Ok(KnotVector { degree, expanded })
    }

    /// Knots evenly spaced over `[0, 1]`, as many as needed for `num_control_points`.
    /// # Errors
    /// [BSplineError::InvalidArgument] when `num_control_points < degree + 1`.
    pub fn regular(degree: usize, num_control_points: usize) -> Result<Self, BSplineError> {
        if num_control_points < degree + 1 {
            return Err(BSplineError::argument(format!(
                "a regular spline of degree {} requires at least {} control points, got {}",
                degree,
                degree + 1,
                num_control_points
            )));
        }
        let num_knots = num_control_points - degree + 1;
        let knots: Vec<f64> = (0..num_knots)
            .map(|i| i as f64 / (num_knots - 1) as f64)
            .collect();
        KnotVector::new(degree, &knots)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn expanded(&self) -> &[f64] {
        &self.expanded
    }

    /// Original (un-clamped) knots.
    pub fn knots(&self) -> &[f64] {
        &self.expanded[self.degree..self.expanded.len() - self.degree]
    }

    pub fn num_control_points(&self) -> usize {
        self.knots().len() + self.degree - 1
    }

    pub fn first(&self) -> f64 {
        self.expanded[0]
    }

    pub fn last(&self) -> f64 {
        self.expanded[self.expanded.len() - 1]
    }

    /// Half-open domain test, `first <= x < last`. The last knot itself is outside.
    pub fn contains(&self, x: f64) -> bool {
        self.first() <= x && x < self.last()
    }

    /// Greville abscissae: one x-coordinate per control point, the mean of its `degree` inner knots.
    /// End control points sit on the end knots. For degree 0 the window is empty, so interior control points
    /// take the midpoint of their own interval.
    pub fn greville_abscissae(&self) -> Vec<f64> {
        let t = &self.expanded;
        let n = self.num_control_points();
        (0..n)
            .map(|i| {
                if i == 0 {
                    self.first()
                } else if i == n - 1 {
                    self.last()
                } else if self.degree == 0 {
                    (t[i] + t[i + 1]) / 2.0
                } else {
                    t[i + 1..i + 1 + self.degree].iter().sum::<f64>() / self.degree as f64
                }
            })
            .collect()
    }
}
