use log::{debug, trace};

use crate::{basis, error::BSplineError, extrapolation::Extrapolation, knot::KnotVector};

/// One-dimensional clamped B-spline.
///
/// Knots and degree are fixed at construction. Control points and [Extrapolation] are configuration that can
/// be swapped cheaply between evaluations with [BSpline::with_control_points] and [BSpline::with_extrapolation].
#[derive(Debug, Clone)]
pub struct BSpline {
    knots: KnotVector,
    control_points: Option<Vec<f64>>,
    extrapolation: Extrapolation,
    // x-coordinates of the second and the second to last control point, slopes of linear extrapolation
    control_point_1_x: f64,
    control_point_m2_x: f64,
}

impl BSpline {
    /// Creates a B-spline of `degree` (order `degree + 1`) over `knots`. Internally `degree` copies of the
    /// first and last knot are added to clamp the ends. Control points must be set with
    /// [BSpline::with_control_points] before evaluation, and there must be `knots.len() + degree - 1` of them.
    /// # Example
    /// ```
    /// use clamped_bspline::BSpline;
    ///
    /// let mut spline = BSpline::new(2, &[0.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(4, spline.num_control_points());
    ///
    /// spline.with_control_points(vec![1.0, 2.0, 0.0, 3.0]).unwrap();
    /// assert_eq!(1.0, spline.evaluate(0.0).unwrap());
    /// ```
    /// # Errors
    /// [BSplineError::InvalidArgument] when there are fewer than 2 knots or they are not strictly increasing.
    /// ```
    /// use clamped_bspline::BSpline;
    ///
    /// assert!(BSpline::new(2, &[0.0, 1.0, 1.0, 2.0]).is_err());
    /// ```
    pub fn new(degree: usize, knots: &[f64]) -> Result<Self, BSplineError> {
        let knots = KnotVector::new(degree, knots)?;
        Ok(BSpline::from_knot_vector(knots))
    }

    /// Creates a B-spline with `num_control_points` control points over knots evenly spaced on `[0, 1]`.
    /// # Errors
    /// [BSplineError::InvalidArgument] when `num_control_points < degree + 1`.
    pub fn new_regular(degree: usize, num_control_points: usize) -> Result<Self, BSplineError> {
        let knots = KnotVector::regular(degree, num_control_points)?;
        Ok(BSpline::from_knot_vector(knots))
    }

    fn from_knot_vector(knots: KnotVector) -> Self {
        let xs = knots.greville_abscissae();
        let control_point_1_x = xs.get(1).copied().unwrap_or(xs[0]);
        let control_point_m2_x = if xs.len() >= 2 { xs[xs.len() - 2] } else { xs[0] };

        debug!(
            "BSpline: degree {}, {} knots, {} control points",
            knots.degree(),
            knots.knots().len(),
            knots.num_control_points()
        );
        BSpline {
            knots,
            control_points: None,
            extrapolation: Extrapolation::default(),
            control_point_1_x,
            control_point_m2_x,
        }
    }

    /// Sets the control points, replacing the previous ones. Returns itself so calls can be chained.
    /// # Errors
    /// [BSplineError::InvalidArgument] when `control_points.len()` differs from [BSpline::num_control_points].
    pub fn with_control_points(&mut self, control_points: Vec<f64>) -> Result<&mut Self, BSplineError> {
        if control_points.len() != self.num_control_points() {
            return Err(BSplineError::argument(format!(
                "with {} knots and degree {} expected {} control points (knots + degree - 1), got {}",
                self.knots.knots().len(),
                self.degree(),
                self.num_control_points(),
                control_points.len()
            )));
        }
        self.control_points = Some(control_points);
        Ok(self)
    }

    /// Sets how values outside the knots are computed. Default is [Extrapolation::Constant].
    pub fn with_extrapolation(&mut self, extrapolation: Extrapolation) -> &mut Self {
        self.extrapolation = extrapolation;
        self
    }

    pub fn degree(&self) -> usize {
        self.knots.degree()
    }

    /// Knots as given at construction, without the clamping copies.
    pub fn knots(&self) -> &[f64] {
        self.knots.knots()
    }

    /// Clamped knots: [BSpline::knots] with `degree` copies of the first and last knot on each side.
    pub fn expanded_knots(&self) -> &[f64] {
        self.knots.expanded()
    }

    pub fn num_control_points(&self) -> usize {
        self.knots.num_control_points()
    }

    /// Control points, `None` until set with [BSpline::with_control_points].
    pub fn control_points(&self) -> Option<&[f64]> {
        self.control_points.as_deref()
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// x-coordinate of each control point, at the center of its area of influence (Greville abscissae).
    /// Not used for evaluation, handy for plotting control points next to the curve.
    pub fn control_points_x(&self) -> Vec<f64> {
        self.knots.greville_abscissae()
    }

    /// Value at `x` of the basis function `index` of the given `degree`, over the clamped knots.
    pub fn basis_function(&self, index: usize, degree: usize, x: f64) -> f64 {
        basis::basis_function(self.knots.expanded(), index, degree, x)
    }

    /// Value of the spline at `x`. Positions outside `[knots[0], knots[last])` are extrapolated, the last knot
    /// included.
    /// # Errors
    /// [BSplineError::InvalidState] if control points were not set.
    pub fn evaluate(&self, x: f64) -> Result<f64, BSplineError> {
        let control_points = self.require_control_points("evaluate")?;
        Ok(self.evaluate_with(control_points, x))
    }

    /// [BSpline::evaluate] for each of `x_vector`.
    pub fn batch_evaluate(&self, x_vector: &[f64]) -> Result<Vec<f64>, BSplineError> {
        let control_points = self.require_control_points("batch_evaluate")?;
        Ok(x_vector
            .iter()
            .map(|x| self.evaluate_with(control_points, *x))
            .collect())
    }

    /// Whether `x` is evaluated from the basis functions rather than extrapolated.
    pub(crate) fn contains(&self, x: f64) -> bool {
        self.knots.contains(x)
    }

    fn evaluate_with(&self, control_points: &[f64], x: f64) -> f64 {
        if !self.contains(x) {
            return self.extrapolate(control_points.len(), |j| control_points[j], x);
        }
        let degree = self.degree();
        control_points
            .iter()
            .enumerate()
            .map(|(i, c)| c * self.basis_function(i, degree, x))
            .sum()
    }

    /// Value outside the knots for a curve of `num_control_points` control points, `control_point(j)` giving
    /// the j-th one.
    pub(crate) fn extrapolate<F: Fn(usize) -> f64>(&self, num_control_points: usize, control_point: F, x: f64) -> f64 {
        trace!("BSpline: extrapolating {:?} at x={}", self.extrapolation, x);
        let first = self.knots.first();
        let last = self.knots.last();
        let n = num_control_points;
        match self.extrapolation {
            Extrapolation::Zero => 0.0,
            Extrapolation::Linear if n >= 2 => {
                if x < first {
                    let slope = (control_point(1) - control_point(0)) / (self.control_point_1_x - first);
                    control_point(0) + (x - first) * slope
                } else {
                    let slope = (control_point(n - 1) - control_point(n - 2)) / (last - self.control_point_m2_x);
                    control_point(n - 1) + (x - last) * slope
                }
            }
            // a single control point has no slope
            Extrapolation::Constant | Extrapolation::Linear => {
                if x < first {
                    control_point(0)
                } else {
                    control_point(n - 1)
                }
            }
        }
    }

    /// Derivative of this spline: same knots, degree one less, new control points. Its extrapolation is
    /// [Extrapolation::Zero] for a zero or constant extrapolated spline and [Extrapolation::Constant] for a
    /// linearly extrapolated one. `self` is not modified.
    /// # Errors
    /// [BSplineError::InvalidState] if control points were not set, or the spline has degree 0.
    pub fn derivative(&self) -> Result<BSpline, BSplineError> {
        let control_points = self.require_control_points("derivative")?;
        let degree = self.degree();
        if degree == 0 {
            return Err(BSplineError::state("derivative of a degree 0 spline is not a spline"));
        }

        // q_i = p * (c_{i+1} - c_i) / (t_{i+p+1} - t_{i+1})
        let t = self.knots.expanded();
        let derived: Vec<f64> = control_points
            .windows(2)
            .enumerate()
            .map(|(i, c)| degree as f64 * (c[1] - c[0]) / (t[i + 1 + degree] - t[i + 1]))
            .collect();

        let mut derivative = BSpline::new(degree - 1, self.knots())?;
        derivative
            .with_extrapolation(self.extrapolation.derivative())
            .with_control_points(derived)?;
        debug!("BSpline: derivative of degree {} spline", degree);
        Ok(derivative)
    }

    fn require_control_points(&self, operation: &str) -> Result<&[f64], BSplineError> {
        self.control_points.as_deref().ok_or_else(|| {
            BSplineError::state(format!(
                "{} requires control points to be set with with_control_points",
                operation
            ))
        })
    }
}
