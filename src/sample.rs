//! Tabulation of a [BSpline] for plotting: the curve, its first derivative, each of its basis functions and
//! the control points.

use std::io::{self, Write};

use crate::{error::BSplineError, spline::BSpline};

/// Samples a spline over its knots widened by a margin on both sides, so the extrapolation is visible too.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    spline: &'a BSpline,
    num_points: usize,
    margin: f64,
}

/// Values produced by [Sampler::sample].
/// - `x` - sampled positions,
/// - `curve` - spline value at each position,
/// - `derivative` - value of [BSpline::derivative] at each position, `None` for degree 0,
/// - `basis` - one row per control point, the value of its basis function at each position,
/// - `control_x`, `control_points` - control points placed at their [BSpline::control_points_x].
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub x: Vec<f64>,
    pub curve: Vec<f64>,
    pub derivative: Option<Vec<f64>>,
    pub basis: Vec<Vec<f64>>,
    pub control_x: Vec<f64>,
    pub control_points: Vec<f64>,
}

impl<'a> Sampler<'a> {
    /// Sampler with 1000 points and a margin of 0.1.
    pub fn new(spline: &'a BSpline) -> Self {
        Sampler { spline, num_points: 1000, margin: 0.1 }
    }

    /// Number of sampled positions, at least 2.
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points.max(2);
        self
    }

    /// Extra range sampled on each side, relative to the knots range. Negative values are taken as 0.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = if margin > 0.0 { margin } else { 0.0 };
        self
    }

    /// Evaluates the spline, its derivative and its basis functions at `num_points` positions evenly spaced from
    /// `knots[0] - margin * range`, stopping one step short of `knots[last] + margin * range`.
    /// # Errors
    /// [BSplineError::InvalidState] if the spline has no control points.
    pub fn sample(&self) -> Result<Samples, BSplineError> {
        let control_points = self
            .spline
            .control_points()
            .ok_or_else(|| BSplineError::state("sampling requires control points to be set with with_control_points"))?;

        let knots = self.spline.knots();
        let delta = knots[knots.len() - 1] - knots[0];
        let first = knots[0] - self.margin * delta;
        let last = knots[knots.len() - 1] + self.margin * delta;
        let x: Vec<f64> = (0..self.num_points)
            .map(|i| first + (last - first) * i as f64 / self.num_points as f64)
            .collect();

        let curve = self.spline.batch_evaluate(&x)?;
        let degree = self.spline.degree();
        let derivative = if degree == 0 {
            None
        } else {
            Some(self.spline.derivative()?.batch_evaluate(&x)?)
        };
        let basis = (0..self.spline.num_control_points())
            .map(|index| x.iter().map(|x| self.spline.basis_function(index, degree, *x)).collect())
            .collect();

        Ok(Samples {
            x,
            curve,
            derivative,
            basis,
            control_x: self.spline.control_points_x(),
            control_points: control_points.to_vec(),
        })
    }
}

impl Samples {
    /// Writes one line per sampled position, `x;y;dy;basis_0;basis_1;...`, after a header line. The `dy`
    /// column is left out when there is no derivative.
    pub fn write_table<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "x;y")?;
        if self.derivative.is_some() {
            write!(writer, ";dy")?;
        }
        for index in 0..self.basis.len() {
            write!(writer, ";basis_{}", index)?;
        }
        writeln!(writer)?;

        for (i, (x, y)) in self.x.iter().zip(&self.curve).enumerate() {
            write!(writer, "{:.6};{:.6}", x, y)?;
            if let Some(derivative) = &self.derivative {
                write!(writer, ";{:.6}", derivative[i])?;
            }
            for basis in &self.basis {
                write!(writer, ";{:.6}", basis[i])?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Writes one line per control point, `x;control_point`, after a header line.
    pub fn write_control_points<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "x;control_point")?;
        for (x, y) in self.control_x.iter().zip(&self.control_points) {
            writeln!(writer, "{:.6};{:.6}", x, y)?;
        }
        Ok(())
    }
}
