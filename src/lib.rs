//! One-dimensional clamped B-splines: evaluation with extrapolation outside the knots, derivative curves,
//! and batched evaluation of many curves sharing the same knots.
//!
//! The knots given to [BSpline::new] are clamped, `degree` copies of the first and last knot are added on each
//! side, so the curve starts at the first control point and ends at the last one.
//!
//! # Example
//! ```
//! use clamped_bspline::{BSpline, Extrapolation};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let mut spline = BSpline::new_regular(3, 6).unwrap();
//! spline
//!     .with_control_points(vec![1.0, 0.0, 1.0, 1.0, 0.0, -1.0])
//!     .unwrap()
//!     .with_extrapolation(Extrapolation::Linear);
//!
//! assert_approx_eq!(1.0, spline.evaluate(0.0).unwrap(), 1e-12);
//! assert_approx_eq!(-1.0, spline.evaluate(1.0).unwrap(), 1e-12);
//!
//! let derivative = spline.derivative().unwrap();
//! assert_eq!(2, derivative.degree());
//! ```

mod basis;
mod batch;
mod error;
mod extrapolation;
mod knot;
mod sample;
mod spline;

pub use batch::BatchEvaluator;
pub use error::BSplineError;
pub use extrapolation::Extrapolation;
pub use sample::{Sampler, Samples};
pub use spline::BSpline;
