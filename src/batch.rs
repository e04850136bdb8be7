//! Batched evaluation of many B-splines that share the knots and degree of one [BSpline].
//!
//! Shapes follow the layout of a layer with `num_inputs` inputs and `num_outputs` outputs, where each
//! (input, output) pair has its own curve:
//! - `inputs`: `[batch_size, num_inputs]`,
//! - `control_points`: `num_inputs` matrices of `[num_outputs, num_control_points]`,
//! - result: `batch_size` matrices of `[num_outputs, num_inputs]`.
//!
//! Basis functions are computed once per degree level for all positions (see [BatchEvaluator::evaluate]);
//! positions outside the knots use the spline's [Extrapolation](crate::Extrapolation) exactly like
//! [BSpline::evaluate].

use log::trace;
use nalgebra::{DMatrix, DVector};

use crate::{basis, error::BSplineError, spline::BSpline};

/// Batched evaluator borrowing the knots, degree and extrapolation of `spline`. Control points set on the
/// spline are ignored, they are given to every call instead.
#[derive(Debug, Clone, Copy)]
pub struct BatchEvaluator<'a> {
    spline: &'a BSpline,
}

impl<'a> BatchEvaluator<'a> {
    pub fn new(spline: &'a BSpline) -> Self {
        BatchEvaluator { spline }
    }

    /// Evaluates `num_inputs * num_outputs` curves on a batch of positions.
    ///
    /// `inputs[(b, i)]` is evaluated by the curves `control_points[i].row(o)` for every output `o`, and
    /// lands in `result[b][(o, i)]`.
    /// # Errors
    /// [BSplineError::InvalidArgument] when `control_points` is empty, its matrices differ in shape, their
    /// column count is not [BSpline::num_control_points], or `inputs` does not have one column per input.
    pub fn evaluate(
        &self,
        inputs: &DMatrix<f64>,
        control_points: &[DMatrix<f64>],
    ) -> Result<Vec<DMatrix<f64>>, BSplineError> {
        let (num_outputs, num_control_points) = self.check_control_points(control_points)?;
        let num_inputs = control_points.len();
        if inputs.ncols() != num_inputs {
            return Err(BSplineError::argument(format!(
                "control points define {} inputs but inputs have shape [{}, {}]",
                num_inputs,
                inputs.nrows(),
                inputs.ncols()
            )));
        }
        let batch_size = inputs.nrows();
        trace!(
            "BatchEvaluator: batch {}, {} inputs, {} outputs, {} control points",
            batch_size,
            num_inputs,
            num_outputs,
            num_control_points
        );

        // row b * num_inputs + i holds inputs[(b, i)]
        let flat_inputs = DVector::from_fn(batch_size * num_inputs, |r, _| inputs[(r / num_inputs, r % num_inputs)]);
        let table = basis::basis_table(self.spline.expanded_knots(), self.spline.degree(), &flat_inputs);

        Ok((0..batch_size)
            .map(|b| {
                DMatrix::from_fn(num_outputs, num_inputs, |o, i| {
                    let x = inputs[(b, i)];
                    if self.spline.contains(x) {
                        table.row(b * num_inputs + i).dot(&control_points[i].row(o))
                    } else {
                        let curve = control_points[i].row(o);
                        self.spline.extrapolate(curve.len(), |j| curve[j], x)
                    }
                })
            })
            .collect())
    }

    /// Evaluates a single curve at each of `positions`.
    /// # Errors
    /// [BSplineError::InvalidArgument] when `control_points.len()` is not [BSpline::num_control_points].
    pub fn evaluate_curve(
        &self,
        positions: &DVector<f64>,
        control_points: &DVector<f64>,
    ) -> Result<DVector<f64>, BSplineError> {
        let inputs = DMatrix::from_column_slice(positions.len(), 1, positions.as_slice());
        let control_points = [DMatrix::from_row_slice(1, control_points.len(), control_points.as_slice())];
        let outputs = self.evaluate(&inputs, &control_points)?;
        Ok(DVector::from_iterator(outputs.len(), outputs.iter().map(|output| output[(0, 0)])))
    }

    /// Evaluates a single curve at a single position.
    /// # Errors
    /// [BSplineError::InvalidArgument] when `control_points.len()` is not [BSpline::num_control_points].
    pub fn evaluate_scalar(&self, x: f64, control_points: &DVector<f64>) -> Result<f64, BSplineError> {
        let values = self.evaluate_curve(&DVector::from_element(1, x), control_points)?;
        Ok(values[0])
    }

    fn check_control_points(&self, control_points: &[DMatrix<f64>]) -> Result<(usize, usize), BSplineError> {
        let Some(first) = control_points.first() else {
            return Err(BSplineError::argument("batched evaluation requires control points for at least one input"));
        };
        let shape = first.shape();
        if let Some((i, other)) = control_points.iter().enumerate().find(|(_, m)| m.shape() != shape) {
            return Err(BSplineError::argument(format!(
                "control points of input {} have shape {:?}, input 0 has {:?}",
                i,
                other.shape(),
                shape
            )));
        }
        if shape.1 != self.spline.num_control_points() {
            return Err(BSplineError::argument(format!(
                "control points have {} columns, the B-spline requires {} control points",
                shape.1,
                self.spline.num_control_points()
            )));
        }
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::Extrapolation;

    fn random_control_points(rng: &mut StdRng, num_inputs: usize, num_outputs: usize, num_control_points: usize) -> Vec<DMatrix<f64>> {
        (0..num_inputs)
            .map(|_| DMatrix::from_fn(num_outputs, num_control_points, |_, _| rng.gen_range(-2.0..2.0)))
            .collect()
    }

    fn assert_matches_scalar(
        spline: &mut BSpline,
        inputs: &DMatrix<f64>,
        control_points: &[DMatrix<f64>],
        outputs: &[DMatrix<f64>],
    ) {
        let eps = 1e-9;
        assert_eq!(inputs.nrows(), outputs.len());
        for (b, output) in outputs.iter().enumerate() {
            assert_eq!((control_points[0].nrows(), control_points.len()), output.shape());
            for o in 0..output.nrows() {
                for i in 0..output.ncols() {
                    let curve: Vec<f64> = control_points[i].row(o).iter().copied().collect();
                    spline.with_control_points(curve).unwrap();
                    let want = spline.evaluate(inputs[(b, i)]).unwrap();
                    assert_approx_eq!(want, output[(o, i)], eps);
                }
            }
        }
    }

    #[test]
    fn matches_scalar_evaluation() {
        let batch_size = 2;
        let num_inputs = 3;
        let num_outputs = 5;
        let num_control_points = 7;
        let margin = 0.2;
        let mut rng = StdRng::seed_from_u64(42);

        for degree in 0..=3 {
            for extrapolation in [Extrapolation::Zero, Extrapolation::Constant, Extrapolation::Linear] {
                let mut spline = BSpline::new_regular(degree, num_control_points).unwrap();
                spline.with_extrapolation(extrapolation);

                let inputs = DMatrix::from_fn(batch_size, num_inputs, |_, _| rng.gen_range(-margin..1.0 + margin));
                let control_points = random_control_points(&mut rng, num_inputs, num_outputs, num_control_points);

                let outputs = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points).unwrap();
                assert_matches_scalar(&mut spline, &inputs, &control_points, &outputs);
            }
        }
    }

    #[test]
    fn knot_boundaries() {
        let mut spline = BSpline::new(2, &[0.0, 0.5, 1.0]).unwrap();
        spline.with_extrapolation(Extrapolation::Linear);
        let inputs = DMatrix::from_row_slice(4, 1, &[0.0, 0.5, 1.0, -0.5]);
        let control_points = vec![DMatrix::from_row_slice(1, 4, &[1.0, 2.0, -1.0, 0.5])];

        let outputs = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points).unwrap();
        assert_matches_scalar(&mut spline, &inputs, &control_points, &outputs);
        assert_approx_eq!(0.5, outputs[2][(0, 0)], 1e-12);
    }

    #[test]
    fn extrapolates_each_curve() {
        let eps = 1e-12;
        let mut spline = BSpline::new(1, &[0.0, 1.0, 2.0]).unwrap();
        spline.with_extrapolation(Extrapolation::Linear);
        let inputs = DMatrix::from_row_slice(2, 2, &[-1.0, 3.0, 2.0, -0.5]);
        let control_points = vec![
            DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 3.0, 5.0, 4.0, 4.0]),
            DMatrix::from_row_slice(2, 3, &[-2.0, 0.0, 1.0, 1.0, 1.0, -1.0]),
        ];

        let outputs = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points).unwrap();
        assert_matches_scalar(&mut spline, &inputs, &control_points, &outputs);
        assert_approx_eq!(-1.0, outputs[0][(0, 0)], eps);
        assert_approx_eq!(6.0, outputs[0][(1, 0)], eps);
        assert_approx_eq!(2.0, outputs[0][(0, 1)], eps);
        assert_approx_eq!(-3.0, outputs[0][(1, 1)], eps);
        assert_approx_eq!(3.0, outputs[1][(0, 0)], eps);
        assert_approx_eq!(4.0, outputs[1][(1, 0)], eps);
    }

    #[test]
    fn evaluate_curve() {
        let eps = 1e-12;
        let mut spline = BSpline::new_regular(3, 6).unwrap();
        let control_points = vec![1.0, 0.0, 1.0, 1.0, 0.0, -1.0];
        let positions = DVector::from_fn(10, |i, _| i as f64 / 10.0001 / 2.0 + 0.5);

        let values = BatchEvaluator::new(&spline)
            .evaluate_curve(&positions, &DVector::from_vec(control_points.clone()))
            .unwrap();

        spline.with_control_points(control_points).unwrap();
        assert_eq!(positions.len(), values.len());
        for i in 0..positions.len() {
            assert_approx_eq!(spline.evaluate(positions[i]).unwrap(), values[i], eps);
        }
    }

    #[test]
    fn evaluate_scalar() {
        let spline = BSpline::new_regular(3, 6).unwrap();
        let control_points = DVector::from_vec(vec![1.0, 0.0, 1.0, 1.0, 0.0, -1.0]);
        let evaluator = BatchEvaluator::new(&spline);

        assert_approx_eq!(1.0, evaluator.evaluate_scalar(0.0, &control_points).unwrap(), 1e-12);
        assert_approx_eq!(-1.0, evaluator.evaluate_scalar(1.0, &control_points).unwrap(), 1e-12);
    }

    #[test]
    fn ignores_spline_control_points() {
        let mut spline = BSpline::new_regular(1, 3).unwrap();
        spline.with_control_points(vec![100.0, 100.0, 100.0]).unwrap();
        let control_points = DVector::from_vec(vec![0.0, 1.0, 2.0]);

        let value = BatchEvaluator::new(&spline).evaluate_scalar(0.25, &control_points).unwrap();
        assert_approx_eq!(0.5, value, 1e-12);
    }

    #[test]
    fn empty_batch() {
        let spline = BSpline::new_regular(2, 4).unwrap();
        let inputs = DMatrix::<f64>::zeros(0, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let control_points = random_control_points(&mut rng, 2, 3, 4);

        let outputs = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn wrong_number_of_control_points() {
        let spline = BSpline::new_regular(2, 5).unwrap();
        let evaluator = BatchEvaluator::new(&spline);

        let result = evaluator.evaluate_scalar(0.5, &DVector::from_vec(vec![1.0; 4]));
        assert!(matches!(result, Err(BSplineError::InvalidArgument(_))));
    }

    #[test]
    fn wrong_number_of_inputs() {
        let spline = BSpline::new_regular(2, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let control_points = random_control_points(&mut rng, 3, 2, 5);
        let inputs = DMatrix::from_element(4, 2, 0.5);

        let result = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points);
        assert!(matches!(result, Err(BSplineError::InvalidArgument(_))));
    }

    #[test]
    fn mismatched_control_point_shapes() {
        let spline = BSpline::new_regular(2, 5).unwrap();
        let control_points = vec![DMatrix::zeros(2, 5), DMatrix::zeros(3, 5)];
        let inputs = DMatrix::from_element(1, 2, 0.5);

        let result = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points);
        assert!(matches!(result, Err(BSplineError::InvalidArgument(_))));
    }

    #[test]
    fn no_control_points() {
        let spline = BSpline::new_regular(2, 5).unwrap();
        let inputs = DMatrix::from_element(1, 0, 0.5);

        let result = BatchEvaluator::new(&spline).evaluate(&inputs, &[]);
        assert!(matches!(result, Err(BSplineError::InvalidArgument(_))));
    }
}
