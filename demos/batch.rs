extern crate clamped_bspline;

use clamped_bspline::{BSpline, BatchEvaluator, Extrapolation};
use nalgebra::DMatrix;

fn main() {

    let num_inputs = 2;
    let num_outputs = 3;
    let batch_size = 11;

    let mut spline = BSpline::new_regular(2, 5).unwrap();
    spline.with_extrapolation(Extrapolation::Linear);

    // one [num_outputs, num_control_points] matrix per input
    let control_points = vec![
        DMatrix::from_row_slice(num_outputs, 5, &[
            0.0, 1.0, 0.0, 1.0, 0.0,
            1.0, 1.0, 1.0, 1.0, 1.0,
            -1.0, -0.5, 0.0, 0.5, 1.0,
        ]),
        DMatrix::from_row_slice(num_outputs, 5, &[
            2.0, 0.0, 2.0, 0.0, 2.0,
            0.0, 0.5, 1.0, 0.5, 0.0,
            1.0, 0.0, -1.0, 0.0, 1.0,
        ]),
    ];

    let inputs = DMatrix::from_fn(batch_size, num_inputs, |b, i| {
        let x = -0.1 + 1.2 * b as f64 / (batch_size - 1) as f64;
        if i == 0 { x } else { 1.0 - x }
    });

    let outputs = BatchEvaluator::new(&spline).evaluate(&inputs, &control_points).unwrap();

    print!("x0;x1");
    for o in 0..num_outputs {
        for i in 0..num_inputs {
            print!(";y{}_{}", o, i);
        }
    }
    println!();
    for (b, output) in outputs.iter().enumerate() {
        print!("{:.2};{:.2}", inputs[(b, 0)], inputs[(b, 1)]);
        for o in 0..num_outputs {
            for i in 0..num_inputs {
                print!(";{:.3}", output[(o, i)]);
            }
        }
        println!();
    }
}
