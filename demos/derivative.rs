extern crate clamped_bspline;

use clamped_bspline::{BSpline, Extrapolation};

fn main() {

    let mut spline = BSpline::new_regular(3, 8).unwrap();
    spline
        .with_control_points(vec![0.0, 1.0, 0.5, -1.0, 0.0, 2.0, 1.5, 1.0])
        .unwrap()
        .with_extrapolation(Extrapolation::Linear);

    let first = spline.derivative().unwrap();
    let second = first.derivative().unwrap();

    let x_min = -0.2;
    let x_max = 1.2;
    let number_of_steps = 70;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y;dy;ddy");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!(
            "{:.2};{:.3};{:.3};{:.3}",
            x,
            spline.evaluate(x).unwrap(),
            first.evaluate(x).unwrap(),
            second.evaluate(x).unwrap()
        );
    }
}
