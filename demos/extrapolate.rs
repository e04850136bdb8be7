extern crate clamped_bspline;

use clamped_bspline::{BSpline, Extrapolation};

fn main() {

    let mut spline = BSpline::new(2, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    spline.with_control_points(vec![1.0, 0.0, -2.0, 1.0, 0.5, 1.0]).unwrap();

    let x_min = 0.0;
    let x_max = 6.0;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    let modes = [Extrapolation::Zero, Extrapolation::Constant, Extrapolation::Linear];

    println!("x;zero;constant;linear");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        print!("{:.2}", x);
        for mode in modes {
            spline.with_extrapolation(mode);
            print!(";{:.2}", spline.evaluate(x).unwrap());
        }
        println!();
    }
}
