extern crate clamped_bspline;

use clamped_bspline::BSpline;

fn main() {

    let mut spline = BSpline::new(3, &[0.0, 1.0, 2.0, 4.0, 5.0, 6.0]).unwrap();
    spline.with_control_points(vec![1.0, -1.0, 0.0, 3.0, 1.0, 2.0, 0.5, 1.0]).unwrap();

    let x_min = 0.0;
    let x_max = 6.0;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.2}", x, spline.evaluate(x).unwrap());
    }
}
