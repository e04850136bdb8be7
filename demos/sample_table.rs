extern crate clamped_bspline;

use std::io;

use clamped_bspline::{BSpline, Sampler};

fn main() {

    let mut spline = BSpline::new_regular(2, 6).unwrap();
    spline.with_control_points(vec![1.0, 0.0, 1.0, 1.0, 0.0, -1.0]).unwrap();

    let samples = Sampler::new(&spline)
        .with_num_points(50)
        .with_margin(0.2)
        .sample()
        .unwrap();

    let mut stdout = io::stdout().lock();
    samples.write_table(&mut stdout).unwrap();
    println!();
    samples.write_control_points(&mut stdout).unwrap();
}
