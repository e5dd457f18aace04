// License and copyright information
// Copyright 2024 by CREAPUNK, http://creapunk.com
// Licensed under the Apache License, Version 2.0 (the "License");

use plotters::prelude::*;

use std::f64::consts::{PI, TAU};
use std::sync::atomic::{AtomicU32, Ordering};

use fixpulse_math::clarke_transform::{clarke, ThreePhase};
use fixpulse_math::cordic::{cart2pol, Cartesian};
use fixpulse_math::fixed_point::Fp;
use fixpulse_math::interpolation::{interpolate_2d, interpolate_3d, Point, Table3D};
use fixpulse_math::sqrt::isqrt;
use fixpulse_math::trigonometry::sin;

// Sweeps every fixed point kernel against its f64 reference, prints the
// worst observed deviation per kernel and renders the CORDIC angle
// error over one full turn. Exits nonzero when a kernel leaves its
// error budget.
fn main() {
    let mut failures = 0;

    failures += sine_accuracy();

    let (cordic_failures, angle_errors) = cordic_accuracy();
    failures += cordic_failures;

    failures += sqrt_accuracy();
    failures += clarke_accuracy();
    failures += interpolation_accuracy();
    failures += observer_dispatch();

    plot_angle_errors(&angle_errors);

    if failures != 0 {
        println!("{} checks exceeded their error budget", failures);
        std::process::exit(1);
    }
    println!("all checks passed");
}

/// Full sweep of the 16 bit angle range against f64 sine.
///
/// The truncating 256 entry lookup may deviate by one table step at the
/// steepest part of the wave, slightly above 804 q15 units.
fn sine_accuracy() -> u32 {
    let mut max_err = 0.0f64;
    for angle in i16::MIN..=i16::MAX {
        let reference = (angle as f64 / 65536.0 * TAU).sin() * 32768.0;
        let value = sin(angle).to_bits() as f64;
        max_err = max_err.max((value - reference).abs());
    }

    println!("sine lookup:       max error {:6.1} q15 units (budget 810)", max_err);
    (max_err > 810.0) as u32
}

/// Dense circle sweep of the vectoring CORDIC on three radii.
///
/// Returns the angle error samples of the middle radius for plotting.
fn cordic_accuracy() -> (u32, Vec<(f64, f64)>) {
    let mut max_angle_err = 0.0f64;
    let mut max_mag_rel = 0.0f64;
    let mut angle_errors = Vec::new();

    for step in 0..4096 {
        // Offset by half a step so the exact axes stay out of the sweep
        let phi = (step as f64 + 0.5) / 4096.0 * TAU;

        for radius in [8192.0, 65536.0, 524288.0] {
            let re = (phi.cos() * radius).round() as i32;
            let im = (phi.sin() * radius).round() as i32;
            let polar = cart2pol(Cartesian::<12> {
                re: Fp::from_bits(re),
                im: Fp::from_bits(im),
            });

            let angle_ref = (im as f64).atan2(re as f64) / PI * 32768.0;
            let mut diff = polar.angle as f64 - angle_ref;
            if diff > 32768.0 {
                diff -= 65536.0;
            } else if diff < -32768.0 {
                diff += 65536.0;
            }
            max_angle_err = max_angle_err.max(diff.abs());

            let mag_ref = (re as f64).hypot(im as f64);
            let mag_rel = ((polar.mag.to_bits() as f64 - mag_ref) / mag_ref).abs();
            max_mag_rel = max_mag_rel.max(mag_rel);

            if radius == 65536.0 {
                angle_errors.push((angle_ref, diff));
            }
        }
    }

    println!("cordic angle:      max error {:6.1} q15 units (budget 32)", max_angle_err);
    println!("cordic magnitude:  max error {:6.4} % (budget 0.25)", max_mag_rel * 100.0);

    let failures = (max_angle_err > 32.0) as u32 + (max_mag_rel > 2.5e-3) as u32;
    (failures, angle_errors)
}

/// Strided sweep of the full radicand range.
///
/// The floor bound is checked in exact integer arithmetic; the f64
/// comparison is only reported.
fn sqrt_accuracy() -> u32 {
    let mut failures = 0u32;
    let mut max_err = 0.0f64;

    let mut n: u32 = 0;
    loop {
        let root = isqrt(n) as u64;
        if root * root > n as u64 || (root + 1) * (root + 1) <= n as u64 {
            failures += 1;
        }
        max_err = max_err.max((root as f64 - (n as f64).sqrt()).abs());

        match n.checked_add(65_537) {
            Some(next) => n = next,
            None => break,
        }
    }

    println!(
        "integer sqrt:      max error {:6.3} vs f64 floor ({} bound violations)",
        max_err, failures
    );
    failures
}

/// Balanced three phase sweep over one electrical revolution.
fn clarke_accuracy() -> u32 {
    let mut failures = 0u32;
    let mut max_err = 0.0f64;

    for step in 0..1024 {
        let phi = step as f64 / 1024.0 * TAU;
        let a = (phi.sin() * 4096.0).round() as i32;
        let b = ((phi - TAU / 3.0).sin() * 4096.0).round() as i32;

        let out = clarke(ThreePhase::<12> {
            a: Fp::from_bits(a),
            b: Fp::from_bits(b),
            c: Fp::from_bits(-(a + b)),
        });
        if out.re.to_bits() != a {
            failures += 1;
        }

        let beta_ref = (a as f64 + 2.0 * b as f64) / 3f64.sqrt();
        max_err = max_err.max((out.im.to_bits() as f64 - beta_ref).abs());
    }

    println!("clarke transform:  max error {:6.2} lsb (budget 2)", max_err);
    failures + (max_err > 2.0) as u32
}

/// Compares both interpolators against f64 references on the same
/// tables, inside and outside the sampled range.
fn interpolation_accuracy() -> u32 {
    // Parabola sampled at nine points, queried densely
    let lut_2d: [Point<12>; 9] = [-8192, -6144, -4096, -2048, 0, 2048, 4096, 6144, 8192].map(|x| {
        Point {
            x: Fp::from_bits(x),
            y: Fp::from_bits(((x as f64).powi(2) / 8192.0).round() as i32),
        }
    });

    let mut max_err_2d = 0.0f64;
    let mut x = -10240;
    while x <= 10240 {
        let value = interpolate_2d(Fp::from_bits(x), &lut_2d).to_bits() as f64;
        max_err_2d = max_err_2d.max((value - linear_ref(x, &lut_2d)).abs());
        x += 64;
    }

    // Saddle surface z = x * y sampled on a 5x5 grid
    let axis: [Fp; 5] = [0, 2048, 4096, 6144, 8192].map(Fp::from_bits);
    let mut z_values = [Fp::ZERO; 25];
    for (iy, y) in axis.iter().enumerate() {
        for (ix, x) in axis.iter().enumerate() {
            let z = x.to_bits() as f64 * y.to_bits() as f64 / 8192.0;
            z_values[iy * 5 + ix] = Fp::from_bits(z.round() as i32);
        }
    }
    let lut_3d = Table3D {
        x_values: &axis,
        y_values: &axis,
        z_values: &z_values,
    };

    let mut max_err_3d = 0.0f64;
    let mut qy = -1024;
    while qy <= 9216 {
        let mut qx = -1024;
        while qx <= 9216 {
            let input = Point {
                x: Fp::from_bits(qx),
                y: Fp::from_bits(qy),
            };
            let value = interpolate_3d(input, &lut_3d).to_bits() as f64;
            max_err_3d = max_err_3d.max((value - bilinear_ref(qx, qy, &lut_3d)).abs());
            qx += 512;
        }
        qy += 512;
    }

    println!("2d interpolation:  max error {:6.2} lsb (budget 1)", max_err_2d);
    println!("3d interpolation:  max error {:6.2} lsb (budget 2)", max_err_3d);
    (max_err_2d > 1.0) as u32 + (max_err_3d > 2.0) as u32
}

/// Drives a blinker for a million ticks and checks that every edge
/// reaches an attached observer, like the component demo loop.
fn observer_dispatch() -> u32 {
    use fixpulse_observer::blinker::{BlinkState, Blinker};

    static EDGES: AtomicU32 = AtomicU32::new(0);
    fn count_edge() {
        EDGES.fetch_add(1, Ordering::Relaxed);
    }

    let mut blinker: Blinker<4> = Blinker::new(1000);
    blinker.subject.attach(count_edge).unwrap();
    for _ in 0..1_000_000 {
        blinker.tick();
    }

    let edges = EDGES.load(Ordering::Relaxed);
    let ok = edges == 1000 && blinker.state() == BlinkState::Off;
    println!(
        "observer dispatch: {} edges over 1000000 ticks ({})",
        edges,
        if ok { "ok" } else { "mismatch" }
    );
    (!ok) as u32
}

/// f64 piecewise linear reference using the same segment selection as
/// the kernel.
fn linear_ref(x: i32, lut: &[Point<12>]) -> f64 {
    let mut idx = 1;
    while idx < lut.len() - 1 && x > lut[idx].x.to_bits() {
        idx += 1;
    }
    let x0 = lut[idx - 1].x.to_bits() as f64;
    let x1 = lut[idx].x.to_bits() as f64;
    let y0 = lut[idx - 1].y.to_bits() as f64;
    let y1 = lut[idx].y.to_bits() as f64;
    y0 + (x as f64 - x0) * (y1 - y0) / (x1 - x0)
}

/// f64 bilinear reference using the same cell selection as the kernel.
fn bilinear_ref(x: i32, y: i32, lut: &Table3D<'_, 12>) -> f64 {
    let nx = lut.x_values.len();

    let mut ix2 = 1;
    while ix2 < nx - 1 && x > lut.x_values[ix2].to_bits() {
        ix2 += 1;
    }
    let mut iy2 = 1;
    while iy2 < lut.y_values.len() - 1 && y > lut.y_values[iy2].to_bits() {
        iy2 += 1;
    }

    let x0 = lut.x_values[ix2 - 1].to_bits() as f64;
    let x1 = lut.x_values[ix2].to_bits() as f64;
    let y0 = lut.y_values[iy2 - 1].to_bits() as f64;
    let y1 = lut.y_values[iy2].to_bits() as f64;

    let z_x1y1 = lut.z_values[(iy2 - 1) * nx + (ix2 - 1)].to_bits() as f64;
    let z_x2y1 = lut.z_values[(iy2 - 1) * nx + ix2].to_bits() as f64;
    let z_x1y2 = lut.z_values[iy2 * nx + (ix2 - 1)].to_bits() as f64;
    let z_x2y2 = lut.z_values[iy2 * nx + ix2].to_bits() as f64;

    let tx = (x as f64 - x0) / (x1 - x0);
    let z1 = z_x1y1 + tx * (z_x2y1 - z_x1y1);
    let z2 = z_x1y2 + tx * (z_x2y2 - z_x1y2);
    z1 + (y as f64 - y0) / (y1 - y0) * (z2 - z1)
}

// Renders the angle error curve over one turn
fn plot_angle_errors(angle_errors: &[(f64, f64)]) {
    let mut series = angle_errors.to_vec();
    series.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    let root = BitMapBackend::new("cordic_angle_error.png", (1000, 600)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root)
        .caption("CORDIC angle error over one turn", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-32768.0..32768.0, -16.0..16.0)
        .unwrap();

    chart.configure_mesh().draw().unwrap();

    chart
        .draw_series(LineSeries::new(series.into_iter(), &RED))
        .unwrap()
        .label("angle error [q15 units]")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .unwrap();
}
