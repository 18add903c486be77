//! Fit a synthetic 32-well plate and print the IC50 table
//!
//! Run with `cargo run --example plate`.

use ic50::prelude::*;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const SERIES_UM: [f64; 8] = [30.0, 10.0, 3.0, 1.0, 0.3, 0.1, 0.03, 0.01];
const N_WELLS: usize = 32;

fn label(well: usize) -> String {
    match well {
        0 | 30 => "MOCK".to_string(),
        16 => "MEK".to_string(),
        31 => "NONE".to_string(),
        // A compound that never responds
        7 => "inactive".to_string(),
        w => format!("cmpd-{:02}", w),
    }
}

fn read(well: usize, x: f64) -> f64 {
    match well {
        0 | 30 | 7 => 100.0,
        16 => 5.0,
        31 => 0.0,
        w => LogisticParams::new(2.0, 100.0, -7.5 + 0.08 * w as f64, -1.0).evaluate(x),
    }
}

fn main() -> Result<(), Ic50Error> {
    let x: Vec<f64> = SERIES_UM.iter().map(|c| (c * 1e-6).log10()).collect();
    let mut rng = StdRng::seed_from_u64(2024);
    let noise = Normal::new(0.0, 2.0).unwrap();

    let experiments: Vec<Array2<f64>> = (0..3)
        .map(|_| {
            Array2::from_shape_fn((x.len(), N_WELLS), |(r, w)| {
                let value = read(w, x[r]);
                // Noise-free inactive well so it shows up as a failure
                if w == 7 {
                    value
                } else {
                    value + noise.sample(&mut rng)
                }
            })
        })
        .collect();

    let plate = Plate::from_labels(
        (0..N_WELLS).map(label).collect(),
        ConcentrationGrid::shared(&SERIES_UM, N_WELLS),
        ReplicateMatrix::from_experiments(&experiments)?,
    )?;

    let report = plate.response_curves(&BuilderOptions::default())?;
    let render = RenderConfig::default().with_y_label("Viability (%)");

    println!("{:<12} {:>14} {:>10}  file", "compound", "IC50 (µM)", "slope");
    for (row, curve) in report.summary().iter().zip(&report.curves) {
        println!(
            "{:<12} {:>14} {:>10.3}  {}",
            row.label,
            row.ic50_micromolar,
            row.hill_slope,
            render.file_name(curve)
        );
    }
    for failure in &report.failures {
        println!("{:<12} skipped: {}", failure.label, failure.reason);
    }

    if let Some(curve) = report.curve("cmpd-10") {
        let (lo, hi) = curve.fit.ic50_interval(1.96);
        println!(
            "\n{}: {} (95% CI {:.3e} to {:.3e} M, R² = {:.4})",
            curve.label,
            render.annotation(curve),
            lo,
            hi,
            curve.fit.diagnostics.r_squared
        );
    }

    Ok(())
}
