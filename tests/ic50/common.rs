#![allow(dead_code)]

use ic50::fit::LogisticParams;
use ic50::{ConcentrationGrid, Plate, ReplicateMatrix};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Half-log dilution series from 100 µM down to 1 nM
pub const SERIES_UM: [f64; 11] = [
    100.0,
    31.622_776_6,
    10.0,
    3.162_277_66,
    1.0,
    0.316_227_766,
    0.1,
    0.031_622_776_6,
    0.01,
    0.003_162_277_66,
    0.001,
];

/// What a synthetic well reads
#[derive(Debug, Clone, Copy)]
pub enum WellSpec {
    /// Logistic response with Gaussian replicate noise
    Curve(LogisticParams),
    /// Exactly constant response, no noise
    Flat(f64),
}

pub fn log_molar() -> Vec<f64> {
    SERIES_UM.iter().map(|c| (c * 1e-6).log10()).collect()
}

/// One (rows, wells) read per experiment
pub fn experiments(
    specs: &[WellSpec],
    n_experiments: usize,
    noise_sd: f64,
    seed: u64,
) -> Vec<Array2<f64>> {
    let x = log_molar();
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, noise_sd).unwrap();

    (0..n_experiments)
        .map(|_| {
            let mut read = Array2::zeros((x.len(), specs.len()));
            for (w, spec) in specs.iter().enumerate() {
                for (r, &xi) in x.iter().enumerate() {
                    read[[r, w]] = match spec {
                        WellSpec::Curve(p) => p.evaluate(xi) + noise.sample(&mut rng),
                        WellSpec::Flat(v) => *v,
                    };
                }
            }
            read
        })
        .collect()
}

pub fn plate(
    labels: &[&str],
    specs: &[WellSpec],
    n_experiments: usize,
    noise_sd: f64,
    seed: u64,
) -> Plate {
    let replicates =
        ReplicateMatrix::from_experiments(&experiments(specs, n_experiments, noise_sd, seed))
            .unwrap();
    Plate::from_labels(
        labels.iter().map(|s| s.to_string()).collect(),
        ConcentrationGrid::shared(&SERIES_UM, specs.len()),
        replicates,
    )
    .unwrap()
}
