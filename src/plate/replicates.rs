//! Replicate measurements and their per-concentration reduction
//!
//! A [`ReplicateMatrix`] stores one full plate read per experiment as a
//! rank-3 array indexed by (experiment, row, well). Rows are dilution points,
//! so reducing a well over the experiment axis yields one mean and one
//! standard deviation per concentration.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::error::PlateError;

/// Raw replicate readings with shape (experiments, rows, wells)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateMatrix {
    data: Array3<f64>,
}

impl ReplicateMatrix {
    pub fn new(data: Array3<f64>) -> Self {
        Self { data }
    }

    /// Stack per-experiment plate reads, each of shape (rows, wells)
    ///
    /// Fails with [`PlateError::ShapeMismatch`] when the experiments do not all
    /// share the shape of the first one.
    pub fn from_experiments(experiments: &[Array2<f64>]) -> Result<Self, PlateError> {
        let first = experiments
            .first()
            .ok_or_else(|| PlateError::MissingMetadata {
                what: "at least one experiment is required".to_string(),
            })?;
        let expected = first.dim();

        for (idx, experiment) in experiments.iter().enumerate().skip(1) {
            if experiment.dim() != expected {
                return Err(PlateError::ShapeMismatch {
                    what: format!("experiment {}", idx),
                    expected: vec![expected.0, expected.1],
                    found: vec![experiment.nrows(), experiment.ncols()],
                });
            }
        }

        let views: Vec<ArrayView2<f64>> = experiments.iter().map(|e| e.view()).collect();
        let data = ndarray::stack(Axis(0), &views).map_err(|_| PlateError::ShapeMismatch {
            what: "experiments".to_string(),
            expected: vec![expected.0, expected.1],
            found: vec![],
        })?;

        Ok(Self { data })
    }

    pub fn n_experiments(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn n_rows(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn n_wells(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// All readings of one well, shape (experiments, rows)
    pub fn well(&self, well: usize) -> Result<ArrayView2<'_, f64>, PlateError> {
        if well >= self.n_wells() {
            return Err(PlateError::WellOutOfRange {
                well,
                n_wells: self.n_wells(),
            });
        }
        Ok(self.data.index_axis(Axis(2), well))
    }

    /// Mean and population standard deviation of one well over the experiments
    pub fn aggregate(&self, well: usize) -> Result<AggregatedResponse, PlateError> {
        let readings = self.well(well)?;
        let mean = readings
            .mean_axis(Axis(0))
            .ok_or_else(|| PlateError::MissingMetadata {
                what: "at least one experiment is required".to_string(),
            })?;
        let std_dev = readings.std_axis(Axis(0), 0.0);

        Ok(AggregatedResponse {
            mean: mean.to_vec(),
            std_dev: std_dev.to_vec(),
        })
    }

    /// Aggregate every well, in plate order
    pub fn aggregate_all(&self) -> Result<Vec<AggregatedResponse>, PlateError> {
        (0..self.n_wells()).map(|well| self.aggregate(well)).collect()
    }
}

/// Per-concentration mean and standard deviation of one well
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    mean: Vec<f64>,
    std_dev: Vec<f64>,
}

impl AggregatedResponse {
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std_dev(&self) -> &[f64] {
        &self.std_dev
    }
}
