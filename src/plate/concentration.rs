//! Dilution series for every well column

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use super::error::PlateError;

/// Conversion factor from µM to M
pub const MICROMOLAR: f64 = 1e-6;

/// Concentrations in µM with shape (rows, wells)
///
/// Each well column carries its own dilution series, one concentration per
/// plate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationGrid {
    values: Array2<f64>,
}

impl ConcentrationGrid {
    pub fn new(values: Array2<f64>) -> Self {
        Self { values }
    }

    /// Use the same dilution series for every well
    pub fn shared(series: &[f64], n_wells: usize) -> Self {
        Self {
            values: Array2::from_shape_fn((series.len(), n_wells), |(row, _)| series[row]),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_wells(&self) -> usize {
        self.values.ncols()
    }

    /// Dilution series (µM) of one well
    pub fn series(&self, well: usize) -> Result<ArrayView1<'_, f64>, PlateError> {
        if well >= self.n_wells() {
            return Err(PlateError::WellOutOfRange {
                well,
                n_wells: self.n_wells(),
            });
        }
        Ok(self.values.index_axis(Axis(1), well))
    }

    /// Check that every concentration of a well can be log-transformed
    pub fn validate_well(&self, well: usize) -> Result<(), PlateError> {
        for (row, &value) in self.series(well)?.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlateError::InvalidConcentration { well, row, value });
            }
        }
        Ok(())
    }

    /// log10 of the molar concentrations of one well
    pub fn log_molar(&self, well: usize) -> Result<Vec<f64>, PlateError> {
        self.validate_well(well)?;
        Ok(self
            .series(well)?
            .iter()
            .map(|&c| (c * MICROMOLAR).log10())
            .collect())
    }
}
