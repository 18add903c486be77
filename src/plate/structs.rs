use serde::Serialize;

use super::concentration::ConcentrationGrid;
use super::error::PlateError;
use super::layout::{PlateLayout, WellRole};
use super::replicates::ReplicateMatrix;

/// A fully materialized, shape-consistent assay plate
///
/// This is the single input of the fitting engine. Construction validates
/// that layout, labels, concentrations and replicate readings agree on the
/// number of wells and rows, and that every compound well has concentrations
/// that can be log-transformed.
#[derive(Debug, Clone, Serialize)]
pub struct Plate {
    layout: PlateLayout,
    labels: Vec<String>,
    concentrations: ConcentrationGrid,
    replicates: ReplicateMatrix,
}

impl Plate {
    pub fn new(
        layout: PlateLayout,
        labels: Vec<String>,
        concentrations: ConcentrationGrid,
        replicates: ReplicateMatrix,
    ) -> Result<Self, PlateError> {
        let n_wells = replicates.n_wells();

        if replicates.n_experiments() == 0 {
            return Err(PlateError::MissingMetadata {
                what: "at least one experiment is required".to_string(),
            });
        }
        if layout.is_empty() {
            return Err(PlateError::MissingMetadata {
                what: "plate has no wells".to_string(),
            });
        }
        if layout.len() != n_wells {
            return Err(PlateError::MissingMetadata {
                what: format!(
                    "layout assigns roles to {} wells, plate has {}",
                    layout.len(),
                    n_wells
                ),
            });
        }
        if labels.len() != n_wells {
            return Err(PlateError::MissingMetadata {
                what: format!("{} compound labels for {} wells", labels.len(), n_wells),
            });
        }
        if concentrations.n_wells() != n_wells || concentrations.n_rows() != replicates.n_rows() {
            return Err(PlateError::ShapeMismatch {
                what: "concentrations".to_string(),
                expected: vec![replicates.n_rows(), n_wells],
                found: vec![concentrations.n_rows(), concentrations.n_wells()],
            });
        }
        for well in layout.wells_with_role(WellRole::Compound) {
            concentrations.validate_well(well)?;
        }

        Ok(Self {
            layout,
            labels,
            concentrations,
            replicates,
        })
    }

    /// Build a plate whose layout is derived from the labels
    pub fn from_labels(
        labels: Vec<String>,
        concentrations: ConcentrationGrid,
        replicates: ReplicateMatrix,
    ) -> Result<Self, PlateError> {
        let layout = PlateLayout::from_labels(&labels);
        Self::new(layout, labels, concentrations, replicates)
    }

    pub fn n_wells(&self) -> usize {
        self.replicates.n_wells()
    }

    pub fn layout(&self) -> &PlateLayout {
        &self.layout
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, well: usize) -> Result<&str, PlateError> {
        self.labels
            .get(well)
            .map(String::as_str)
            .ok_or(PlateError::WellOutOfRange {
                well,
                n_wells: self.n_wells(),
            })
    }

    pub fn concentrations(&self) -> &ConcentrationGrid {
        &self.concentrations
    }

    pub fn replicates(&self) -> &ReplicateMatrix {
        &self.replicates
    }
}
