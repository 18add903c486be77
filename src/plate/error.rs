//! Plate error types

use thiserror::Error;

use super::layout::WellRole;

/// Errors in the plate inputs handed to the fitting engine
///
/// All of these are fatal to a whole batch: without well-aligned data no
/// compound can be fit meaningfully.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlateError {
    /// Two inputs disagree on their dimensions
    #[error("Shape mismatch in {what}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Which input (or experiment) had the wrong shape
        what: String,
        /// Expected dimensions
        expected: Vec<usize>,
        /// Dimensions actually found
        found: Vec<usize>,
    },

    /// Required plate metadata is absent or incomplete
    #[error("Missing plate metadata: {what}")]
    MissingMetadata {
        /// Description of what is missing
        what: String,
    },

    /// A well index beyond the last well column
    #[error("Well {well} is out of range for a plate with {n_wells} wells")]
    WellOutOfRange { well: usize, n_wells: usize },

    /// A fit was requested for a well that is not a test compound
    #[error("Well {well} is a {role} well and has no IC50")]
    NotACompound { well: usize, role: WellRole },

    /// A concentration that cannot be log-transformed
    #[error("Invalid concentration {value} at row {row} of well {well}")]
    InvalidConcentration { well: usize, row: usize, value: f64 },
}
