use thiserror::Error;

use crate::fit::FitError;
use crate::plate::PlateError;

#[derive(Error, Debug)]
pub enum Ic50Error {
    #[error("Plate error: {0}")]
    PlateError(#[from] PlateError),
    #[error("Fit error: {0}")]
    FitError(#[from] FitError),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
