//! Assay plate inputs
//!
//! Everything the fitting engine consumes is modelled here as plain,
//! already-materialized values:
//!
//! - [`PlateLayout`]: the [`WellRole`] of every well column
//! - [`ConcentrationGrid`]: the dilution series (µM) of every well column
//! - [`ReplicateMatrix`]: raw readings of shape (experiments, rows, wells)
//! - [`Plate`]: the validated bundle of the above plus compound labels
//!
//! Reading these from a spreadsheet or plate reader export is left to the
//! caller.

mod concentration;
mod error;
mod layout;
mod replicates;
mod structs;

pub use concentration::{ConcentrationGrid, MICROMOLAR};
pub use error::PlateError;
pub use layout::{PlateLayout, WellRole};
pub use replicates::{AggregatedResponse, ReplicateMatrix};
pub use structs::Plate;
