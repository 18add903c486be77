//! Response curves for every compound on a plate
//!
//! This module turns a validated [`Plate`](crate::plate::Plate) into a
//! [`BatchReport`]: one [`CompoundCurve`] per fittable well plus an explicit
//! list of [`CompoundFailure`]s.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ic50::prelude::*;
//!
//! let plate = Plate::from_labels(labels, concentrations, replicates)?;
//! let report = plate.response_curves(&BuilderOptions::default())?;
//!
//! for row in report.summary() {
//!     println!("{:<20} IC50 = {} µM", row.label, row.ic50_micromolar);
//! }
//! for failure in &report.failures {
//!     println!("{:<20} skipped: {}", failure.label, failure.reason);
//! }
//! ```

mod builder;
mod render;
mod summary;
mod types;

pub use builder::{BuilderOptions, DoseResponse, ResponseCurveBuilder, DENSE_POINTS};
pub use render::{OverlayStyle, RenderConfig};
pub use summary::{
    format_micromolar, format_scientific, round_decimals, SummaryRow, SUMMARY_DECIMALS,
};
pub use types::{
    BatchReport, CompoundCurve, CompoundFailure, FittedCurve, MockOverlay, ResponseSeries,
};
