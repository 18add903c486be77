//! IC50 estimation from microplate dose-response assays
//!
//! The crate fits the four-parameter (variable slope) inhibitor-response model
//! to replicate plate reads and reports one curve per test compound:
//!
//! - [`plate`]: well roles, dilution series and replicate readings
//! - [`fit`]: initial guess and Levenberg-Marquardt fit of the logistic model
//! - [`curve`]: per-compound orchestration, batch report and render settings

pub mod curve;
pub mod error;
pub mod fit;
pub mod plate;

pub use crate::curve::{
    BatchReport, BuilderOptions, CompoundCurve, CompoundFailure, DoseResponse, RenderConfig,
    ResponseCurveBuilder,
};
pub use crate::fit::{fit_logistic, FitError, FitOptions, FitResult, LogisticParams};
pub use crate::plate::{
    ConcentrationGrid, Plate, PlateError, PlateLayout, ReplicateMatrix, WellRole,
};
pub use error::Ic50Error;

pub mod prelude {
    pub mod plate {
        pub use crate::plate::{
            AggregatedResponse, ConcentrationGrid, Plate, PlateLayout, ReplicateMatrix, WellRole,
        };
    }
    pub mod fit {
        pub use crate::fit::{
            fit_logistic, initial_guess, FitDiagnostics, FitOptions, FitResult,
            LevenbergMarquardt, LogisticParams,
        };
    }

    pub use crate::curve::{
        BatchReport, BuilderOptions, CompoundCurve, DoseResponse, RenderConfig,
        ResponseCurveBuilder,
    };
    pub use crate::error::Ic50Error;
    pub use crate::fit::{fit_logistic, FitOptions, FitResult, LogisticParams};
    pub use crate::plate::{ConcentrationGrid, Plate, ReplicateMatrix, WellRole};
}
