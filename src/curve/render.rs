//! Rendering configuration
//!
//! Plot styling is plain data handed to whichever renderer draws the
//! [`CompoundCurve`]s. Nothing in this crate draws; the defaults reproduce the
//! reference assay report.

use serde::{Deserialize, Serialize};

use super::summary::format_micromolar;
use super::types::CompoundCurve;

/// Name and colour of a mock reference trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub name: String,
    pub color: String,
}

impl OverlayStyle {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    pub dpi: u32,
    /// Visible x range in log10 M
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub x_label: String,
    pub y_label: String,
    pub compound_color: String,
    pub marker_size: f64,
    /// Styles for the first and last mock traces, in that order
    pub overlays: Vec<OverlayStyle>,
    pub overlay_alpha: f64,
    /// Data coordinates of the IC50 annotation
    pub annotation_anchor: (f64, f64),
    /// Extension of per-compound output files
    pub file_extension: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure_size: (12.0, 8.0),
            dpi: 600,
            x_limits: (-9.0, -3.0),
            y_limits: (0.0, 200.0),
            x_label: "Compound [log10(M)]".to_string(),
            y_label: "Response".to_string(),
            compound_color: "red".to_string(),
            marker_size: 15.0,
            overlays: vec![
                OverlayStyle::new("mock A", "blue"),
                OverlayStyle::new("mock P right", "black"),
            ],
            overlay_alpha: 0.5,
            annotation_anchor: (-6.0, 160.0),
            file_extension: "pdf".to_string(),
        }
    }
}

impl RenderConfig {
    /// Set the response axis label (usually the assay readout)
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_x_limits(mut self, lo: f64, hi: f64) -> Self {
        self.x_limits = (lo, hi);
        self
    }

    pub fn with_y_limits(mut self, lo: f64, hi: f64) -> Self {
        self.y_limits = (lo, hi);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Style of the `index`-th overlay of a curve
    pub fn overlay_style(&self, index: usize) -> Option<&OverlayStyle> {
        self.overlays.get(index)
    }

    /// IC50 annotation text, e.g. `IC50=2.50E-01 µM`
    pub fn annotation(&self, curve: &CompoundCurve) -> String {
        format!("IC50={} µM", format_micromolar(curve.ic50()))
    }

    /// Output file name for a curve's figure
    pub fn file_name(&self, curve: &CompoundCurve) -> String {
        format!("{}.{}", curve.label, self.file_extension)
    }
}
