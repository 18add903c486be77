//! Summary table, JSON export and render configuration

use approx::assert_relative_eq;
use ic50::curve::{round_decimals, RenderConfig, SUMMARY_DECIMALS};
use ic50::fit::LogisticParams;
use ic50::{BuilderOptions, DoseResponse};

use super::common::{plate, WellSpec};

fn report() -> ic50::BatchReport {
    plate(
        &["MOCK", "staurosporine", "flat", "MOCK"],
        &[
            WellSpec::Flat(100.0),
            WellSpec::Curve(LogisticParams::new(0.0, 100.0, -6.6, -1.0)),
            WellSpec::Flat(42.0),
            WellSpec::Flat(98.0),
        ],
        3,
        0.5,
        21,
    )
    .response_curves(&BuilderOptions::default())
    .unwrap()
}

#[test]
fn test_summary_rows() {
    let report = report();
    let summary = report.summary();
    assert_eq!(summary.len(), 1);

    let row = &summary[0];
    let curve = &report.curves[0];
    assert_eq!(row.label, "staurosporine");
    assert_eq!(row.well, 1);
    assert_eq!(row.ic50, round_decimals(curve.ic50(), SUMMARY_DECIMALS));
    assert_relative_eq!(row.hill_slope, curve.hill_slope(), epsilon = 1e-8);
    // 10^-6.6 M is 0.25 µM
    assert!(row.ic50_micromolar.starts_with("2."));
    assert!(row.ic50_micromolar.ends_with("E-01"));
}

#[test]
fn test_json_export() {
    let report = report();
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["curves"].as_array().unwrap().len(), 1);
    assert_eq!(value["curves"][0]["label"], "staurosporine");
    assert_eq!(
        value["curves"][0]["fitted"]["x"].as_array().unwrap().len(),
        1000
    );
    assert_eq!(value["failures"][0]["label"], "flat");
    assert!(value["failures"][0]["reason"]
        .as_str()
        .unwrap()
        .contains("Degenerate"));
}

#[test]
fn test_render_config() {
    let report = report();
    let curve = &report.curves[0];
    let config = RenderConfig::default().with_y_label("Luminescence (% of mock)");

    assert_eq!(config.y_label, "Luminescence (% of mock)");
    assert_eq!(config.x_limits, (-9.0, -3.0));
    assert_eq!(config.file_name(curve), "staurosporine.pdf");
    assert!(config.annotation(curve).starts_with("IC50="));
    assert!(config.annotation(curve).ends_with(" µM"));

    assert_eq!(curve.overlays.len(), 2);
    for (idx, overlay) in curve.overlays.iter().enumerate() {
        assert!(config.overlay_style(idx).is_some());
        assert_eq!(overlay.label, "MOCK");
    }
    assert_eq!(config.overlay_style(0).unwrap().name, "mock A");
    assert!(config.overlay_style(2).is_none());
}
