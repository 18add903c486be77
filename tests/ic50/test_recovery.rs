//! Parameter recovery from noisy synthetic plates

use ic50::fit::LogisticParams;
use ic50::{BuilderOptions, DoseResponse};

use super::common::{plate, WellSpec};

#[test]
fn test_recovers_log_ic50_with_small_noise() {
    let truths = [
        LogisticParams::new(0.0, 100.0, -7.0, -1.0),
        LogisticParams::new(3.0, 97.0, -6.5, -1.5),
        LogisticParams::new(-2.0, 105.0, -6.0, -1.2),
        LogisticParams::new(5.0, 95.0, -5.5, -2.0),
    ];
    let specs: Vec<WellSpec> = truths.iter().map(|&t| WellSpec::Curve(t)).collect();
    let labels = ["cmpd-1", "cmpd-2", "cmpd-3", "cmpd-4"];

    // 1.5 response units is below 2% of every curve's range
    let plate = plate(&labels, &specs, 3, 1.5, 42);
    let report = plate.response_curves(&BuilderOptions::default()).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.curves.len(), truths.len());
    for (curve, truth) in report.curves.iter().zip(truths.iter()) {
        assert!(
            (curve.fit.log_ic50 - truth.log_ic50).abs() < 0.05,
            "{}: fitted log IC50 {} vs true {}",
            curve.label,
            curve.fit.log_ic50,
            truth.log_ic50
        );
        assert!(curve.fit.hill_slope < 0.0);
        assert!(curve.ic50() > 0.0);
    }
}

#[test]
fn test_observed_series_carries_replicate_spread() {
    let truth = LogisticParams::new(0.0, 100.0, -6.0, -1.0);
    let plate = plate(&["cmpd"], &[WellSpec::Curve(truth)], 4, 1.0, 7);
    let report = plate.response_curves(&BuilderOptions::default()).unwrap();

    let observed = &report.curves[0].observed;
    assert_eq!(observed.len(), 11);
    assert!(observed.std_dev.iter().all(|s| *s > 0.0));
    assert!(observed.points().all(|(x, _, _)| (-9.0..=-4.0).contains(&x)));
}
