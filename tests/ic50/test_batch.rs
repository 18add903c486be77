//! Batch behavior: role filtering, overlays and per-compound failures

use ic50::fit::LogisticParams;
use ic50::plate::{ConcentrationGrid, PlateError, ReplicateMatrix, WellRole};
use ic50::{BuilderOptions, DoseResponse, FitError, FitOptions, Plate, ResponseCurveBuilder};
use ndarray::array;

use super::common::{experiments, plate, WellSpec, SERIES_UM};

fn sigmoid(log_ic50: f64) -> WellSpec {
    WellSpec::Curve(LogisticParams::new(0.0, 100.0, log_ic50, -1.0))
}

#[test]
fn test_controls_are_never_fit() {
    let plate = plate(
        &["cmpd", "MOCK", "MEK", "NONE"],
        &[
            sigmoid(-6.0),
            WellSpec::Flat(100.0),
            WellSpec::Flat(5.0),
            WellSpec::Flat(0.0),
        ],
        2,
        0.5,
        1,
    );
    assert_eq!(
        plate.layout().roles(),
        &[
            WellRole::Compound,
            WellRole::Mock,
            WellRole::Control,
            WellRole::Empty
        ]
    );

    let report = plate.response_curves(&BuilderOptions::default()).unwrap();
    assert_eq!(report.curves.len(), 1);
    assert!(report.failures.is_empty());
    assert_eq!(report.curves[0].label, "cmpd");
}

#[test]
fn test_one_degenerate_compound_does_not_abort_batch() {
    let plate = plate(
        &["a", "b", "flat", "c", "d"],
        &[
            sigmoid(-7.0),
            sigmoid(-6.5),
            WellSpec::Flat(50.0),
            sigmoid(-6.0),
            sigmoid(-5.5),
        ],
        3,
        0.5,
        11,
    );

    let report = plate.response_curves(&BuilderOptions::default()).unwrap();

    assert_eq!(report.curves.len(), 4);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.well, 2);
    assert_eq!(failure.label, "flat");
    assert_eq!(failure.error, FitError::DegenerateResponse { distinct: 1 });
    assert!(failure.reason.contains("Degenerate"));

    let labels: Vec<&str> = report.curves.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_reference_plate_overlays_first_and_last_mock() {
    // 32 wells as on the reference template: mocks at both plate halves
    let mut labels: Vec<String> = (0..32).map(|i| format!("cmpd-{}", i)).collect();
    labels[0] = "MOCK".to_string();
    labels[15] = "MOCK".to_string();
    labels[16] = "MEK".to_string();
    labels[30] = "MOCK".to_string();
    labels[31] = "NONE".to_string();

    let specs: Vec<WellSpec> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| match label.as_str() {
            "MOCK" => WellSpec::Flat(100.0),
            "MEK" => WellSpec::Flat(2.0),
            "NONE" => WellSpec::Flat(0.0),
            _ => sigmoid(-7.0 + 0.05 * i as f64),
        })
        .collect();
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let plate = plate(&label_refs, &specs, 2, 0.5, 3);

    let report = plate.response_curves(&BuilderOptions::default()).unwrap();
    assert_eq!(report.curves.len(), 28);
    assert!(report.is_complete());
    for curve in &report.curves {
        let wells: Vec<usize> = curve.overlays.iter().map(|o| o.well).collect();
        assert_eq!(wells, vec![0, 30]);
        assert!(curve.overlays.iter().all(|o| o.series.mean == vec![100.0; 11]));
    }
}

#[test]
fn test_shape_mismatch_is_fatal() {
    let err = ReplicateMatrix::from_experiments(&[
        array![[1.0, 2.0], [3.0, 4.0]],
        array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
    ])
    .unwrap_err();
    assert!(matches!(err, PlateError::ShapeMismatch { .. }));

    let replicates =
        ReplicateMatrix::from_experiments(&experiments(&[sigmoid(-6.0)], 2, 0.5, 5)).unwrap();
    let err = Plate::from_labels(
        vec!["cmpd".to_string()],
        ConcentrationGrid::shared(&SERIES_UM[..10], 1),
        replicates,
    )
    .unwrap_err();
    assert!(matches!(err, PlateError::ShapeMismatch { .. }));
}

#[test]
fn test_iteration_cap_is_reported_per_compound() {
    let plate = plate(&["a", "b"], &[sigmoid(-7.0), sigmoid(-5.5)], 2, 0.5, 9);
    let options = BuilderOptions::default().with_fit(FitOptions::default().with_max_iterations(1));
    let report = ResponseCurveBuilder::new(&plate)
        .with_options(options)
        .build()
        .unwrap();

    assert_eq!(report.curves.len() + report.failures.len(), 2);
    assert!(report
        .failures
        .iter()
        .all(|f| matches!(f.error, FitError::FitConvergence(_))));
}
