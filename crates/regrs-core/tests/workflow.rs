use regrs_core::{
    render_comparison, Dataset, ErrorCategory, PlotOptions, RegressionError, RegressionKind,
    RegressionSession, SessionState, WorkflowSettings,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 100 rows of Spend/Profit with a noisy linear trend and a text column.
fn write_spend_profit(dir: &Path) -> PathBuf {
    let mut rng = StdRng::seed_from_u64(1);
    let mut content = String::from("Region,Spend,Profit\n");
    for i in 0..100 {
        let spend = 1_000.0 + 1_500.0 * i as f64;
        let profit = 12_000.0 + 0.8 * spend + rng.random_range(-5_000.0..5_000.0);
        writeln!(content, "R{},{spend},{profit}", i % 4).unwrap();
    }
    let path = dir.join("spend.csv");
    fs::write(&path, content).unwrap();
    path
}

fn trained_session(path: &Path) -> RegressionSession {
    let mut session = RegressionSession::new(WorkflowSettings::default());
    session.load(path).unwrap();
    session.select_columns("Spend", "Profit").unwrap();
    session.train().unwrap();
    session
}

#[test]
fn spend_profit_scenario() {
    let dir = tempdir().unwrap();
    let path = write_spend_profit(dir.path());

    let session = trained_session(&path);
    let dataset = session.dataset().unwrap();
    assert_eq!(dataset.column_names(), ["Spend", "Profit"]);
    assert_eq!(dataset.dropped_columns(), ["Region"]);

    let split = session.split().unwrap();
    assert_eq!((split.n_train(), split.n_test()), (70, 30));

    let report = session.score().unwrap();
    assert!(report.r2 > 0.0 && report.r2 <= 1.0);
    assert!(report.mse >= 0.0);
    assert_eq!(report.rmse, report.mse.sqrt());

    let prediction = session.predict_value(50_000.0).unwrap();
    assert!(prediction.value.is_finite());
    assert!((prediction.value - 52_000.0).abs() < 5_000.0);
    assert_eq!(prediction.label(), format!("Predicted Profit is {}", prediction.value));
}

#[test]
fn training_is_deterministic() {
    let dir = tempdir().unwrap();
    let path = write_spend_profit(dir.path());

    let a = trained_session(&path);
    let b = trained_session(&path);
    assert_eq!(a.split().unwrap(), b.split().unwrap());
    assert_eq!(a.model().unwrap().coefficients(), b.model().unwrap().coefficients());
    assert_eq!(a.score().unwrap(), b.score().unwrap());
}

#[test]
fn retraining_replaces_model_with_same_fit() {
    let dir = tempdir().unwrap();
    let mut session = trained_session(&write_spend_profit(dir.path()));
    let first = session.model().unwrap().coefficients();
    session.train().unwrap();
    assert_eq!(session.model().unwrap().coefficients(), first);
}

#[test]
fn linear_prediction_is_affine() {
    let dir = tempdir().unwrap();
    let session = trained_session(&write_spend_profit(dir.path()));

    let p = |x: f64| session.predict_value(x).unwrap().value;
    let (p0, p1, p2) = (p(0.0), p(10_000.0), p(20_000.0));
    assert!(((p2 - p1) - (p1 - p0)).abs() < 1e-6);
    assert!((p0 - session.model().unwrap().intercept()).abs() < 1e-9);
}

#[test]
fn rows_with_missing_values_are_dropped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gaps.csv");
    fs::write(&path, "a,b,name\n1,2,x\n2,NA,y\n3,,z\n4,8,\n5,10,w\n6\n").unwrap();

    let mut session = RegressionSession::default();
    let dataset = session.load(&path).unwrap();
    assert_eq!(dataset.column_names(), ["a", "b"]);
    assert_eq!(dataset.n_rows(), 3);
    assert_eq!(dataset.dropped_rows(), 3);
    assert_eq!(dataset.column("b").unwrap(), [2.0, 8.0, 10.0]);
    assert_eq!(session.state(), SessionState::Configured);
}

#[test]
fn sequencing_errors_before_training() {
    let dir = tempdir().unwrap();
    let mut session = RegressionSession::default();
    assert_eq!(session.train().unwrap_err().category(), ErrorCategory::Sequencing);

    session.load(write_spend_profit(dir.path())).unwrap();
    for err in [
        session.score().unwrap_err(),
        session.predict_value(1.0).unwrap_err(),
        session.comparison().unwrap_err(),
    ] {
        assert!(matches!(err, RegressionError::NotTrained));
    }
}

#[test]
fn failed_load_keeps_previous_dataset() {
    let dir = tempdir().unwrap();
    let mut session = trained_session(&write_spend_profit(dir.path()));

    let err = session.load(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, RegressionError::FileNotFound(_)));
    assert_eq!(session.state(), SessionState::Trained);
    assert_eq!(session.dataset().unwrap().n_rows(), 100);
}

#[test]
fn text_only_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("text.csv");
    fs::write(&path, "name,city\nann,oslo\nbob,rome\n").unwrap();

    let err = RegressionSession::default().load(&path).unwrap_err();
    assert!(matches!(err, RegressionError::NoNumericColumns));
    assert_eq!(err.category(), ErrorCategory::DegenerateData);
}

#[test]
fn every_strategy_scores_and_plots() {
    let dir = tempdir().unwrap();
    let path = write_spend_profit(dir.path());

    for &kind in RegressionKind::all() {
        let mut session = RegressionSession::default();
        session.set_kind(kind);
        session.load(&path).unwrap();
        session.train().unwrap();

        let report = session.score().unwrap();
        assert_eq!(report.kind, kind);
        assert!(report.r2 <= 1.0);

        let out = dir.path().join(format!("{}.svg", kind.as_str()));
        let options = PlotOptions { draw_labels: false, ..Default::default() };
        render_comparison(&session.comparison().unwrap(), &out, &options).unwrap();
        assert!(fs::metadata(&out).unwrap().len() > 0);
    }
}

#[test]
fn infinite_cells_never_reach_scoring() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inf.csv");
    let mut content = String::from("x,y\n");
    for i in 0..20 {
        let y = match i {
            1 => "inf".to_owned(),
            7 => "-inf".to_owned(),
            12 => "1e400".to_owned(),
            _ => (2 * i + 3).to_string(),
        };
        writeln!(content, "{i},{y}").unwrap();
    }
    fs::write(&path, content).unwrap();

    let mut session = RegressionSession::default();
    let dataset = session.load(&path).unwrap();
    assert_eq!(dataset.n_rows(), 17);
    assert_eq!(dataset.dropped_rows(), 3);

    session.train().unwrap();
    let split = session.split().unwrap();
    assert!(split.y_train.iter().chain(&split.y_test).all(|v| v.is_finite()));

    let report = session.score().unwrap();
    assert!(report.mse.is_finite() && report.mse >= 0.0);
    assert!(report.r2.is_finite() && report.r2 <= 1.0);
    assert_eq!(report.rmse, report.mse.sqrt());
}

#[test]
fn constant_test_target_scores_finite_r2() {
    let n = 20;
    let x: Vec<f64> = (0..n).map(f64::from).collect();

    // the split depends only on the row count and the seed
    let mut layout = RegressionSession::default();
    let identity = Dataset::from_columns(vec![("x", x.clone()), ("y", x.clone())]).unwrap();
    layout.configure(identity, "x", "y").unwrap();
    layout.train().unwrap();
    let test_rows = layout.split().unwrap().test_rows.clone();

    // constant target everywhere: the line is flat and predicts it exactly
    let mut session = RegressionSession::default();
    let flat = Dataset::from_columns(vec![("x", x.clone()), ("y", vec![5.0; 20])]).unwrap();
    session.configure(flat, "x", "y").unwrap();
    session.train().unwrap();
    let report = session.score().unwrap();
    assert_eq!(report.r2, 1.0);
    assert_eq!(report.mse, 0.0);

    // constant only on the test rows: the fitted line misses it
    let y: Vec<f64> =
        x.iter().enumerate().map(|(i, &v)| if test_rows.contains(&i) { 5.0 } else { v }).collect();
    let mixed = Dataset::from_columns(vec![("x", x), ("y", y)]).unwrap();
    session.configure(mixed, "x", "y").unwrap();
    session.train().unwrap();
    assert!(session.split().unwrap().y_test.iter().all(|&v| v == 5.0));
    let report = session.score().unwrap();
    assert_eq!(report.r2, 0.0);
    assert!(report.mse > 0.0);
    assert_eq!(report.rmse, report.mse.sqrt());
}

#[test]
fn strategies_recover_noisy_line_across_seeds() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let x: Vec<f64> = (0..60).map(|_| rng.random_range(-50.0..50.0)).collect();
        let y: Vec<f64> =
            x.iter().map(|v| 4.0 + 2.5 * v + rng.random_range(-3.0..3.0)).collect();
        let dataset = Dataset::from_columns(vec![("x", x), ("y", y)]).unwrap();

        for &kind in RegressionKind::all() {
            let settings = WorkflowSettings { seed, ..Default::default() };
            let mut session = RegressionSession::new(settings);
            session.set_kind(kind);
            session.configure(dataset.clone(), "x", "y").unwrap();

            let model = session.train().unwrap();
            assert!((model.slope() - 2.5).abs() < 0.1, "{kind} seed {seed}: {}", model.slope());
            assert!((model.predict(0.0) - 4.0).abs() < 1.5, "{kind} seed {seed}");

            let report = session.score().unwrap();
            assert!(report.r2 <= 1.0 && report.r2 > 0.9, "{kind} seed {seed}: {report}");
            assert!(report.mse >= 0.0);
            assert_eq!(report.rmse, report.mse.sqrt());
        }
    }
}
