//! Integration tests for the full analysis workflow
//!
//! These tests run the complete pipeline on the fixture files and verify
//! the end-to-end results.

#![expect(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr
)]

use reqscope::analyser::charts;
use reqscope::analyser::logic::{self, StatValue};
use reqscope::config::{ChartFormat, EdaConfig};
use reqscope::error::EdaError;
use std::path::{Path, PathBuf};

fn config_for(fixture: &str, out: &Path) -> EdaConfig {
    let mut config = EdaConfig {
        input: PathBuf::from("testdata").join(fixture),
        summary_path: out.join("summary.csv"),
        ..Default::default()
    };
    config.charts.enabled = false;
    config.charts.output_dir = out.join("charts");
    config
}

#[test]
fn test_analyze_requests_csv() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for("requests.csv", out.path());

    let report = logic::run_eda_flow(&config).expect("analysis should succeed");

    let summary = &report.summary;
    assert_eq!(summary.row_count, 10);
    assert_eq!(summary.column_count, 12);
    assert_eq!(summary.filled_nulls, 6);
    assert_eq!(summary.nulls.get("body"), Some(0));
    assert_eq!(summary.nulls.total(), 0);
    assert!(report.charts.is_empty());

    let describe = &summary.describe;
    assert_eq!(describe.columns.len(), 12);
    assert_eq!(
        describe.get("body", "top").and_then(StatValue::as_text),
        Some("N/A")
    );
    assert_eq!(
        describe.get("body", "freq").and_then(StatValue::as_f64),
        Some(6.0)
    );
    assert_eq!(
        describe.get("class", "unique").and_then(StatValue::as_f64),
        Some(2.0)
    );
    let mean = describe
        .get("path_length", "mean")
        .and_then(StatValue::as_f64)
        .unwrap();
    assert!((mean - 55.0).abs() < 1e-9);

    let analytics = &report.analytics;
    assert_eq!(analytics.classes, vec!["legit", "malicious"]);
    assert_eq!(analytics.distributions.len(), 8);
    assert_eq!(analytics.class_boxes.len(), 8);
    assert_eq!(analytics.correlation.columns.len(), 8);
    assert_eq!(analytics.correlation.get("spaces", "spaces"), Some(1.0));

    let counts = &analytics.bucket_counts;
    assert_eq!(counts.get("Curto", "legit"), Some(3));
    assert_eq!(counts.get("Médio", "legit"), Some(2));
    assert_eq!(counts.get("Longo", "malicious"), Some(2));
    assert_eq!(counts.get("Muito Longo", "malicious"), Some(3));
    assert_eq!(counts.get("Curto", "malicious"), Some(0));

    let written = std::fs::read_to_string(out.path().join("summary.csv")).unwrap();
    assert_eq!(written.lines().count(), 12, "header plus 11 statistics");
    assert!(written.lines().nth(3).unwrap().starts_with("top,"));
}

#[test]
fn test_analyze_missing_class_column() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for("missing_class.csv", out.path());

    let err = logic::run_eda_flow(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EdaError>(),
        Some(EdaError::MissingColumn(name)) if name == "class"
    ));
    assert!(
        !out.path().join("summary.csv").exists(),
        "nothing is written for an incomplete dataset"
    );
}

#[test]
fn test_analyze_missing_file() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for("nope.csv", out.path());

    let err = logic::run_eda_flow(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EdaError>(),
        Some(EdaError::InvalidPath(_))
    ));
}

#[test]
fn test_analyze_constant_bucket_column() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for("constant_paths.csv", out.path());

    let err = logic::run_eda_flow(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EdaError>(),
        Some(EdaError::Binning(_))
    ));
    // the summary is saved before chart data is prepared
    assert!(out.path().join("summary.csv").exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let out = tempfile::tempdir().unwrap();
    let mut config = config_for("requests.csv", out.path());
    config.histogram_bins = 0;

    let err = logic::run_eda_flow(&config).unwrap_err();
    assert!(matches!(err.downcast_ref::<EdaError>(), Some(EdaError::Config(_))));
}

#[test]
fn test_chart_plan_covers_every_figure() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for("requests.csv", out.path());
    let report = logic::run_eda_flow(&config).unwrap();

    let plan = charts::plan(&report.analytics);
    assert_eq!(plan.len(), 18);
    let stems: Vec<String> = plan.iter().map(charts::Chart::file_stem).collect();
    assert!(stems.contains(&"hist_path_length".to_owned()));
    assert!(stems.contains(&"correlation_heatmap".to_owned()));
    assert!(stems.contains(&"box_badwords_count_by_class".to_owned()));
    assert!(stems.contains(&"path_length_bins_by_class".to_owned()));
}

/// Plotters draws captions and tick labels with system fonts; hosts without
/// any report a font error from the first chart.
fn is_missing_font(err: &anyhow::Error) -> bool {
    format!("{err:#}").to_lowercase().contains("font")
}

#[test]
fn test_render_charts_to_svg() {
    let out = tempfile::tempdir().unwrap();
    let mut config = config_for("requests.csv", out.path());
    config.charts.enabled = true;
    config.charts.format = ChartFormat::Svg;

    let report = match logic::run_eda_flow(&config) {
        Ok(report) => report,
        Err(err) if is_missing_font(&err) => {
            eprintln!("skipping chart rendering, no usable font: {err:#}");
            return;
        }
        Err(err) => panic!("rendering failed: {err:#}"),
    };

    assert_eq!(report.charts.len(), 18);
    for path in &report.charts {
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("svg"));
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
    }
}

#[test]
fn test_summary_stage_survives_binning_failure() {
    let out = tempfile::tempdir().unwrap();
    let config = config_for("constant_paths.csv", out.path());

    let (cleaned, summary) = logic::summarise(&config).expect("summary stage succeeds");
    assert_eq!(summary.row_count, 4);
    assert_eq!(summary.nulls.get("body"), Some(0));
    assert!(summary.summary_path.exists());

    let err = logic::visualise(&cleaned, &config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EdaError>(),
        Some(EdaError::Binning(_))
    ));
}
