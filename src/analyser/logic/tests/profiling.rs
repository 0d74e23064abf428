use super::{assert_close, request_frame};
use crate::analyser::logic::*;
use anyhow::Result;

#[test]
fn test_describe_numeric_column() -> Result<()> {
    let table = describe(&request_frame())?;
    let path = table.column("path_length").expect("described");

    assert_eq!(path.kind, ColumnKind::Numeric);
    assert_eq!(path.get("count").and_then(StatValue::as_f64), Some(10.0));
    assert_close(path.get("mean").and_then(StatValue::as_f64).unwrap(), 55.0);
    assert_close(path.get("std").and_then(StatValue::as_f64).unwrap(), 30.276_503);
    assert_close(path.get("min").and_then(StatValue::as_f64).unwrap(), 10.0);
    assert_close(path.get("25%").and_then(StatValue::as_f64).unwrap(), 32.5);
    assert_close(path.get("50%").and_then(StatValue::as_f64).unwrap(), 55.0);
    assert_close(path.get("75%").and_then(StatValue::as_f64).unwrap(), 77.5);
    assert_close(path.get("max").and_then(StatValue::as_f64).unwrap(), 100.0);
    assert!(path.get("unique").is_none());
    assert!(path.get("top").is_none());
    Ok(())
}

#[test]
fn test_describe_counts_exclude_nulls() -> Result<()> {
    let table = describe(&request_frame())?;
    assert_eq!(
        table.get("badwords_count", "count").and_then(StatValue::as_f64),
        Some(9.0)
    );
    assert_eq!(table.get("body", "count").and_then(StatValue::as_f64), Some(4.0));
    Ok(())
}

#[test]
fn test_describe_categorical_column() -> Result<()> {
    let cleaned = fill_missing_text(&request_frame(), "body", "N/A")?;
    let table = describe(&cleaned)?;

    let body = table.column("body").expect("described");
    assert_eq!(body.kind, ColumnKind::Categorical);
    assert_eq!(body.get("count").and_then(StatValue::as_f64), Some(10.0));
    assert_eq!(body.get("unique").and_then(StatValue::as_f64), Some(5.0));
    assert_eq!(body.get("top").and_then(StatValue::as_text), Some("N/A"));
    assert_eq!(body.get("freq").and_then(StatValue::as_f64), Some(6.0));
    assert!(body.get("mean").is_none());
    Ok(())
}

#[test]
fn test_describe_top_tie_goes_to_first_seen() -> Result<()> {
    let table = describe(&request_frame())?;
    assert_eq!(table.get("class", "top").and_then(StatValue::as_text), Some("legit"));
    assert_eq!(table.get("class", "freq").and_then(StatValue::as_f64), Some(5.0));
    Ok(())
}

#[test]
fn test_describe_covers_every_column() -> Result<()> {
    let df = request_frame();
    let table = describe(&df)?;
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["method", "body", "class", "path_length", "badwords_count"]
    );
    assert!(table.columns.iter().all(|c| c.cells.len() == STATISTICS.len()));
    Ok(())
}

#[test]
fn test_null_counts() -> Result<()> {
    let df = request_frame();
    let nulls = null_counts(&df);
    assert_eq!(nulls.get("body"), Some(6));
    assert_eq!(nulls.get("badwords_count"), Some(1));
    assert_eq!(nulls.get("class"), Some(0));
    assert_eq!(nulls.total(), 7);

    let cleaned = fill_missing_text(&df, "body", "N/A")?;
    assert_eq!(null_counts(&cleaned).get("body"), Some(0));
    Ok(())
}

#[test]
fn test_to_frame_layout() -> Result<()> {
    let df = request_frame();
    let frame = describe(&df)?.to_frame()?;

    assert_eq!(frame.shape(), (STATISTICS.len(), df.width() + 1));
    let labels: Vec<&str> = frame
        .column("statistic")?
        .as_materialized_series()
        .str()?
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(labels, STATISTICS.to_vec());

    // mean does not apply to a text column
    let method = frame.column("method")?.as_materialized_series().str()?.clone();
    assert_eq!(method.get(4), None);
    assert_eq!(method.get(2), Some("GET"));
    Ok(())
}

#[test]
fn test_describe_display_has_every_statistic() -> Result<()> {
    let rendered = describe(&request_frame())?.to_string();
    for stat in STATISTICS {
        assert!(rendered.contains(stat), "missing row {stat}");
    }
    assert!(rendered.contains("path_length"));
    Ok(())
}
