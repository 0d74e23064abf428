use super::assert_close;
use crate::analyser::logic::*;
use crate::error::EdaError;

fn labels() -> Vec<String> {
    ["Curto", "Médio", "Longo", "Muito Longo"].map(str::to_owned).to_vec()
}

fn path_lengths() -> Vec<Option<f64>> {
    (1..=10).map(|v| Some(f64::from(v) * 10.0)).collect()
}

#[test]
fn test_quantile_buckets_edges_and_counts() {
    let buckets = quantile_buckets("path_length", &path_lengths(), &labels()).unwrap();

    let expected = [10.0, 32.5, 55.0, 77.5, 100.0];
    assert_eq!(buckets.edges.len(), expected.len());
    for (edge, want) in buckets.edges.iter().zip(expected) {
        assert_close(*edge, want);
    }
    assert_eq!(buckets.counts(), vec![3, 2, 2, 3]);
    assert_eq!(buckets.label_of(0), Some("Curto"));
    assert_eq!(buckets.label_of(4), Some("Médio"));
    assert_eq!(buckets.label_of(9), Some("Muito Longo"));
}

#[test]
fn test_quantile_buckets_boundaries_are_right_closed() {
    // 55.0 is exactly the median edge and belongs to the lower bucket
    let values = vec![Some(10.0), Some(32.5), Some(55.0), Some(77.5), Some(100.0)];
    let buckets = quantile_buckets("v", &values, &labels()).unwrap();
    assert_eq!(
        buckets.assignments,
        vec![Some(0), Some(0), Some(1), Some(2), Some(3)]
    );
}

#[test]
fn test_quantile_buckets_null_rows() {
    let mut values = path_lengths();
    values.push(None);
    let buckets = quantile_buckets("path_length", &values, &labels()).unwrap();
    assert_eq!(buckets.assignments.len(), 11);
    assert_eq!(buckets.label_of(10), None);
    assert_eq!(buckets.counts().iter().sum::<usize>(), 10);
}

#[test]
fn test_quantile_buckets_duplicate_edges() {
    let values = vec![Some(42.0); 6];
    let err = quantile_buckets("path_length", &values, &labels()).unwrap_err();
    assert!(matches!(err.downcast_ref::<EdaError>(), Some(EdaError::Binning(_))));
    assert!(err.to_string().contains("duplicate bin edge"));
}

#[test]
fn test_quantile_buckets_all_null() {
    let err = quantile_buckets("path_length", &[None, None], &labels()).unwrap_err();
    assert!(matches!(err.downcast_ref::<EdaError>(), Some(EdaError::Binning(_))));
}

#[test]
fn test_quantile_buckets_need_labels() {
    let err = quantile_buckets("path_length", &path_lengths(), &[]).unwrap_err();
    assert!(matches!(err.downcast_ref::<EdaError>(), Some(EdaError::Config(_))));
}

#[test]
fn test_grouped_counts() {
    let buckets = quantile_buckets("path_length", &path_lengths(), &labels()).unwrap();
    let mut row_classes: Vec<Option<String>> = ["legit"; 5]
        .into_iter()
        .chain(["malicious"; 5])
        .map(|c| Some(c.to_owned()))
        .collect();
    // unknown class and missing class are not counted
    row_classes[1] = Some("unknown".to_owned());
    row_classes[2] = None;
    let hues = vec!["legit".to_owned(), "malicious".to_owned()];

    let grouped = grouped_counts(&buckets, &row_classes, &hues);

    assert_eq!(grouped.groups, labels());
    assert_eq!(grouped.get("Curto", "legit"), Some(1));
    assert_eq!(grouped.get("Médio", "legit"), Some(2));
    assert_eq!(grouped.get("Médio", "malicious"), Some(0));
    assert_eq!(grouped.get("Longo", "malicious"), Some(2));
    assert_eq!(grouped.get("Muito Longo", "malicious"), Some(3));
    assert_eq!(grouped.get("Curto", "unknown"), None);
    assert_eq!(grouped.max_count(), 3);
}
