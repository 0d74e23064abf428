use crate::utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Row labels of the descriptive statistics table, in output order.
pub const STATISTICS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Full-precision rendering, used for the persisted summary.
impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => f.write_str(&utils::fmt_number(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DescribeColumn {
    pub name: String,
    pub kind: ColumnKind,
    /// One cell per entry of [`STATISTICS`]; `None` where the statistic does
    /// not apply to the column kind.
    pub cells: Vec<Option<StatValue>>,
}

impl DescribeColumn {
    pub fn get(&self, statistic: &str) -> Option<&StatValue> {
        let idx = STATISTICS.iter().position(|&s| s == statistic)?;
        self.cells.get(idx).and_then(Option::as_ref)
    }
}

/// Descriptive statistics for every column of a dataset.
#[derive(Clone, Debug, Serialize)]
pub struct DescribeTable {
    pub columns: Vec<DescribeColumn>,
}

impl DescribeTable {
    pub fn column(&self, name: &str) -> Option<&DescribeColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get(&self, column: &str, statistic: &str) -> Option<&StatValue> {
        self.column(column)?.get(statistic)
    }
}

impl fmt::Display for DescribeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut headers = vec![String::new()];
        headers.extend(self.columns.iter().map(|c| c.name.clone()));

        let rows: Vec<Vec<String>> = STATISTICS
            .iter()
            .enumerate()
            .map(|(i, stat)| {
                let mut row = vec![(*stat).to_owned()];
                row.extend(self.columns.iter().map(|c| match c.cells.get(i) {
                    Some(Some(StatValue::Number(v))) => utils::fmt_compact(*v),
                    Some(Some(StatValue::Text(s))) => utils::truncate(s, 24),
                    _ => "NaN".to_owned(),
                }));
                row
            })
            .collect();

        f.write_str(&utils::render_table(&headers, &rows))
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct NullCounts {
    pub entries: Vec<(String, usize)>,
}

impl NullCounts {
    pub fn get(&self, column: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, n)| *n)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl fmt::Display for NullCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = vec!["column".to_owned(), "nulls".to_owned()];
        let rows: Vec<Vec<String>> = self
            .entries
            .iter()
            .map(|(name, n)| vec![name.clone(), n.to_string()])
            .collect();
        f.write_str(&utils::render_table(&headers, &rows))
    }
}

/// Equal-width histogram. `edges` has `counts.len() + 1` entries; every bin
/// is half-open except the last, which includes the maximum.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    /// `(lower, upper, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .filter_map(|(w, &c)| Some((*w.first()?, *w.get(1)?, c)))
    }
}

/// Kernel density estimate scaled to histogram counts.
#[derive(Clone, Debug, Serialize)]
pub struct DensityCurve {
    pub bandwidth: f64,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ColumnDistribution {
    pub column: String,
    pub histogram: Histogram,
    pub density: Option<DensityCurve>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub data: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        self.data.get(i)?.get(j).copied()
    }
}

/// Box plot geometry for one class. Whiskers reach the most extreme
/// observation within 1.5 IQR of the quartiles.
#[derive(Clone, Debug, Serialize)]
pub struct BoxStats {
    pub class: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassBoxes {
    pub column: String,
    pub boxes: Vec<BoxStats>,
}

/// Per-row quantile bucket assignment. `edges` has `labels.len() + 1`
/// strictly increasing entries; null rows have no bucket.
#[derive(Clone, Debug, Serialize)]
pub struct QuantileBuckets {
    pub column: String,
    pub labels: Vec<String>,
    pub edges: Vec<f64>,
    pub assignments: Vec<Option<usize>>,
}

impl QuantileBuckets {
    pub fn label_of(&self, row: usize) -> Option<&str> {
        let idx = (*self.assignments.get(row)?)?;
        self.labels.get(idx).map(String::as_str)
    }

    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.labels.len()];
        for idx in self.assignments.iter().flatten() {
            if let Some(c) = counts.get_mut(*idx) {
                *c += 1;
            }
        }
        counts
    }
}

/// Row counts per `(group, hue)` pair, e.g. path-length bucket by class.
#[derive(Clone, Debug, Serialize)]
pub struct GroupedCounts {
    pub groups: Vec<String>,
    pub hues: Vec<String>,
    /// `counts[group][hue]`
    pub counts: Vec<Vec<usize>>,
}

impl GroupedCounts {
    pub fn get(&self, group: &str, hue: &str) -> Option<usize> {
        let g = self.groups.iter().position(|x| x == group)?;
        let h = self.hues.iter().position(|x| x == hue)?;
        self.counts.get(g)?.get(h).copied()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Chart-ready numbers derived from the cleaned dataset.
#[derive(Clone, Debug, Serialize)]
pub struct VisualAnalytics {
    pub classes: Vec<String>,
    pub distributions: Vec<ColumnDistribution>,
    pub correlation: CorrelationMatrix,
    pub class_boxes: Vec<ClassBoxes>,
    pub buckets: QuantileBuckets,
    pub bucket_counts: GroupedCounts,
}

/// Outcome of the summary stage: what was loaded and the statistics that
/// were printed and persisted.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub input: PathBuf,
    pub row_count: usize,
    pub column_count: usize,
    /// Nulls in the body column before the sentinel fill
    pub filled_nulls: usize,
    pub describe: DescribeTable,
    pub nulls: NullCounts,
    pub summary_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct EdaReport {
    pub summary: SummaryReport,
    pub analytics: VisualAnalytics,
    pub charts: Vec<PathBuf>,
    #[serde(skip)]
    pub duration: std::time::Duration,
}
