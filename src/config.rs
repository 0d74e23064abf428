use crate::error::{EdaError, Result, ResultExt as _};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_PATH: &str = "data/2bad_reqff.csv";
pub const DEFAULT_SUMMARY_PATH: &str = "data/log_analysis_summary.csv";
pub const DEFAULT_CHARTS_DIR: &str = "charts";
pub const MISSING_BODY_SENTINEL: &str = "N/A";

/// Numeric request metrics charted and correlated by the analysis.
pub const NUMERIC_COLUMNS: [&str; 8] = [
    "single_q",
    "double_q",
    "dashes",
    "braces",
    "spaces",
    "path_length",
    "body_length",
    "badwords_count",
];

/// Equal-frequency buckets for `path_length`, shortest first.
pub const PATH_LENGTH_LABELS: [&str; 4] = ["Curto", "Médio", "Longo", "Muito Longo"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    #[default]
    Svg,
    Png,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Skip chart rendering entirely when false
    pub enabled: bool,
    pub output_dir: PathBuf,
    pub format: ChartFormat,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            format: ChartFormat::default(),
            // 12 x 6 inch figure at 100 dpi
            width: 1200,
            height: 600,
        }
    }
}

/// Everything the analysis pipeline reads from outside: file locations,
/// column names and the chart parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    pub input: PathBuf,
    pub summary_path: PathBuf,
    /// Free-text column whose nulls are replaced by `sentinel`
    pub body_column: String,
    pub sentinel: String,
    /// Label column used to split box plots and bar charts
    pub class_column: String,
    /// Column split into quantile buckets
    pub bucket_column: String,
    pub bucket_labels: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub histogram_bins: usize,
    pub charts: ChartConfig,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            body_column: "body".to_owned(),
            sentinel: MISSING_BODY_SENTINEL.to_owned(),
            class_column: "class".to_owned(),
            bucket_column: "path_length".to_owned(),
            bucket_labels: PATH_LENGTH_LABELS.iter().map(|&s| s.to_owned()).collect(),
            numeric_columns: NUMERIC_COLUMNS.iter().map(|&s| s.to_owned()).collect(),
            histogram_bins: 30,
            charts: ChartConfig::default(),
        }
    }
}

impl EdaConfig {
    /// Reads a JSON config file. Keys that are absent keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from the defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`EdaConfig::load`] failures.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// Returns [`EdaError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.numeric_columns.is_empty() {
            return Err(EdaError::Config(
                "at least one numeric column is required".to_owned(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(EdaError::Config(
                "histogram_bins must be greater than zero".to_owned(),
            ));
        }
        if self.bucket_labels.len() < 2 {
            return Err(EdaError::Config(format!(
                "bucket_labels needs at least two labels, got {}",
                self.bucket_labels.len()
            )));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(EdaError::Config(format!(
                "chart size must be non-zero, got {}x{}",
                self.charts.width, self.charts.height
            )));
        }
        Ok(())
    }

    /// Columns the dataset must contain, in the order they are checked.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut required = vec![self.body_column.as_str(), self.class_column.as_str()];
        for name in self
            .numeric_columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.bucket_column.as_str()))
        {
            if !required.contains(&name) {
                required.push(name);
            }
        }
        required
    }
}
