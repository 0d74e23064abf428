pub mod analysis;
pub mod binning;
pub mod cleaning;
pub mod flows;
pub mod io;
pub mod profiling;
pub mod types;

pub use analysis::{box_stats, build_visual_analytics, correlation_matrix, density_curve, histogram};
pub use binning::{grouped_counts, quantile_buckets};
pub use cleaning::{categories, fill_missing_text, is_categorical, to_categorical};
pub use flows::{load_and_clean, run_eda_flow, summarise, visualise};
pub use io::{load_df, numeric_values, require_columns, save_summary, text_values};
pub use profiling::{describe, null_counts};
pub use types::{
    BoxStats, ClassBoxes, ColumnDistribution, ColumnKind, CorrelationMatrix, DensityCurve,
    DescribeColumn, DescribeTable, EdaReport, GroupedCounts, Histogram, NullCounts,
    QuantileBuckets, STATISTICS, StatValue, SummaryReport, VisualAnalytics,
};
