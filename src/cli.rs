#![expect(clippy::print_stdout)] // `config` prints the effective settings

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use reqscope::analyser::logic::{self, SummaryReport};
use reqscope::config::{ChartFormat, EdaConfig};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reqscope",
    about = "Exploratory analysis of labelled HTTP request datasets"
)]
pub struct Cli {
    /// Also write a daily rolling log file to the platform data directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise a request dataset and render its charts
    Analyze {
        /// CSV dataset to analyse
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the descriptive statistics CSV
        #[arg(short, long)]
        summary: Option<PathBuf>,

        /// Directory for rendered charts
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Chart file format
        #[arg(long, value_enum)]
        format: Option<ChartFormat>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,

        /// Path to a JSON configuration file
        #[arg(long, env = "REQSCOPE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Path to a JSON configuration file
        #[arg(long, env = "REQSCOPE_CONFIG")]
        config: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            summary,
            charts_dir,
            format,
            no_charts,
            config,
        } => {
            let mut eda_config = EdaConfig::load_or_default(config.as_deref())?;
            apply_overrides(
                &mut eda_config,
                Overrides {
                    input,
                    summary,
                    charts_dir,
                    format,
                    no_charts,
                },
            );
            handle_analyze(&eda_config)
        }
        Commands::Config { config } => {
            let eda_config = EdaConfig::load_or_default(config.as_deref())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&eda_config).context("Failed to encode config")?
            );
            Ok(())
        }
    }
}

struct Overrides {
    input: Option<PathBuf>,
    summary: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
    format: Option<ChartFormat>,
    no_charts: bool,
}

fn apply_overrides(config: &mut EdaConfig, overrides: Overrides) {
    if let Some(input) = overrides.input {
        config.input = input;
    }
    if let Some(summary) = overrides.summary {
        config.summary_path = summary;
    }
    if let Some(dir) = overrides.charts_dir {
        config.charts.output_dir = dir;
    }
    if let Some(format) = overrides.format {
        config.charts.format = format;
    }
    if overrides.no_charts {
        config.charts.enabled = false;
    }
}

fn handle_analyze(config: &EdaConfig) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    analyze(config, &mut stdout)
}

/// Runs the summary stage, writes its tables to `out`, then runs the visual
/// stage. The tables are written even when the visual stage fails.
fn analyze(config: &EdaConfig, out: &mut impl Write) -> Result<()> {
    let start = std::time::Instant::now();
    tracing::info!("Analysing {}", config.input.display());

    let (cleaned, summary) = logic::summarise(config)?;
    write_summary(out, &summary).context("Failed to write summary to stdout")?;

    let (_, charts) = logic::visualise(&cleaned, config)?;
    for path in &charts {
        tracing::info!("Chart written: {}", path.display());
    }
    tracing::info!(
        "Analysed {} rows in {:.2?}",
        summary.row_count,
        start.elapsed()
    );
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &SummaryReport) -> std::io::Result<()> {
    writeln!(out, "Descriptive statistics:\n{}", summary.describe)?;
    writeln!(out, "\nNull values per column:\n{}", summary.nulls)?;
    writeln!(
        out,
        "\nDescriptive statistics saved to: {}",
        summary.summary_path.display()
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = EdaConfig::default();
        apply_overrides(
            &mut config,
            Overrides {
                input: Some(PathBuf::from("in.csv")),
                summary: None,
                charts_dir: Some(PathBuf::from("out")),
                format: Some(ChartFormat::Png),
                no_charts: true,
            },
        );
        assert_eq!(config.input, PathBuf::from("in.csv"));
        assert_eq!(config.charts.output_dir, PathBuf::from("out"));
        assert_eq!(config.charts.format, ChartFormat::Png);
        assert!(!config.charts.enabled);
        assert_eq!(
            config.summary_path,
            PathBuf::from(reqscope::config::DEFAULT_SUMMARY_PATH)
        );
    }

    #[test]
    fn test_tables_written_before_binning_failure() {
        let out = tempfile::tempdir().expect("tempdir");
        let mut config = EdaConfig {
            input: PathBuf::from("testdata/constant_paths.csv"),
            summary_path: out.path().join("summary.csv"),
            ..Default::default()
        };
        config.charts.enabled = false;

        let mut stdout = Vec::new();
        let err = analyze(&config, &mut stdout)
            .expect_err("constant path lengths cannot be bucketed");
        assert!(matches!(
            err.downcast_ref::<reqscope::error::EdaError>(),
            Some(reqscope::error::EdaError::Binning(_))
        ));

        let printed = String::from_utf8(stdout).expect("utf-8 output");
        assert!(printed.starts_with("Descriptive statistics:\n"));
        assert!(printed.contains("path_length"));
        assert!(printed.contains("Null values per column:"));
        assert!(printed.contains(&format!(
            "Descriptive statistics saved to: {}",
            config.summary_path.display()
        )));
        assert!(config.summary_path.exists());
    }

    #[test]
    fn test_console_output_is_tables_and_confirmation() {
        let out = tempfile::tempdir().expect("tempdir");
        let mut config = EdaConfig {
            input: PathBuf::from("testdata/requests.csv"),
            summary_path: out.path().join("summary.csv"),
            ..Default::default()
        };
        config.charts.enabled = false;

        let mut stdout = Vec::new();
        analyze(&config, &mut stdout).expect("analysis succeeds");

        let printed = String::from_utf8(stdout).expect("utf-8 output");
        let last = printed.lines().last().expect("output");
        assert!(last.starts_with("Descriptive statistics saved to: "));
        assert!(!printed.contains("Analysing"));
        assert!(!printed.contains("Rendered"));
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "reqscope",
            "analyze",
            "--input",
            "reqs.csv",
            "--format",
            "png",
            "--no-charts",
        ])
        .expect("valid arguments");
        match cli.command {
            Commands::Analyze {
                input,
                format,
                no_charts,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("reqs.csv")));
                assert_eq!(format, Some(ChartFormat::Png));
                assert!(no_charts);
            }
            Commands::Config { .. } => panic!("expected analyze"),
        }
    }
}
