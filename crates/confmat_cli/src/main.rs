//! confmat CLI: confusion matrix tables and heatmaps from labelled CSV files.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use confmat::{
    confusion_matrix, show_confusion_matrix_with, HeatmapConfig, PresentTarget, Presented,
};

#[derive(Parser)]
#[command(name = "confmat")]
#[command(author, version)]
#[command(about = "Confusion matrix tables and heatmaps from true and predicted labels")]
#[command(long_about = "confmat: compute a confusion matrix from a CSV of true and predicted labels
and render it as an annotated heatmap.

EXAMPLES:
  # Print the matrix as a table
  confmat table --input predictions.csv

  # Render an SVG heatmap
  confmat plot --input predictions.csv --output cm.svg

  # Use custom column names and a rendering config
  confmat plot --input runs.csv --true-col label --pred-col guess --config heatmap.json --output cm.svg

Labels that all parse as integers are ordered numerically, otherwise as text.")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// CSV file with a header row
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Column holding the true labels
    #[arg(long, default_value = "y_true", value_name = "NAME")]
    true_col: String,

    /// Column holding the predicted labels
    #[arg(long, default_value = "y_pred", value_name = "NAME")]
    pred_col: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the confusion matrix as a heatmap
    Plot {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (.svg, or .png with the bitmap feature); SVG to stdout if omitted
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// JSON rendering configuration
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,

        /// Caption drawn above the heatmap
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the confusion matrix
    Table {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of a text table
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

/// Label columns read from a CSV file.
enum LabelColumns {
    Integer(Vec<i64>, Vec<i64>),
    Text(Vec<String>, Vec<String>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    match cli.command {
        Commands::Plot {
            input,
            output,
            config,
            title,
        } => handle_plot(input, output, config, title),
        Commands::Table { input, json } => handle_table(input, json),
    }
}

fn handle_plot(
    input: InputArgs,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    title: Option<String>,
) -> Result<()> {
    let mut heatmap_config = match config {
        Some(path) => HeatmapConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => HeatmapConfig::default(),
    };
    if let Some(title) = title {
        heatmap_config = heatmap_config.with_title(title);
    }

    let target = match output {
        Some(path) => PresentTarget::File(path),
        None => PresentTarget::Stdout,
    };

    match read_labels(&input)? {
        LabelColumns::Integer(y_true, y_pred) => plot(&y_true, &y_pred, heatmap_config, &target),
        LabelColumns::Text(y_true, y_pred) => plot(&y_true, &y_pred, heatmap_config, &target),
    }
}

fn plot<L: Ord + Clone + Display>(
    y_true: &[L],
    y_pred: &[L],
    config: HeatmapConfig,
    target: &PresentTarget,
) -> Result<()> {
    let (cm, presented) = show_confusion_matrix_with(y_true, y_pred, config, target)
        .context("Failed to plot confusion matrix")?;

    match presented {
        Presented::File(path) => {
            println!(
                "Wrote {}x{} confusion matrix ({} observations) to {}",
                cm.n_classes(),
                cm.n_classes(),
                cm.total(),
                path.display()
            );
        }
        Presented::Stdout(bytes) => tracing::info!("Wrote {} bytes to stdout", bytes),
        Presented::Memory(_) => {}
    }
    Ok(())
}

fn handle_table(input: InputArgs, json: bool) -> Result<()> {
    match read_labels(&input)? {
        LabelColumns::Integer(y_true, y_pred) => print_table(&y_true, &y_pred, json),
        LabelColumns::Text(y_true, y_pred) => print_table(&y_true, &y_pred, json),
    }
}

fn print_table<L>(y_true: &[L], y_pred: &[L], json: bool) -> Result<()>
where
    L: Ord + Clone + Display + serde::Serialize,
{
    let cm = confusion_matrix(y_true, y_pred)
        .context("Failed to compute confusion matrix")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&cm)?);
    } else {
        print!("{}", cm.to_string_table());
    }
    Ok(())
}

/// Read the true and predicted label columns from a CSV file.
fn read_labels(input: &InputArgs) -> Result<LabelColumns> {
    let (y_true, y_pred) = read_columns(&input.input, &input.true_col, &input.pred_col)
        .with_context(|| format!("Failed to read labels from '{}'", input.input.display()))?;
    tracing::info!("Read {} label pairs from {}", y_true.len(), input.input.display());
    Ok(classify_labels(y_true, y_pred))
}

fn read_columns(path: &Path, true_col: &str, pred_col: &str) -> Result<(Vec<String>, Vec<String>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| -> Result<usize> {
        match headers.iter().position(|h| h.trim() == name) {
            Some(idx) => Ok(idx),
            None => bail!(
                "Column '{}' not found. Available columns: {}",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        }
    };
    let true_idx = position(true_col)?;
    let pred_idx = position(pred_col)?;

    let mut y_true = Vec::new();
    let mut y_pred = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let (Some(t), Some(p)) = (record.get(true_idx), record.get(pred_idx)) else {
            bail!("Row {} is missing a label column", line + 2);
        };
        y_true.push(t.trim().to_string());
        y_pred.push(p.trim().to_string());
    }

    Ok((y_true, y_pred))
}

/// Use integer labels when every value parses, so "10" sorts after "9".
fn classify_labels(y_true: Vec<String>, y_pred: Vec<String>) -> LabelColumns {
    let parse = |labels: &[String]| -> Option<Vec<i64>> {
        labels.iter().map(|l| l.parse().ok()).collect()
    };
    match (parse(&y_true), parse(&y_pred)) {
        (Some(t), Some(p)) => LabelColumns::Integer(t, p),
        _ => LabelColumns::Text(y_true, y_pred),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integer_labels() {
        let y_true = vec!["10".to_string(), "9".to_string()];
        let y_pred = vec!["9".to_string(), "9".to_string()];
        let labels = classify_labels(y_true, y_pred);
        let LabelColumns::Integer(t, p) = labels else {
            panic!("expected integer labels");
        };
        let cm = confusion_matrix(&t, &p).unwrap();
        assert_eq!(cm.labels(), &[9, 10]);
    }

    #[test]
    fn test_classify_text_labels() {
        let y_true = vec!["1".to_string(), "cat".to_string()];
        let y_pred = vec!["1".to_string(), "1".to_string()];
        let labels = classify_labels(y_true, y_pred);
        assert!(matches!(labels, LabelColumns::Text(_, _)));
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("confmat_cli_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_read_columns() {
        let path = temp_path("columns.csv");
        std::fs::write(&path, "id,y_true,y_pred\n1,cat,dog\n2, dog ,dog\n").unwrap();

        let (y_true, y_pred) = read_columns(&path, "y_true", "y_pred").unwrap();
        let missing = read_columns(&path, "label", "y_pred");
        std::fs::remove_file(&path).unwrap();

        assert_eq!(y_true, vec!["cat", "dog"]);
        assert_eq!(y_pred, vec!["dog", "dog"]);
        assert!(missing.unwrap_err().to_string().contains("Column 'label' not found"));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let args = ["confmat", "-vv", "table", "--input", "x.csv", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Table { json: true, .. }));
    }

    #[test]
    fn test_handle_plot_writes_svg() {
        let csv_path = temp_path("plot.csv");
        let svg_path = temp_path("plot.svg");
        std::fs::write(&csv_path, "y_true,y_pred\n0,0\n1,0\n").unwrap();

        let input = InputArgs {
            input: csv_path.clone(),
            true_col: "y_true".to_string(),
            pred_col: "y_pred".to_string(),
        };
        let title = Some("Holdout".to_string());
        let result = handle_plot(input, Some(svg_path.clone()), None, title);
        let svg = std::fs::read_to_string(&svg_path);
        std::fs::remove_file(&csv_path).unwrap();
        let _ = std::fs::remove_file(&svg_path);

        result.unwrap();
        let svg = svg.unwrap();
        for needle in ["Predicted", "Observed", "Holdout"] {
            assert!(svg.contains(needle), "missing {needle}");
        }
    }
}
