use std::path::PathBuf;
use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dygraph_fragment::{generate_chart_fragment, served_alongside, write_report_page, ChartRequest};

#[derive(Parser)]
#[command(name = "dygraph-fragment")]
#[command(author, version, about = "Dygraph chart fragments for time-series CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the div + script fragment charting one CSV file
    Fragment {
        /// Path to the time-series CSV file
        #[arg(value_name = "CSV")]
        csv: PathBuf,

        /// Chart title
        #[arg(long)]
        title: String,

        /// Y-axis label (default: the title)
        #[arg(long)]
        y_label: Option<String>,

        /// Accepted for compatibility; does not change the output
        #[arg(long)]
        precision: Option<u32>,

        /// Chart height in pixels
        #[arg(long, default_value_t = dygraph_fragment::DEFAULT_GRAPH_HEIGHT)]
        height: u32,

        /// Chart width in pixels
        #[arg(long, default_value_t = dygraph_fragment::DEFAULT_GRAPH_WIDTH)]
        width: u32,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit {"container_id", "markup"} as JSON instead of raw markup
        #[arg(long)]
        json: bool,
    },

    /// Build a standalone HTML page with one chart per CSV file
    Page {
        /// CSV files to chart, one chart each
        #[arg(value_name = "CSV", required = true)]
        csvs: Vec<PathBuf>,

        /// Output HTML file path (default: report.html next to the first CSV)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long, default_value = "Metrics")]
        title: String,

        /// Chart height in pixels
        #[arg(long, default_value_t = dygraph_fragment::DEFAULT_GRAPH_HEIGHT)]
        height: u32,

        /// Chart width in pixels
        #[arg(long, default_value_t = dygraph_fragment::DEFAULT_GRAPH_WIDTH)]
        width: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fragment { csv, title, y_label, precision, height, width, output, json } => {
            let output_directory = output
                .as_ref()
                .and_then(|p| p.parent())
                .map(PathBuf::from)
                .unwrap_or_default();
            let output_filename = output
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut request = ChartRequest::new(output_directory, &csv, title, output_filename)
                .with_height(height)
                .with_width(width);
            if let Some(label) = y_label {
                request = request.with_y_label(label);
            }
            if let Some(precision) = precision {
                request = request.with_precision(precision);
            }

            let Some(fragment) = generate_chart_fragment(&request)? else {
                warn!(csv = %csv.display(), "CSV is empty or missing, no chart generated");
                return Ok(());
            };

            let rendered = if json {
                serde_json::to_string_pretty(&fragment)?
            } else {
                fragment.markup
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    info!(path = %path.display(), "fragment written");
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Page { csvs, output, title, height, width } => {
            let output_path = output.unwrap_or_else(|| {
                let mut path = csvs[0].clone();
                path.set_file_name("report.html");
                path
            });
            let output_directory = output_path.parent().map(PathBuf::from).unwrap_or_default();
            let output_filename = output_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut fragments = Vec::new();
            for csv in &csvs {
                let plot_title = csv
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| csv.display().to_string());
                if !served_alongside(&output_path, csv) {
                    warn!(
                        csv = %csv.display(),
                        page = %output_path.display(),
                        "CSV is not in the page directory, the chart will not find it"
                    );
                }
                let request = ChartRequest::new(&output_directory, csv, plot_title, output_filename.clone())
                    .with_height(height)
                    .with_width(width);

                match generate_chart_fragment(&request)? {
                    Some(fragment) => fragments.push(fragment),
                    None => warn!(csv = %csv.display(), "CSV is empty or missing, skipping chart"),
                }
            }

            write_report_page(&output_path, &title, &fragments)?;

            info!(
                path = %output_path.display(),
                charts = fragments.len(),
                "report page generated"
            );
        }
    }

    Ok(())
}
