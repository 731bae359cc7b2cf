use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{DygraphFragmentError, Result};

pub const DEFAULT_GRAPH_HEIGHT: u32 = 600;
pub const DEFAULT_GRAPH_WIDTH: u32 = 1500;

/// Inputs for a single-metric time-series chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    /// Directory the surrounding report is written to. Not used by the fragment itself.
    pub output_directory: PathBuf,
    pub csv_file: PathBuf,
    pub plot_title: String,
    /// Report-level output name. Not used by the fragment itself.
    pub output_filename: String,
    pub y_label: Option<String>,
    /// Accepted for callers that pass it; has no effect on the markup.
    pub precision: Option<u32>,
    pub graph_height: u32,
    pub graph_width: u32,
}

impl ChartRequest {
    pub fn new(
        output_directory: impl Into<PathBuf>,
        csv_file: impl Into<PathBuf>,
        plot_title: impl Into<String>,
        output_filename: impl Into<String>,
    ) -> Self {
        Self {
            output_directory: output_directory.into(),
            csv_file: csv_file.into(),
            plot_title: plot_title.into(),
            output_filename: output_filename.into(),
            y_label: None,
            precision: None,
            graph_height: DEFAULT_GRAPH_HEIGHT,
            graph_width: DEFAULT_GRAPH_WIDTH,
        }
    }

    pub fn with_y_label(mut self, y_label: impl Into<String>) -> Self {
        self.y_label = Some(y_label.into());
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_height(mut self, graph_height: u32) -> Self {
        self.graph_height = graph_height;
        self
    }

    pub fn with_width(mut self, graph_width: u32) -> Self {
        self.graph_width = graph_width;
        self
    }

    /// Y-axis label, falling back to the plot title
    pub fn y_label(&self) -> &str {
        self.y_label.as_deref().unwrap_or(&self.plot_title)
    }

    /// Name the page uses to fetch the CSV. The report serves it from its own directory.
    pub fn csv_file_name(&self) -> Result<&str> {
        csv_base_name(&self.csv_file)
    }
}

fn csv_base_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DygraphFragmentError::InvalidCsvPath(path.to_path_buf()))
}

/// A rendered chart: the container element id and the div + script markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartFragment {
    pub container_id: String,
    pub markup: String,
}

impl ChartFragment {
    pub fn into_markup(self) -> String {
        self.markup
    }
}
