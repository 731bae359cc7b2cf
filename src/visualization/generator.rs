use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{ChartFragment, ChartRequest};
use crate::visualization::escape::{fill_placeholders, js_string};
use crate::visualization::templates::FRAGMENT_TEMPLATE;

/// Generate the div + Dygraph script for one CSV time series.
///
/// Returns `Ok(None)` when the CSV is missing or empty; there is nothing to
/// chart. Other filesystem errors are returned as-is.
///
/// The CSV file name, title and y label are written as JS string literals,
/// so quotes, backslashes, control characters and `</` appear escaped in
/// the markup rather than verbatim.
pub fn generate_chart_fragment(request: &ChartRequest) -> Result<Option<ChartFragment>> {
    if !has_data(&request.csv_file)? {
        debug!(csv = %request.csv_file.display(), "skipping chart for empty or missing CSV");
        return Ok(None);
    }

    if let Some(precision) = request.precision {
        debug!(precision, "precision is not applied to chart output");
    }

    let container_id = new_container_id();
    let csv_file = js_string(request.csv_file_name()?)?;
    let y_label = js_string(request.y_label())?;
    let plot_title = js_string(&request.plot_title)?;
    let graph_height = request.graph_height.to_string();
    let graph_width = request.graph_width.to_string();

    let markup = fill_placeholders(
        FRAGMENT_TEMPLATE.trim_end(),
        &[
            ("__CONTAINER_ID__", container_id.as_str()),
            ("__GRAPH_WIDTH__", graph_width.as_str()),
            ("__GRAPH_HEIGHT__", graph_height.as_str()),
            ("__CSV_FILE__", csv_file.as_str()),
            ("__Y_LABEL__", y_label.as_str()),
            ("__PLOT_TITLE__", plot_title.as_str()),
        ],
    );

    debug!(
        container_id = %container_id,
        csv = %request.csv_file.display(),
        output_directory = %request.output_directory.display(),
        output_filename = %request.output_filename,
        graph_height = request.graph_height,
        graph_width = request.graph_width,
        "generated chart fragment"
    );

    Ok(Some(ChartFragment { container_id, markup }))
}

/// Flag-and-markup form: `(false, "")` when there is nothing to chart.
pub fn chart_markup(request: &ChartRequest) -> Result<(bool, String)> {
    Ok(match generate_chart_fragment(request)? {
        Some(fragment) => (true, fragment.into_markup()),
        None => (false, String::new()),
    })
}

fn has_data(csv_file: &Path) -> Result<bool> {
    match std::fs::metadata(csv_file) {
        Ok(metadata) => Ok(metadata.len() > 0),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn new_container_id() -> String {
    format!("chart-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DygraphFragmentError;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn cpu_csv(dir: &TempDir) -> std::path::PathBuf {
        write_csv(dir, "cpu.csv", "2024-01-01 00:00:00,12.5\n2024-01-01 00:00:01,13.0\n")
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let csv = write_csv(&dir, "empty.csv", "");
        let request = ChartRequest::new(dir.path(), csv, "Empty", "empty");

        assert_eq!(chart_markup(&request).unwrap(), (false, String::new()));
        assert!(generate_chart_fragment(&request).unwrap().is_none());
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let request = ChartRequest::new(dir.path(), dir.path().join("absent.csv"), "Absent", "absent");

        assert_eq!(chart_markup(&request).unwrap(), (false, String::new()));
    }

    #[test]
    fn test_path_below_regular_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let plain = write_csv(&dir, "plain.csv", "not a directory\n");
        let request = ChartRequest::new(dir.path(), plain.join("cpu.csv"), "CPU", "cpu");

        assert_eq!(chart_markup(&request).unwrap(), (false, String::new()));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let request = ChartRequest::new(dir.path(), dir.path().join("cpu\0.csv"), "CPU", "cpu");

        assert!(matches!(
            chart_markup(&request),
            Err(DygraphFragmentError::Io(_))
        ));
    }

    #[test]
    fn test_special_characters_are_js_encoded() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, r#"C:\data "cpu""#, "cpu");

        let fragment = generate_chart_fragment(&request).unwrap().unwrap();
        assert!(fragment.markup.contains(r#"title: "C:\\data \"cpu\"""#));
    }

    #[test]
    fn test_default_fragment() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, "CPU Usage", "cpu");

        let (ok, markup) = chart_markup(&request).unwrap();
        assert!(ok);
        assert!(markup.contains("\"cpu.csv\""));
        assert!(!markup.contains(&dir.path().display().to_string()));
        assert!(markup.contains("title: \"CPU Usage\""));
        assert!(markup.contains("ylabel: \"CPU Usage\""));
        assert!(markup.contains("labels: [\"Time\", \"CPU Usage\"]"));
        assert!(markup.contains("width:1500px; height:600px;"));
        assert!(markup.contains("xlabel: \"Time\""));
        assert!(markup.contains("ticker: Dygraph.dateTicker"));
    }

    #[test]
    fn test_custom_label_and_dimensions() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, "CPU Usage", "cpu")
            .with_y_label("percent busy")
            .with_height(300)
            .with_width(800);

        let fragment = generate_chart_fragment(&request).unwrap().unwrap();
        assert!(fragment.markup.contains("ylabel: \"percent busy\""));
        assert!(fragment.markup.contains("title: \"CPU Usage\""));
        assert!(fragment.markup.contains("width:800px; height:300px;"));
    }

    #[test]
    fn test_container_id_matches_div_and_script() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, "CPU Usage", "cpu");

        let fragment = generate_chart_fragment(&request).unwrap().unwrap();
        assert!(fragment.container_id.starts_with("chart-"));
        assert!(fragment.markup.starts_with(&format!("<div id=\"{}\"", fragment.container_id)));
        assert!(fragment
            .markup
            .contains(&format!("document.getElementById(\"{}\")", fragment.container_id)));
        assert!(fragment.markup.ends_with("</script>"));
    }

    #[test]
    fn test_repeated_calls_differ_only_in_container_id() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, "CPU Usage", "cpu");

        let first = generate_chart_fragment(&request).unwrap().unwrap();
        let second = generate_chart_fragment(&request).unwrap().unwrap();

        assert_ne!(first.container_id, second.container_id);
        assert_eq!(
            first.markup.replace(&first.container_id, "ID"),
            second.markup.replace(&second.container_id, "ID")
        );
    }

    #[test]
    fn test_precision_has_no_effect() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let plain = ChartRequest::new(dir.path(), &csv, "CPU Usage", "cpu");
        let with_precision = plain.clone().with_precision(3);

        let a = generate_chart_fragment(&plain).unwrap().unwrap();
        let b = generate_chart_fragment(&with_precision).unwrap().unwrap();
        assert_eq!(
            a.markup.replace(&a.container_id, "ID"),
            b.markup.replace(&b.container_id, "ID")
        );
    }

    #[test]
    fn test_title_cannot_close_script() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, "</script><b>x</b>", "cpu");

        let fragment = generate_chart_fragment(&request).unwrap().unwrap();
        assert_eq!(fragment.markup.matches("</script>").count(), 1);
    }

    #[test]
    fn test_title_with_placeholder_text_is_literal() {
        let dir = TempDir::new().unwrap();
        let csv = cpu_csv(&dir);
        let request = ChartRequest::new(dir.path(), &csv, "__CSV_FILE__", "cpu");

        let fragment = generate_chart_fragment(&request).unwrap().unwrap();
        assert!(fragment.markup.contains("title: \"__CSV_FILE__\""));
    }
}
