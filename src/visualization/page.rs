use std::path::Path;

use crate::error::Result;
use crate::model::ChartFragment;
use crate::visualization::escape::{fill_placeholders, html_escape};
use crate::visualization::templates::{DYGRAPH_SCRIPT_SRC, REPORT_TEMPLATE};

/// Wrap chart fragments in a standalone page that loads Dygraphs.
///
/// The page must sit in the same directory as the CSV files the fragments
/// reference, since they are fetched by base filename.
pub fn render_report_page(title: &str, fragments: &[ChartFragment]) -> String {
    let charts = fragments
        .iter()
        .map(|f| format!("<div class=\"chart\">\n{}\n</div>", f.markup))
        .collect::<Vec<_>>()
        .join("\n");
    let title = html_escape(title);

    fill_placeholders(
        REPORT_TEMPLATE,
        &[
            ("__PAGE_TITLE__", title.as_str()),
            ("__DYGRAPH_SRC__", DYGRAPH_SCRIPT_SRC),
            ("__CHARTS__", charts.as_str()),
        ],
    )
}

/// Whether a page at `page_path` can fetch `csv_path` by its base filename.
pub fn served_alongside(page_path: &Path, csv_path: &Path) -> bool {
    let page_dir = page_path.parent().unwrap_or_else(|| Path::new(""));
    let csv_dir = csv_path.parent().unwrap_or_else(|| Path::new(""));
    page_dir == csv_dir
}

/// Render the report page and write it to `output_path`
pub fn write_report_page(output_path: &Path, title: &str, fragments: &[ChartFragment]) -> Result<()> {
    let html = render_report_page(title, fragments);
    std::fs::write(output_path, html)?;
    Ok(())
}
