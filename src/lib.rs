//! HTML fragments that chart a single time-series CSV with Dygraphs.
//!
//! Each fragment is a sized `<div>` plus a `<script>` block pointing the
//! chart at the CSV by base filename. The page embedding it must load the
//! Dygraphs library and serve the CSV from its own directory.

pub mod error;
pub mod model;
pub mod visualization;

pub use crate::error::{DygraphFragmentError, Result};
pub use crate::model::{ChartFragment, ChartRequest, DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_WIDTH};
pub use crate::visualization::{chart_markup, generate_chart_fragment, render_report_page, served_alongside, write_report_page};
