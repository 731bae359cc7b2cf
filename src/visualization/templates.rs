/// Embedded chart fragment: container div followed by the Dygraph script block
pub const FRAGMENT_TEMPLATE: &str = include_str!("../../templates/fragment.html");

/// Embedded standalone report page
pub const REPORT_TEMPLATE: &str = include_str!("../../templates/report.html");

/// Dygraphs build loaded by the report page
pub const DYGRAPH_SCRIPT_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/dygraph/1.1.1/dygraph-combined.js";
