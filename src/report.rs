/*!
 * Console summary for a finished export
 *
 * Rendered with the tabled library once the report file has been written.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::ExportSummary;
use crate::utils::format_file_size;

/// Everything shown after an export completes
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Project name shown in the report header
    pub project_name: String,
    /// Time taken to write the report
    pub duration: Duration,
    /// Totals from the writer
    pub summary: ExportSummary,
}

/// Report generator for completed exports
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Generate the summary text
    pub fn generate_report(&self, report: &RunReport) -> String {
        format!(
            "✅  CODEBASE EXPORT COMPLETED\n{}",
            self.create_summary_table(report)
        )
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "📦 Project",
                value: report.project_name.clone(),
            },
            SummaryRow {
                key: "📄 Files Processed",
                value: report.summary.files_processed.to_string(),
            },
            SummaryRow {
                key: "💾 Report Size",
                value: format_file_size(report.summary.bytes_written),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
