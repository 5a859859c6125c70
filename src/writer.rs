/*!
 * Plain-text report writer for codedump
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use chrono::Local;
use indicatif::ProgressBar;

use crate::config::Config;
use crate::error::Result;
use crate::extractor::ContentExtractor;
use crate::filter::PathFilter;
use crate::scanner::Scanner;
use crate::tree::TreeRenderer;
use crate::types::ExportSummary;
use crate::utils::project_name;

/// Title written at the top of every report
pub const REPORT_TITLE: &str = "ANDROID PROJECT CODEBASE EXPORT";

/// Format of the export timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const WIDE_RULE: usize = 80;
const FILE_RULE: usize = 60;
const SECTION_RULE: usize = 40;

/// Writes the project report
pub struct ReportWriter<'a> {
    /// Writer configuration
    config: &'a Config,
    /// Progress bar advanced once per exported file
    progress: Arc<ProgressBar>,
}

impl<'a> ReportWriter<'a> {
    /// Create a new report writer
    pub fn new(config: &'a Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Create or truncate the output file and write the full report into it
    pub fn write(&self) -> Result<ExportSummary> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let file = File::create(&self.config.output_file)?;
        let mut writer = BufWriter::new(file);

        let summary = self.write_report(&mut writer, &timestamp)?;
        writer.flush()?;

        Ok(summary)
    }

    /// Write the report to any sink, stamped with `timestamp`
    pub fn write_report<W: Write>(&self, sink: W, timestamp: &str) -> Result<ExportSummary> {
        let mut out = CountingWriter::new(sink);
        let project = project_name(&self.config.target_dir);
        let filter = PathFilter::new(&self.config.filters);
        let output_filename = self.config.output_filename();

        // Header
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out, "{}", REPORT_TITLE)?;
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out, "Project Name: {}", project)?;
        writeln!(out, "Export Date: {}", timestamp)?;
        writeln!(out, "Root Directory: {}", self.config.target_dir.display())?;
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out)?;

        // Project structure
        writeln!(out, "PROJECT STRUCTURE")?;
        writeln!(out, "{}", "-".repeat(SECTION_RULE))?;
        writeln!(out, "{}/", project)?;
        let renderer = TreeRenderer::new(filter, &output_filename, self.config.max_depth);
        for line in renderer.render(&self.config.target_dir) {
            writeln!(out, "{}", line)?;
        }
        write!(out, "\n\n")?;

        // File contents
        writeln!(out, "FILE CONTENTS")?;
        writeln!(out, "{}", "-".repeat(SECTION_RULE))?;
        writeln!(out)?;

        let files = Scanner::from_config(self.config).scan();
        log::info!("Exporting {} files", files.len());
        let total_files = files.len();
        let extractor = ContentExtractor::new(filter);
        self.progress.set_length(total_files as u64);

        for (i, entry) in files.iter().enumerate() {
            let message = format!(
                "Processing ({}/{}): {}",
                i + 1,
                total_files,
                entry.relative_path
            );
            log::debug!("{}", message);
            self.progress.set_message(message);

            writeln!(out, "{}", "=".repeat(FILE_RULE))?;
            writeln!(out, "FILE: {}", entry.relative_path)?;
            writeln!(out, "{}", "=".repeat(FILE_RULE))?;
            out.write_all(extractor.extract(&entry.absolute_path).as_bytes())?;
            write!(out, "\n\n")?;

            self.progress.inc(1);
        }

        // Footer
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out, "EXPORT COMPLETED - {} files processed", total_files)?;
        writeln!(out, "Generated: {}", timestamp)?;
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        out.flush()?;

        Ok(ExportSummary {
            files_processed: total_files,
            bytes_written: out.bytes_written(),
        })
    }
}

/// Passes writes through while counting the bytes accepted
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.count
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
