//! Console presentation: the progress bar during a run and the final summary.
//!
//! The bar and the log lines share stderr. Log events go through
//! [`LogWriter`], which clears the bar, writes the line, and redraws.

use crate::batch::Progress;
use crate::models::BatchReport;
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// `MakeWriter` for the tracing subscriber that keeps log lines from tearing
/// through the bars drawn by `bars`.
#[derive(Clone)]
pub struct LogWriter {
    bars: MultiProgress,
}

impl LogWriter {
    pub fn new(bars: MultiProgress) -> Self {
        Self { bars }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = SuspendingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter::new(self.bars.clone(), io::stderr())
    }
}

/// Buffers one log event and emits it with the bars suspended.
pub struct SuspendingWriter<W: Write> {
    bars: MultiProgress,
    buf: Vec<u8>,
    sink: W,
}

impl<W: Write> SuspendingWriter<W> {
    fn new(bars: MultiProgress, sink: W) -> Self {
        Self {
            bars,
            buf: Vec::new(),
            sink,
        }
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let Self { bars, buf, sink } = self;
        let written = bars.suspend(|| {
            sink.write_all(buf)?;
            sink.flush()
        });
        buf.clear();
        written
    }
}

impl<W: Write> Drop for SuspendingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Progress bar for a batch of `total` domains, added to `bars`. Drawn on
/// stderr, and hidden automatically when stderr is not a terminal.
pub fn create_progress_bar(bars: &MultiProgress, total: usize) -> ProgressBar {
    let pb = bars.add(ProgressBar::new(total as u64));
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .progress_chars("█▓░");
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Advance `pb` for one completed domain.
pub fn record(pb: &ProgressBar, progress: &Progress<'_>) {
    let mark = if progress.result.is_valid_source {
        style("✓").green()
    } else {
        style("✗").red()
    };
    pb.set_length(progress.total as u64);
    pb.set_position(progress.done as u64);
    pb.set_message(format!("{mark} {}", progress.result.domain));
}

/// Human-readable summary of a report.
pub fn render_summary(report: &BatchReport) -> String {
    let (valid, invalid) = report.partition();
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", style("Summary").bold().underlined()));
    out.push_str(&format!("  Domains checked: {}\n", report.total));
    out.push_str(&format!(
        "  Valid news sources: {} ({}%)\n",
        style(report.valid_count).green().bold(),
        report.percentage()
    ));
    out.push_str(&format!(
        "  Not recognized: {}\n",
        style(report.total - report.valid_count).red().bold()
    ));

    if !valid.is_empty() {
        out.push_str(&format!("\n{}\n", style("Valid sources").green().bold()));
        for result in valid {
            out.push_str(&format!("  {} {}\n", style("✓").green(), result.domain));
        }
    }
    if !invalid.is_empty() {
        out.push_str(&format!("\n{}\n", style("Not recognized").red().bold()));
        for result in invalid {
            out.push_str(&format!("  {} {}\n", style("✗").red(), result.domain));
        }
    }
    out
}
