use crate::core::results::{RunSummary, ValidationResult};
use crate::core::traits::ProgressSink;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print the startup banner
    pub fn print_banner() {
        println!("{}", "=".repeat(60).bright_cyan());
        println!(
            "{}",
            "  Key Tester - Batch API Key Validation".bright_cyan().bold()
        );
        println!("{}", "=".repeat(60).bright_cyan());
        println!();
    }

    /// Print the run digest
    pub fn print_summary(summary: &RunSummary) {
        println!();
        println!("{}", "=".repeat(60).bright_cyan());
        println!("{}", "  Test Summary".bright_cyan().bold());
        println!("{}", "=".repeat(60).bright_cyan());
        println!();

        println!("  Total keys: {}", summary.total.to_string().bright_white());
        println!(
            "  Valid keys: {} ({:.1}%)",
            summary.valid.to_string().bright_green(),
            summary.valid_percentage
        );
        println!(
            "  Invalid keys: {} ({:.1}%)",
            summary.invalid.to_string().bright_red(),
            summary.invalid_percentage
        );

        match summary.avg_response_time_ms {
            Some(avg) => println!(
                "  Average response time: {} ms",
                format!("{:.2}", avg).bright_white()
            ),
            None => println!("  Average response time: {}", "n/a (no call completed)".dimmed()),
        }

        println!();
        println!("{}", "=".repeat(60).bright_cyan());
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "✗".bright_red(), message.red());
    }

    /// Print success message
    pub fn print_success(message: &str) {
        println!("{} {}", "✓".bright_green(), message.green());
    }
}

/// Progress reporting for interactive runs: a progress bar per completion
/// plus milestone lines through `tracing` (so they also reach the log file).
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_result(&self, _result: &ValidationResult) {
        self.bar.inc(1);
    }

    fn on_progress(&self, completed: usize, total: usize, valid: usize) {
        let pct = completed as f64 / total as f64 * 100.0;
        self.bar.set_message(format!("valid: {}", valid));
        self.bar.suspend(|| {
            info!(
                "Progress: {}/{} ({:.1}%) - valid: {}",
                completed, total, pct, valid
            );
        });
    }
}
