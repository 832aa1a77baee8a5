//! Console output for scenario runs

use console::{style, Style, Term};
use std::time::Duration;

/// Prints scenario progress and the final summary
#[derive(Debug)]
pub struct ProgressReporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    fn prefix(&self, glyph: &'static str, plain: &'static str, paint: Style) -> String {
        if self.use_color {
            paint.apply_to(glyph).bold().to_string()
        } else {
            plain.to_string()
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefix("✓", "PASS", Style::new().green());
        let _ = self.out.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message; shown even in quiet mode
    pub fn failure(&self, message: &str) {
        let prefix = self.prefix("✗", "FAIL", Style::new().red());
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefix("ℹ", "INFO", Style::new().blue());
        let _ = self.out.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        let _ = self.out.write_line("");
        let _ = self.out.write_line(&styled);
    }

    /// Print one `name  description` row
    pub fn entry(&self, name: &str, description: &str) {
        let name = if self.use_color {
            style(format!("{name:<22}")).cyan().to_string()
        } else {
            format!("{name:<22}")
        };
        let line = format!("{name} {description}");
        let _ = self.out.write_line(line.trim_end());
    }

    /// Print the run summary
    pub fn summary(&self, passed: usize, failed: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }

        let total = passed + failed;
        let secs = duration.as_secs_f64();
        let _ = self.out.write_line("");

        let line = if self.use_color {
            let status = if failed > 0 {
                Style::new().red().bold().apply_to("FAILED")
            } else {
                Style::new().green().bold().apply_to("PASSED")
            };
            format!(
                "{status} {total} scenario(s) in {secs:.2}s ({} passed, {} failed)",
                Style::new().green().apply_to(passed),
                Style::new().red().apply_to(failed),
            )
        } else {
            let status = if failed > 0 { "FAILED" } else { "PASSED" };
            format!("{status} {total} scenario(s) in {secs:.2}s ({passed} passed, {failed} failed)")
        };
        let _ = self.out.write_line(&line);
    }
}
