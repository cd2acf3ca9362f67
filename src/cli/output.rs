//! Output formatting for registry-check.
//!
//! Provides terminal and JSON formatters for validation reports. The CI
//! artifact is written separately by [`ValidationResult::write_to`].
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: Color disabled via NO_COLOR or --no-color
//! - Empty reports: Produces valid output with zero checks
//! - Missing entry name: Header omits the entry line
//!
//! All formatters produce valid output for any ValidationReport input.
//!
//! [`ValidationResult::write_to`]: crate::engine::result::ValidationResult::write_to

use crate::cli::args::OutputFormat;
use crate::engine::result::{ResultSummary, ValidationReport};
use crate::{Check, CheckCategory, CheckResult};
use serde::Serialize;

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a validation report into a string
    fn format(&self, report: &ValidationReport) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter {
            color,
            verbose,
            quiet,
        }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.colorize(text, "32")
    }

    fn red(&self, text: &str) -> String {
        self.colorize(text, "31")
    }

    fn gray(&self, text: &str) -> String {
        self.colorize(text, "90")
    }

    fn format_check(&self, check: &Check, output: &mut String) {
        let (status, detail) = match &check.result {
            Some(CheckResult::Pass { duration_ms }) => {
                let detail = self.verbose.then(|| format!("{}ms", duration_ms));
                (self.green("[PASS]"), detail)
            }
            Some(CheckResult::Fail { errors, duration_ms }) => {
                let count = if errors.len() == 1 {
                    "1 error".to_string()
                } else {
                    format!("{} errors", errors.len())
                };
                let detail = if self.verbose {
                    format!("{}, {}ms", count, duration_ms)
                } else {
                    count
                };
                (self.red("[FAIL]"), Some(detail))
            }
            Some(CheckResult::Skip { reason }) => (self.gray("[SKIP]"), Some(reason.clone())),
            None => (self.gray("[----]"), Some("Not executed".to_string())),
        };

        match detail {
            Some(detail) => output.push_str(&format!(
                "  {} {}: {} ({})\n",
                status, check.id, check.name, detail
            )),
            None => output.push_str(&format!("  {} {}: {}\n", status, check.id, check.name)),
        }

        for error in check.result.iter().flat_map(|r| r.errors()) {
            output.push_str(&format!("         - {}\n", error));
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        // Header
        output.push_str(RULE);
        output.push('\n');
        output.push_str("registry-check validation report\n");
        if let Some(source) = &report.source {
            output.push_str(&format!("Registry: {}\n", source));
        }
        if let Some(entry) = &report.entry {
            output.push_str(&format!("Entry: {}\n", entry));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        let categories = [
            ("DOCUMENT CHECKS", CheckCategory::Document),
            ("FIELD CHECKS", CheckCategory::Fields),
            ("IDENTITY CHECKS", CheckCategory::Identity),
            ("REPOSITORY CHECKS", CheckCategory::Repository),
            ("ECOSYSTEM CHECKS", CheckCategory::Ecosystem),
            ("WALLET CHECKS", CheckCategory::Wallet),
        ];

        for (header, category) in categories {
            let checks: Vec<&Check> = report
                .by_category(category)
                .into_iter()
                .filter(|c| !self.quiet || matches!(c.result, Some(CheckResult::Fail { .. })))
                .collect();

            if checks.is_empty() {
                continue;
            }

            output.push_str(header);
            output.push('\n');
            for check in checks {
                self.format_check(check, &mut output);
            }
            output.push('\n');
        }

        let summary = report.summary();
        let valid = summary.errors == 0;

        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "SUMMARY: {} passed, {} failed, {} skipped\n",
            summary.passed, summary.failed, summary.skipped
        ));
        if self.verbose {
            output.push_str(&format!(
                "Total time: {:.1}s\n",
                report.total_duration_ms as f64 / 1000.0
            ));
        }
        if valid {
            output.push_str(&format!("Result: {}\n", self.green("VALID")));
        } else {
            let noun = if summary.errors == 1 { "error" } else { "errors" };
            output.push_str(&format!(
                "Result: {} ({} {})\n",
                self.red("INVALID"),
                summary.errors,
                noun
            ));
        }
        output.push_str(RULE);

        output
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    is_valid: bool,
    errors: &'a [String],
    #[serde(flatten)]
    report: &'a ValidationReport,
    summary: ResultSummary,
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let result = report.result();
        let document = JsonReport {
            is_valid: result.is_valid(),
            errors: result.errors(),
            report,
            summary: report.summary(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };

        json.unwrap_or_else(|e| {
            serde_json::json!({ "isValid": false, "errors": [e.to_string()] }).to_string()
        })
    }
}

/// Get the appropriate formatter based on output format
pub fn get_formatter(
    format: OutputFormat,
    no_color: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
