/*!
 * Reporting functionality for ccopier
 *
 * Renders a summary of a copy (which files went out, how big the payload
 * is) as console tables using the tabled library.
 */

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::serializer::Serialization;
use crate::utils::format_file_size;

/// Files listed individually before the table is cut short
const MAX_LISTED_FILES: usize = 15;

/// Summary of one copy operation
#[derive(Debug, Clone)]
pub struct CopyReport {
    /// Where the payload went
    pub destination: String,
    /// Display paths of copied files, in order
    pub files: Vec<String>,
    /// Total characters in the payload
    pub total_chars: usize,
    /// Total bytes in the payload
    pub total_bytes: usize,
    /// Total lines in the payload
    pub total_lines: usize,
}

impl CopyReport {
    pub fn new(destination: impl Into<String>, result: &Serialization) -> Self {
        Self {
            destination: destination.into(),
            files: result.copied.clone(),
            total_chars: result.text.chars().count(),
            total_bytes: result.text.len(),
            total_lines: result.text.lines().count(),
        }
    }
}

/// Report generator for copy results
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Render the files table followed by the summary table
    pub fn generate_report(&self, report: &CopyReport) -> String {
        let files_title = if report.files.len() > MAX_LISTED_FILES {
            format!("📋  FIRST {} OF {} COPIED FILES", MAX_LISTED_FILES, report.files.len())
        } else {
            "📋  COPIED FILES".to_string()
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "✅  COPY COMPLETE",
            self.create_summary_table(report)
        )
    }

    /// Print the report to stderr so stdout stays free for the payload
    pub fn print_report(&self, report: &CopyReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_files_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "#")]
            index: usize,

            #[tabled(rename = "File Path")]
            path: String,
        }

        let rows: Vec<FileRow> = report
            .files
            .iter()
            .take(MAX_LISTED_FILES)
            .enumerate()
            .map(|(i, path)| FileRow {
                index: i + 1,
                path: path.clone(),
            })
            .collect();

        style(Table::new(rows))
    }

    fn create_summary_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Destination".to_string(),
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "📄 Files Copied".to_string(),
                value: self.format_number(report.files.len()),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "💾 Payload Size".to_string(),
                value: format_file_size(report.total_bytes as u64),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.total_chars / 4)
                ),
            },
        ];

        style(Table::new(rows))
    }
}

fn style(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialization(files: usize) -> Serialization {
        Serialization {
            text: "// a.rs\nfn a() {}\n\n// b.rs\nfn b() {}".to_string(),
            copied: (0..files).map(|i| format!("src/file{}.rs", i)).collect(),
        }
    }

    #[test]
    fn test_copy_report_totals() {
        let report = CopyReport::new("clipboard", &serialization(2));
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.total_lines, 5);
        assert_eq!(report.total_bytes, report.total_chars);
    }

    #[test]
    fn test_report_lists_files_and_summary() {
        let report = CopyReport::new("stdout", &serialization(2));
        let text = Reporter::new().generate_report(&report);

        assert!(text.contains("COPIED FILES"));
        assert!(text.contains("src/file0.rs"));
        assert!(text.contains("src/file1.rs"));
        assert!(text.contains("stdout"));
        assert!(text.contains("COPY COMPLETE"));
    }

    #[test]
    fn test_report_truncates_long_file_lists() {
        let report = CopyReport::new("clipboard", &serialization(20));
        let text = Reporter::new().generate_report(&report);

        assert!(text.contains("FIRST 15 OF 20 COPIED FILES"));
        assert!(text.contains("src/file14.rs"));
        assert!(!text.contains("src/file15.rs"));
    }

    #[test]
    fn test_format_number() {
        let reporter = Reporter::new();
        assert_eq!(reporter.format_number(999), "999");
        assert_eq!(reporter.format_number(1_500), "1.5K");
        assert_eq!(reporter.format_number(2_000_000), "2.0M");
    }
}
