//! CLI output formatting.
//!
//! Logging covers the per-file progress; this module prints the summary a
//! user reads once the run is over. Each command has a `format_*` function
//! (returns `Vec<String>`) for testability and a `print_*` wrapper that writes
//! to stdout.
//!
//! ## Build
//!
//! ```text
//! Files
//! 001 custom-card.html (text, 3 markers)
//! 002 index.html (text, 3 markers)
//! 003 pkg/bj_web_bg.wasm (binary)
//!
//! Wrote 3 files to www-out: 1 binary, 2 text, 6 markers replaced
//! ```
//!
//! ## Check
//!
//! ```text
//! Files
//! 001 custom-card.html (text)
//! 002 pkg/bj_web_bg.wasm (binary)
//!
//! 2 files: 1 binary, 1 text
//! ```

use crate::classify::FileKind;
use crate::format::{FileEntry, FormatReport};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Detail in parentheses after a file name.
fn file_detail(kind: FileKind, replacements: Option<usize>) -> String {
    match (kind, replacements) {
        (FileKind::Text, Some(n)) if n > 0 => {
            format!("({}, {})", kind.label(), plural(n, "marker"))
        }
        _ => format!("({})", kind.label()),
    }
}

/// Format the summary of a completed run.
pub fn format_build_output(report: &FormatReport, output_root: &Path) -> Vec<String> {
    let mut lines = vec!["Files".to_string()];
    for (i, file) in report.files.iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            file.relative.display(),
            file_detail(file.kind, Some(file.replacements))
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Wrote {} to {}: {} binary, {} text, {} replaced",
        plural(report.files.len(), "file"),
        output_root.display(),
        report.count(FileKind::Binary),
        report.count(FileKind::Text),
        plural(report.total_replacements(), "marker"),
    ));
    lines
}

/// Format the dry-run listing of the `check` command.
pub fn format_check_output(entries: &[FileEntry], input_root: &Path) -> Vec<String> {
    let mut lines = vec!["Files".to_string()];
    for (i, entry) in entries.iter().enumerate() {
        let relative = entry.input.strip_prefix(input_root).unwrap_or(&entry.input);
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            relative.display(),
            file_detail(entry.kind, None)
        ));
    }
    let binary = entries.iter().filter(|e| e.kind == FileKind::Binary).count();
    lines.push(String::new());
    lines.push(format!(
        "{}: {} binary, {} text",
        plural(entries.len(), "file"),
        binary,
        entries.len() - binary
    ));
    lines
}

/// Print the build summary to stdout.
pub fn print_build_output(report: &FormatReport, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}

/// Print the check listing to stdout.
pub fn print_check_output(entries: &[FileEntry], input_root: &Path) {
    for line in format_check_output(entries, input_root) {
        println!("{}", line);
    }
}
