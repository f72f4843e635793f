//! The copy/substitute pass.
//!
//! Walks the input root and writes a mirror of it under the output root:
//!
//! ```text
//! www/                              www-out/
//! ├── index.html      substituted → ├── index.html
//! ├── static/                       ├── static/
//! │   ├── logo.png    copied      → │   ├── logo.png
//! │   └── style.css   substituted → │   └── style.css
//! └── pkg/                          └── pkg/
//!     └── app.wasm    copied      →     └── app.wasm
//! ```
//!
//! ## Guarantees
//!
//! - The input root is validated before anything is created or written.
//! - The output root is neither the input root nor nested with it in either
//!   direction.
//! - Output relative paths equal input relative paths, one to one.
//! - Binary files are streamed through unchanged.
//! - Files already in the output directory that have no input counterpart
//!   are left alone; there is no cleaning step.
//! - The first I/O failure aborts the run. Files written before it stay.

use crate::classify::{BinaryExtensions, FileKind};
use crate::config::SiteConfig;
use crate::paths::{self, PathError};
use crate::scan::{self, ScanError};
use crate::substitute::Substitutions;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Text file is not valid UTF-8: {0}")]
    NotUtf8(PathBuf),
    #[error("Output directory must differ from the input directory: {0}")]
    SameDirectory(PathBuf),
    #[error("Output directory {output} and input directory {input} must not be nested")]
    NestedDirectory { input: PathBuf, output: PathBuf },
}

impl FormatError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Everything a run needs besides the two roots.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub substitutions: Substitutions,
    pub binary_extensions: BinaryExtensions,
}

impl FormatOptions {
    /// Build options from config values and the version resolved at startup.
    pub fn from_site_config(config: &SiteConfig, version: impl Into<String>) -> Self {
        Self {
            substitutions: Substitutions::new(version, config.substitutions.analytics),
            binary_extensions: config.files.binary_extensions(),
        }
    }
}

/// One input file and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: FileKind,
}

/// What was written for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Path relative to both roots.
    pub relative: PathBuf,
    pub kind: FileKind,
    pub bytes: u64,
    /// Marker occurrences replaced; always 0 for binary files.
    pub replacements: usize,
}

/// Result of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub files: Vec<FileOutcome>,
}

impl FormatReport {
    pub fn count(&self, kind: FileKind) -> usize {
        self.files.iter().filter(|f| f.kind == kind).count()
    }

    pub fn total_replacements(&self) -> usize {
        self.files.iter().map(|f| f.replacements).sum()
    }
}

/// Check both roots before any filesystem mutation.
fn validate_roots(input_root: &Path, output_root: &Path) -> Result<(), FormatError> {
    scan::validate_input_root(input_root)?;
    if input_root == output_root {
        return Err(FormatError::SameDirectory(output_root.to_path_buf()));
    }
    // the walk must never reach its own output
    if output_root.starts_with(input_root) || input_root.starts_with(output_root) {
        return Err(FormatError::NestedDirectory {
            input: input_root.to_path_buf(),
            output: output_root.to_path_buf(),
        });
    }
    Ok(())
}

/// List and classify every input file without writing anything.
pub fn plan_tree(
    input_root: &Path,
    output_root: &Path,
    binary_extensions: &BinaryExtensions,
) -> Result<Vec<FileEntry>, FormatError> {
    validate_roots(input_root, output_root)?;
    let mut entries = Vec::new();
    for input in scan::walk_files(input_root)? {
        let input = input?;
        let output = paths::remap(&input, input_root, output_root)?;
        let kind = binary_extensions.classify(&input);
        entries.push(FileEntry {
            input,
            output,
            kind,
        });
    }
    Ok(entries)
}

/// Mirror `input_root` into `output_root`, substituting markers in text files.
pub fn format_tree(
    input_root: &Path,
    output_root: &Path,
    options: &FormatOptions,
) -> Result<FormatReport, FormatError> {
    validate_roots(input_root, output_root)?;
    if output_root.is_dir() {
        log::warn!(
            "{} exists. Files inside will be overwritten",
            output_root.display()
        );
    }

    let mut report = FormatReport::default();
    for input in scan::walk_files(input_root)? {
        let input = input?;
        let entry = FileEntry {
            output: paths::remap(&input, input_root, output_root)?,
            kind: options.binary_extensions.classify(&input),
            input,
        };
        let (bytes, replacements) = format_file(&entry, &options.substitutions)?;
        report.files.push(FileOutcome {
            relative: entry
                .input
                .strip_prefix(input_root)
                .unwrap_or(&entry.input)
                .to_path_buf(),
            kind: entry.kind,
            bytes,
            replacements,
        });
    }
    Ok(report)
}

/// Write one entry to its output path.
///
/// Returns the number of bytes written and of markers replaced.
pub fn format_file(
    entry: &FileEntry,
    substitutions: &Substitutions,
) -> Result<(u64, usize), FormatError> {
    if let Some(dir) = entry.output.parent() {
        log::debug!("Making sure {} exists", dir.display());
        fs::create_dir_all(dir).map_err(FormatError::io(dir))?;
    }

    match entry.kind {
        FileKind::Binary => {
            log::info!("Considering {} a binary file", entry.input.display());
            Ok((copy_binary(&entry.input, &entry.output)?, 0))
        }
        FileKind::Text => {
            log::info!("Considering {} a text file", entry.input.display());
            substitute_text(&entry.input, &entry.output, substitutions)
        }
    }
}

fn copy_binary(input: &Path, output: &Path) -> Result<u64, FormatError> {
    let mut reader = File::open(input)
        .map(BufReader::new)
        .map_err(FormatError::io(input))?;
    let mut writer = File::create(output)
        .map(BufWriter::new)
        .map_err(FormatError::io(output))?;
    let bytes = io::copy(&mut reader, &mut writer).map_err(FormatError::io(output))?;
    writer.flush().map_err(FormatError::io(output))?;
    Ok(bytes)
}

fn substitute_text(
    input: &Path,
    output: &Path,
    substitutions: &Substitutions,
) -> Result<(u64, usize), FormatError> {
    let raw = fs::read(input).map_err(FormatError::io(input))?;
    let text = String::from_utf8(raw).map_err(|_| FormatError::NotUtf8(input.to_path_buf()))?;
    let substituted = substitutions.apply(&text);
    fs::write(output, &substituted.text).map_err(FormatError::io(output))?;
    Ok((substituted.text.len() as u64, substituted.replacements))
}
