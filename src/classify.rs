//! Binary/text classification by file extension.
//!
//! Only extensions on the allow-list are copied byte-for-byte. Everything
//! else, including files without an extension, is read as UTF-8 text and run
//! through the substitution table.

use std::collections::BTreeSet;
use std::path::Path;

/// Extensions copied verbatim unless the config says otherwise.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &["wasm", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Binary,
    Text,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Binary => "binary",
            FileKind::Text => "text",
        }
    }
}

/// The binary allow-list.
///
/// Extensions are stored lowercase without a leading dot; lookups ignore
/// ASCII case so `LOGO.PNG` is binary too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExtensions {
    exts: BTreeSet<String>,
}

impl BinaryExtensions {
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts = exts
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { exts }
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.exts.contains(&ext.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }

    pub fn classify(&self, path: &Path) -> FileKind {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if self.contains(ext) => FileKind::Binary,
            _ => FileKind::Text,
        }
    }
}

impl Default for BinaryExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY_EXTENSIONS)
    }
}
