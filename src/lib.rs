//! # format-web-templates
//!
//! Turns a templated static site tree into a deployable one. The tree is
//! copied as-is except for three HTML comment markers in text files, which
//! are replaced with shared content:
//!
//! ```text
//! <!-- BJ_TMPL_NAV_BAR -->   →  the site navigation bar
//! <!-- BJ_TMPL_VERSION -->   →  "2024-01-01 (abc1234)", from git
//! <!-- GOOGLE_SHIT -->       →  analytics/ads script tags
//! ```
//!
//! # Pipeline
//!
//! A single sequential pass, no caching and no incremental builds:
//!
//! ```text
//! 1. Resolve   -i/-o, format-web.toml  →  absolute roots, version string
//! 2. Walk      www/                     →  every regular file, sorted
//! 3. Classify  extension                →  binary or text
//! 4. Write     binary: byte copy, text: marker substitution  →  www-out/
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Input root validation and recursive file walk |
//! | [`paths`] | `~`/`$VAR` expansion of directory arguments, input → output path remapping |
//! | [`classify`] | Binary extension allow-list |
//! | [`substitute`] | Marker table and the replacement pass |
//! | [`version`] | `"<date> (<hash>)"` from git |
//! | [`format`] | The copy/substitute engine tying it together |
//! | [`config`] | Optional `format-web.toml` loading and validation |
//! | [`output`] | CLI summary formatting |
//!
//! # Design Decisions
//!
//! ## Version Resolved Once, Passed Explicitly
//!
//! The version string is computed by the binary at startup and stored in the
//! [`substitute::Substitutions`] table. Nothing in the library holds global
//! state, so tests pass a fixed version and never need a git checkout.
//!
//! ## Extension-Only Classification
//!
//! Whether a file is binary is decided by its extension alone, never by
//! sniffing content. A text file that turns out not to be UTF-8 stops the run
//! with an error naming the file, which is the cue to add its extension to
//! `files.binary_extensions`.
//!
//! ## Validate Before Writing
//!
//! A missing input directory, or an output directory that is the input or
//! nested with it, is reported before the output directory is created or
//! touched.

pub mod classify;
pub mod config;
pub mod format;
pub mod output;
pub mod paths;
pub mod scan;
pub mod substitute;
pub mod version;

#[cfg(test)]
pub(crate) mod test_helpers;
