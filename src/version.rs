//! Build version string from git history.
//!
//! The string shown on the site is `"<commit date> (<short hash>)"`, e.g.
//! `2024-01-01 (abc1234)`. It is resolved once by the binary at startup and
//! handed to [`Substitutions::new`](crate::substitute::Substitutions::new).
//!
//! A missing `git`, or a directory outside any repository, never fails the
//! run: the version degrades to an empty string and a warning is logged.

use std::path::Path;
use std::process::Command;

/// Resolve the version string for the repository containing `dir`.
pub fn resolve_version(dir: &Path) -> String {
    let Some(hash) = git_output(dir, &["rev-parse", "--short", "HEAD"]) else {
        log::warn!(
            "cannot resolve git revision in {}; version string will be empty",
            dir.display()
        );
        return String::new();
    };
    let date = git_output(
        dir,
        &["show", "-s", "--format=%cd", "--date=format:%Y-%m-%d", hash.as_str()],
    )
    .unwrap_or_default();
    let version = format_version(&date, &hash);
    log::debug!("resolved version string `{version}`");
    version
}

/// Combine a commit date and short hash into the display form.
///
/// An empty date leaves just `"(<hash>)"`; an empty hash gives an empty string.
pub fn format_version(date: &str, hash: &str) -> String {
    let (date, hash) = (date.trim(), hash.trim());
    match (date.is_empty(), hash.is_empty()) {
        (_, true) => String::new(),
        (true, false) => format!("({hash})"),
        (false, false) => format!("{date} ({hash})"),
    }
}

/// Run git in `dir` and return trimmed stdout, or `None` on any failure.
fn git_output(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() { None } else { Some(stdout) }
}
