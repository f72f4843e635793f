//! Path handling for the two directory roots.
//!
//! Two jobs live here:
//!
//! - [`resolve_dir`] turns a directory given on the command line (or in the
//!   config file) into an absolute, normalized path. `~` and environment
//!   references are expanded the way a shell would, so `-o $HOME/site` and
//!   `-o ~/site` both work when the argument was quoted.
//! - [`remap`] mirrors a file found under the input root into the output root.
//!
//! ```text
//! input root   /src/www
//! output root  /tmp/www-out
//!
//! /src/www/static/logo.png  →  /tmp/www-out/static/logo.png
//! ```

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("{path} is not inside the input root {root}")]
    OutsideInputRoot { path: PathBuf, root: PathBuf },
    #[error("Cannot resolve current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
}

/// Resolve a directory argument to an absolute path.
///
/// - A leading `~` (alone or followed by `/`) becomes the home directory.
/// - `$VAR` and `${VAR}` are replaced by the variable's value; unset variables
///   are left as written.
/// - Relative paths are joined onto the current directory.
/// - `.` and `..` components are folded lexically; symlinks are not resolved.
pub fn resolve_dir(raw: &str) -> Result<PathBuf, PathError> {
    let expanded = expand_vars(&expand_home(raw));
    let path = Path::new(&expanded);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&absolute))
}

/// Mirror `path` from under `input_root` to the same place under `output_root`.
pub fn remap(path: &Path, input_root: &Path, output_root: &Path) -> Result<PathBuf, PathError> {
    let relative = path
        .strip_prefix(input_root)
        .map_err(|_| PathError::OutsideInputRoot {
            path: path.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;
    Ok(output_root.join(relative))
}

fn expand_home(raw: &str) -> String {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return raw.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => format!("{}{}", home.display(), rest),
        None => raw.to_string(),
    }
}

fn expand_vars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        match std::env::var(name) {
            Ok(value) if !name.is_empty() => out.push_str(&value),
            _ => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_swaps_root_prefix() {
        let out = remap(
            Path::new("/src/www/static/logo.png"),
            Path::new("/src/www"),
            Path::new("/tmp/www-out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/tmp/www-out/static/logo.png"));
    }

    #[test]
    fn remap_rejects_path_outside_root() {
        let err = remap(
            Path::new("/elsewhere/index.html"),
            Path::new("/src/www"),
            Path::new("/tmp/www-out"),
        )
        .unwrap_err();
        assert!(matches!(err, PathError::OutsideInputRoot { .. }));
    }

    #[test]
    fn remap_does_not_match_partial_component() {
        // `/src/www-old` starts with the string `/src/www` but is a sibling
        let err = remap(
            Path::new("/src/www-old/index.html"),
            Path::new("/src/www"),
            Path::new("/tmp/out"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn resolve_dir_makes_relative_absolute() {
        let resolved = resolve_dir("www").unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::env::current_dir().unwrap().join("www"));
    }

    #[test]
    fn resolve_dir_folds_dot_components() {
        let resolved = resolve_dir("/srv/./site/../www").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/www"));
    }

    #[test]
    fn spellings_of_one_directory_resolve_equal() {
        assert_eq!(resolve_dir("./www").unwrap(), resolve_dir("www").unwrap());
        assert_eq!(resolve_dir("www/").unwrap(), resolve_dir("www").unwrap());
    }

    #[test]
    fn resolve_dir_expands_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(resolve_dir("~/www").unwrap(), normalize(&home.join("www")));
    }

    #[test]
    fn tilde_inside_name_is_literal() {
        assert_eq!(expand_home("www~old"), "www~old");
        assert_eq!(expand_home("~user/www"), "~user/www");
    }

    #[test]
    fn expand_vars_plain_and_braced() {
        let Ok(path) = std::env::var("PATH") else {
            return;
        };
        assert_eq!(expand_vars("$PATH/x"), format!("{path}/x"));
        assert_eq!(expand_vars("a${PATH}b"), format!("a{path}b"));
    }

    #[test]
    fn expand_vars_leaves_unset_untouched() {
        let raw = "/srv/$FORMAT_WEB_TEMPLATES_SURELY_UNSET/www";
        assert_eq!(expand_vars(raw), raw);
        assert_eq!(expand_vars("${UNTERMINATED"), "${UNTERMINATED");
        assert_eq!(expand_vars("cost$"), "cost$");
    }
}
