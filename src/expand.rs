//! Pattern expansion module
//!
//! Resolves literal paths and wildcard patterns (`*` and `?`) into a concrete
//! list of existing regular files. Wildcards only look at direct entries of a
//! single directory; there is no recursion, no character classes and no brace
//! expansion. Problems with individual patterns are reported as warnings and
//! never abort expansion of the remaining patterns.

use std::fs;
use std::path::{Path, PathBuf};

use memchr::memchr2;
use walkdir::WalkDir;

use crate::error::MergeError;
use crate::progress::Reporter;

/// Does `pattern` contain a wildcard metacharacter?
pub fn has_wildcard(pattern: &str) -> bool {
    memchr2(b'*', b'?', pattern.as_bytes()).is_some()
}

/// Wildcard matching with `*` (any run of characters) and `?` (exactly one
/// character), case-sensitive, no escaping.
///
/// Classic two-pointer greedy-star matching: `*` records a backtrack point,
/// and on a mismatch matching resumes one character further into the text.
pub fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let mut t = 0;
    let mut p = 0;
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            t += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            resume = t;
            p += 1;
        } else if let Some(s) = star {
            // Retry the segment after the star, one character further in.
            p = s + 1;
            resume += 1;
            t = resume;
        } else {
            return false;
        }
    }

    // Trailing stars match the empty string.
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }

    p == pattern.len()
}

/// Expand `patterns` into a list of existing regular files, in pattern-input
/// order. Duplicate paths matched by more than one pattern are kept; the
/// merger's line-level dedup absorbs the resulting duplicate lines.
///
/// Returns [`MergeError::NoFilesResolved`] when nothing matched at all.
pub fn expand_patterns(
    patterns: &[String],
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>, MergeError> {
    let mut resolved = Vec::new();

    for pattern in patterns {
        if has_wildcard(pattern) {
            expand_wildcard(pattern, &mut resolved, reporter);
        } else {
            match fs::metadata(pattern) {
                Ok(meta) if meta.is_file() => resolved.push(PathBuf::from(pattern)),
                _ => reporter.warning(&format!(
                    "File not found or not a regular file: {pattern}"
                )),
            }
        }
    }

    if resolved.is_empty() {
        return Err(MergeError::NoFilesResolved);
    }

    Ok(resolved)
}

/// Match one wildcard pattern against the direct entries of its directory
/// part. Matches are appended in file-name order so expansion is
/// deterministic for a given directory state. Ordering is by OS-string byte
/// order, not locale collation.
fn expand_wildcard(pattern: &str, resolved: &mut Vec<PathBuf>, reporter: &dyn Reporter) {
    let path = Path::new(pattern);

    let Some(file_pattern) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        reporter.warning(&format!("Invalid wildcard pattern: {pattern}"));
        return;
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !dir.is_dir() {
        reporter.warning(&format!("Directory not found for pattern: {pattern}"));
        return;
    }

    let before = resolved.len();
    for entry in WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                reporter.warning(&format!("Error processing pattern '{pattern}': {e}"));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if wildcard_match(&name, &file_pattern) {
            resolved.push(entry.into_path());
        }
    }

    if resolved.len() == before {
        log::debug!("pattern '{pattern}' matched no files");
    }
}
