use crate::error::Error;
use ignore::WalkBuilder;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Collect the candidate files for one invocation
///
/// A regular-file target is returned as-is, without applying the filters:
/// naming a file explicitly outranks any filter. A directory target is
/// enumerated either one level deep or to arbitrary depth, and only regular
/// files survive. The result is sorted so files are always processed in the
/// same order.
///
/// # Arguments
/// * `target` - File or directory to collect from
/// * `recursive` - Descend into nested subdirectories of a directory target
/// * `extensions` - Keep only files whose extension is in this set
/// * `name_match` - Keep only files whose base name matches this pattern
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Ordered candidate paths
pub fn collect(
    target: &Path,
    recursive: bool,
    extensions: Option<&HashSet<String>>,
    name_match: Option<&Regex>,
) -> Result<Vec<PathBuf>, Error> {
    if !target.exists() {
        return Err(Error::NotFound {
            path: target.to_path_buf(),
        });
    }

    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    // Plain enumeration: no gitignore handling, no hidden-file filtering
    let walker = WalkBuilder::new(target)
        .standard_filters(false)
        .max_depth(if recursive { None } else { Some(1) })
        .build();

    let mut candidates = Vec::new();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Warning: error walking directory: {}", err);
                continue;
            }
        };

        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if selected(path, extensions, name_match) {
            candidates.push(path.to_path_buf());
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Apply the extension and name filters to a single file path
fn selected(
    path: &Path,
    extensions: Option<&HashSet<String>>,
    name_match: Option<&Regex>,
) -> bool {
    if let Some(set) = extensions {
        let ext = path.extension().and_then(|e| e.to_str());
        if !ext.map_or(false, |e| set.contains(e)) {
            return false;
        }
    }

    if let Some(pattern) = name_match {
        let name = path.file_name().map(|n| n.to_string_lossy());
        if !name.map_or(false, |n| pattern.is_match(&n)) {
            return false;
        }
    }

    true
}
