use crate::backup::BackupSession;
use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one candidate file
#[derive(Debug)]
pub struct ReplaceOutcome {
    /// The candidate that was processed
    pub path: PathBuf,
    /// Where the substituted content ended up
    pub output_path: PathBuf,
    /// Size of the content before substitution
    pub bytes_original: u64,
    /// Size of the content after substitution
    pub bytes_replaced: u64,
    /// Whether the substitution changed anything
    pub changed: bool,
}

/// Apply the literal substitution to one file
///
/// The whole file is read as text; source-sized files fit in memory and a
/// decode failure on binary content is surfaced as a read error, never
/// skipped. Every occurrence of `from` is replaced left to right.
///
/// In overwrite mode the original bytes are preserved in the backup session
/// first, and only then is the file rewritten in place; a failed backup
/// aborts before the original is touched. Otherwise the result is written
/// to a `.replaced` sibling name in the current working directory and the
/// original is never modified.
///
/// # Arguments
/// * `path` - Candidate file to process
/// * `from` - Text to search for (literal, non-empty)
/// * `to` - Text to substitute
/// * `overwrite` - Rewrite in place instead of writing a copy
/// * `session` - Backup session guarding the in-place rewrite
///
/// # Returns
/// * `Result<ReplaceOutcome>` - What was written where
pub fn replace_in_file(
    path: &Path,
    from: &str,
    to: &str,
    overwrite: bool,
    session: &mut BackupSession,
) -> Result<ReplaceOutcome, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let replaced = content.replace(from, to);
    let changed = replaced != content;

    let output_path = if overwrite {
        // Backup before overwrite, always. The original is only rewritten
        // once its pre-change bytes are safely on disk.
        session.preserve(path, content.as_bytes())?;
        fs::write(path, &replaced).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        path.to_path_buf()
    } else {
        let derived = derived_path(path);
        fs::write(&derived, &replaced).map_err(|source| Error::Write {
            path: derived.clone(),
            source,
        })?;
        derived
    };

    Ok(ReplaceOutcome {
        path: path.to_path_buf(),
        output_path,
        bytes_original: content.len() as u64,
        bytes_replaced: replaced.len() as u64,
        changed,
    })
}

/// Output name for copy mode: `.replaced` slotted in before the extension
///
/// The path is relative, so the copy lands in the current working
/// directory under the original's base name.
fn derived_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str());
    match ext {
        Some(ext) => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            PathBuf::from(format!("{}.replaced.{}", stem, ext))
        }
        None => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            PathBuf::from(format!("{}.replaced", name))
        }
    }
}
