use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can terminate an invocation.
///
/// Every variant is fatal for the current run: there is no retry and no
/// skip-and-continue, since a partially processed tree could leave the
/// backup directory and the targets inconsistent with each other.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    Validation(#[from] ValidationError),

    #[error("target path not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create backup directory {}: {}", .path.display(), .source)]
    BackupInit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write backup {}: {}", .path.display(), .source)]
    BackupWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Problems with the command line itself, detected before anything is
/// touched on disk.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("empty FROM text is not allowed")]
    EmptyFrom,

    #[error("--file was given but {} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("--dir was given but {} is not a directory", .0.display())]
    NotADir(PathBuf),

    #[error("invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),
}
