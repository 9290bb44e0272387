use crate::error::{Error, ValidationError};
use clap::{ArgAction, Parser};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;

/// Which kind of filesystem entry the user promised the target to be
#[derive(Debug, Clone, Copy, PartialEq)]
enum TargetKind {
    File,
    Dir,
}

/// Command line arguments parser
///
/// Two invocation styles are accepted and feed the same configuration:
/// the positional form `srcsub TARGET FROM TO` and the flagged form
/// `srcsub --file PATH -f FROM -t TO`. Free arguments fill whichever of
/// target/from/to was not supplied by flag.
#[derive(Parser, Debug)]
#[command(version, about = "Replace text across a source tree, backing up every file before an in-place rewrite")]
#[command(name = "srcsub")]
pub struct Args {
    /// TARGET FROM TO, for the positional invocation style
    #[arg(value_name = "ARG")]
    pub free: Vec<String>,

    /// Target is a single file
    #[arg(long = "file", value_name = "PATH", conflicts_with = "dir")]
    pub file: Option<PathBuf>,

    /// Target is a directory
    #[arg(long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Text to search for
    #[arg(short = 'f', long = "from", value_name = "TEXT")]
    pub from: Option<String>,

    /// Text to replace it with
    #[arg(short = 't', long = "to", value_name = "TEXT")]
    pub to: Option<String>,

    /// Descend into subdirectories of a directory target
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Rewrite files in place instead of writing .replaced copies
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Only process files with one of these extensions (repeatable, or dot-joined: -e cc.h)
    #[arg(short = 'e', long = "extension", value_name = "EXT", action = ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Only process files whose name matches this pattern
    #[arg(short = 'm', long = "match", value_name = "REGEX")]
    pub name_match: Option<String>,

    /// Enable verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Validated, immutable configuration for one invocation
///
/// Built once from the raw arguments; the scanner and the replace engine
/// consume this and never look at argv themselves.
#[derive(Debug)]
pub struct Config {
    pub target: PathBuf,
    pub from: String,
    pub to: String,
    pub recursive: bool,
    pub overwrite: bool,
    pub extensions: Option<HashSet<String>>,
    pub name_match: Option<Regex>,
    pub verbose: bool,
}

/// Parse command line arguments and validate them
///
/// # Returns
/// * `Result<Config>` - Parsed and validated configuration
pub fn parse() -> Result<Config, Error> {
    Args::parse().into_config()
}

impl Args {
    /// Resolve both invocation styles into a validated configuration
    ///
    /// # Returns
    /// * `Result<Config>` - Ok if the arguments form a runnable invocation
    pub fn into_config(self) -> Result<Config, Error> {
        let mut free = self.free.into_iter();

        // A --file/--dir flag claims the target slot; free arguments fill
        // the remaining slots in order.
        let (target, kind) = if let Some(path) = self.file {
            (Some(path), Some(TargetKind::File))
        } else if let Some(path) = self.dir {
            (Some(path), Some(TargetKind::Dir))
        } else {
            (free.next().map(PathBuf::from), None)
        };

        let from = self.from.or_else(|| free.next());
        let to = self.to.or_else(|| free.next());

        for extra in free {
            eprintln!("Warning: ignoring extra argument: {}", extra);
        }

        let target = target.ok_or(ValidationError::MissingArgument("target path"))?;
        let from = from.ok_or(ValidationError::MissingArgument("FROM text"))?;
        let to = to.ok_or(ValidationError::MissingArgument("TO text"))?;

        if from.is_empty() {
            return Err(ValidationError::EmptyFrom.into());
        }

        if !target.exists() {
            return Err(Error::NotFound { path: target });
        }

        match kind {
            Some(TargetKind::File) if !target.is_file() => {
                return Err(ValidationError::NotAFile(target).into());
            }
            Some(TargetKind::Dir) if !target.is_dir() => {
                return Err(ValidationError::NotADir(target).into());
            }
            _ => {}
        }

        // Each -e value may itself be a dot-joined list of extensions
        let extensions: HashSet<String> = self
            .extensions
            .iter()
            .flat_map(|value| value.split('.'))
            .filter(|ext| !ext.is_empty())
            .map(str::to_string)
            .collect();
        let extensions = if extensions.is_empty() { None } else { Some(extensions) };

        let name_match = match self.name_match {
            Some(pattern) => Some(Regex::new(&pattern).map_err(ValidationError::from)?),
            None => None,
        };

        Ok(Config {
            target,
            from,
            to,
            recursive: self.recursive,
            overwrite: self.overwrite,
            extensions,
            name_match,
            verbose: self.verbose,
        })
    }
}
