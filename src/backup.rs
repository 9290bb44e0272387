use crate::error::Error;
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Backup directory for one invocation
///
/// Owns `<base>/<session-stamp>` for its whole lifetime and is the only
/// writer to it. The directory is created lazily on the first `preserve`
/// call, so a run that never rewrites anything in place leaves no backup
/// directory behind. One value is created per run and passed by mutable
/// reference into the replace engine; sessions are never shared or global,
/// so several can coexist in one process.
#[derive(Debug)]
pub struct BackupSession {
    root: PathBuf,
    created: bool,
    used_names: HashSet<String>,
}

impl BackupSession {
    /// Create a session rooted at `_backup/<stamp>` under the working directory
    pub fn new() -> Self {
        Self::rooted(Path::new("_backup"))
    }

    /// Create a session under an explicit base directory
    ///
    /// # Arguments
    /// * `base` - Directory under which the timestamped session root is placed
    pub fn rooted(base: &Path) -> Self {
        let stamp = Local::now().format("%Y%m%d_%H:%M.%S").to_string();
        Self {
            root: base.join(stamp),
            created: false,
            used_names: HashSet::new(),
        }
    }

    /// The session's backup directory (may not exist yet)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a file's pre-change bytes into the session directory
    ///
    /// Must be called before the corresponding destructive write. Backups
    /// are keyed by the original's base name; when two distinct originals
    /// share a base name within one session, later entries get a numeric
    /// suffix instead of overwriting the earlier one.
    ///
    /// # Arguments
    /// * `path` - The original file the content belongs to
    /// * `content` - The original's pre-change bytes
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the backup entry that was written
    pub fn preserve(&mut self, path: &Path, content: &[u8]) -> Result<PathBuf, Error> {
        if !self.created {
            fs::create_dir_all(&self.root).map_err(|source| Error::BackupInit {
                path: self.root.clone(),
                source,
            })?;
            self.created = true;
        }

        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let entry_name = self.claim_name(base_name);
        let entry_path = self.root.join(&entry_name);

        fs::write(&entry_path, content).map_err(|source| Error::BackupWrite {
            path: entry_path.clone(),
            source,
        })?;

        Ok(entry_path)
    }

    /// Pick an unused entry name for this base name within the session
    fn claim_name(&mut self, base_name: String) -> String {
        let mut candidate = base_name.clone();
        let mut counter = 1;
        while self.used_names.contains(&candidate) {
            candidate = format!("{}.{}", base_name, counter);
            counter += 1;
        }
        self.used_names.insert(candidate.clone());
        candidate
    }
}

impl Default for BackupSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_lazy_until_first_preserve() {
        let base = tempfile::tempdir().unwrap();
        let mut session = BackupSession::rooted(base.path());
        assert!(!session.root().exists());

        session
            .preserve(Path::new("src/main.cc"), b"original")
            .unwrap();
        assert!(session.root().exists());
    }

    #[test]
    fn preserve_writes_original_bytes_under_base_name() {
        let base = tempfile::tempdir().unwrap();
        let mut session = BackupSession::rooted(base.path());

        let entry = session
            .preserve(Path::new("deep/nested/lexer.cc"), b"int main() {}")
            .unwrap();

        assert_eq!(entry.file_name().unwrap(), "lexer.cc");
        assert_eq!(entry.parent().unwrap(), session.root());
        assert_eq!(fs::read(&entry).unwrap(), b"int main() {}");
    }

    #[test]
    fn same_base_name_gets_distinct_entries() {
        let base = tempfile::tempdir().unwrap();
        let mut session = BackupSession::rooted(base.path());

        let first = session
            .preserve(Path::new("a/util.h"), b"first")
            .unwrap();
        let second = session
            .preserve(Path::new("b/util.h"), b"second")
            .unwrap();
        let third = session
            .preserve(Path::new("c/util.h"), b"third")
            .unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(fs::read(&first).unwrap(), b"first");
        assert_eq!(fs::read(&second).unwrap(), b"second");
        assert_eq!(fs::read(&third).unwrap(), b"third");
    }

    #[test]
    fn sessions_with_distinct_bases_do_not_collide() {
        let base_a = tempfile::tempdir().unwrap();
        let base_b = tempfile::tempdir().unwrap();
        let mut session_a = BackupSession::rooted(base_a.path());
        let mut session_b = BackupSession::rooted(base_b.path());

        let entry_a = session_a.preserve(Path::new("x.txt"), b"a").unwrap();
        let entry_b = session_b.preserve(Path::new("x.txt"), b"b").unwrap();

        assert_eq!(fs::read(entry_a).unwrap(), b"a");
        assert_eq!(fs::read(entry_b).unwrap(), b"b");
    }

    #[test]
    fn unwritable_base_is_a_fatal_init_error() {
        // A regular file where the base directory should be makes the lazy
        // mkdir fail, exercising the init error path.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let err = BackupSession::rooted(&blocker)
            .preserve(Path::new("x.txt"), b"x")
            .unwrap_err();
        assert!(matches!(err, Error::BackupInit { .. }));
    }
}
