//! Size-capped rolling file for span output.
//!
//! Before each write the current file size is checked. Once it has reached
//! the limit, the file is renamed to `<name>.<timestamp>` and a fresh file is
//! started. Backups beyond the retention count are removed, oldest first.
//! Timestamps use a sortable `chrono` format, so file names order backups.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rollover threshold (5 MiB).
const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Backups retained after rollover.
const MAX_BACKUP_FILES: usize = 2;

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6f";

/// Append-only line writer with size-based rollover.
///
/// The handle is opened lazily on the first write, so construction never
/// fails. Writes are serialized through an internal mutex.
pub struct RollingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    handle: Mutex<Option<File>>,
}

impl RollingFile {
    /// A rolling file at `path` with the default 5 MiB / 2 backups policy.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rollover, opening or writing
    /// fails, or an `Other` error if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("sink lock poisoned: {e}")))?;

        if self.needs_rollover() {
            *handle = None;
            self.roll_over()?;
        }

        let file = match handle.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
        };
        let file = handle.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rollover(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() >= self.max_bytes)
    }

    fn roll_over(&self) -> io::Result<()> {
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        fs::rename(&self.path, PathBuf::from(backup))?;
        self.prune_backups()
    }

    /// Backup files of this sink, oldest first.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory cannot be listed.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let Some(file_name) = self.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(vec![]);
        };
        let prefix = format!("{file_name}.");
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort();
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let excess = backups.len().saturating_sub(self.max_backups);
        for old in &backups[..excess] {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RollingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RollingFile::new(dir.path().join("spans.jsonl"));

        sink.write_line("{\"a\":1}").unwrap();
        sink.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert!(sink.backups().unwrap().is_empty());
    }

    #[test]
    fn full_file_rolls_over() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RollingFile::with_limits(dir.path().join("spans.jsonl"), 16, 2);

        sink.write_line("0123456789abcdef").unwrap();
        sink.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "next\n");
        let backups = sink.backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "0123456789abcdef\n");
    }

    #[test]
    fn old_backups_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RollingFile::with_limits(dir.path().join("spans.jsonl"), 1, 2);

        for n in 0..6 {
            sink.write_line(&format!("line {n}")).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let backups = sink.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(fs::read_to_string(&backups[1]).unwrap(), "line 4\n");
        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "line 5\n");
    }

    #[test]
    fn unrelated_files_are_not_backups() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other.jsonl.1"), "x").unwrap();
        fs::write(dir.path().join("spans.jsonl-old"), "x").unwrap();
        let sink = RollingFile::new(dir.path().join("spans.jsonl"));

        assert!(sink.backups().unwrap().is_empty());
    }
}
