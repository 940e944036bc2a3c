//! Append-only line writer with size-based rotation.
//!
//! When a write would push the file past its size limit, the file is shifted
//! to `<name>.1`, existing backups move up by one (`.1` → `.2` and so on) and
//! the oldest beyond the retention count is dropped.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size limit before rotation (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of numbered backups kept.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Thread-safe rotating file writer. The file is opened lazily on first write.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `n`th backup, e.g. `bookdesk-otlp.jsonl.2`.
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline, rotating first if it would not fit.
    ///
    /// A single line larger than the limit is still written, to a fresh file.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error if
    /// the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("mutex poisoned: {e}")))?;

        let incoming = line.len() as u64 + 1;
        let current = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if current > 0 && current + incoming > self.max_bytes {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            *guard = Some(file);
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file unavailable"))?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn writes_lines_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("trace.jsonl"));
        assert!(!writer.path().exists());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(read(writer.path()), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("trace.jsonl"), 16, 3);

        for line in ["first-line", "second-line", "third-line"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(read(writer.path()), "third-line\n");
        assert_eq!(read(&writer.backup_path(1)), "second-line\n");
        assert_eq!(read(&writer.backup_path(2)), "first-line\n");
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn drops_backups_beyond_retention() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("trace.jsonl"), 8, 2);

        for n in 0..5 {
            writer.write_line(&format!("line-{n}")).unwrap();
        }

        assert_eq!(read(writer.path()), "line-4\n");
        assert_eq!(read(&writer.backup_path(1)), "line-3\n");
        assert_eq!(read(&writer.backup_path(2)), "line-2\n");
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn oversized_line_goes_to_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("trace.jsonl"), 4, 1);

        writer.write_line("a").unwrap();
        writer.write_line("much-too-long").unwrap();

        assert_eq!(read(writer.path()), "much-too-long\n");
        assert_eq!(read(&writer.backup_path(1)), "a\n");
    }
}
