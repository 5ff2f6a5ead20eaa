//! File-backed active document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use notesmith_engine::{EditorContext, TextBuffer};
use notesmith_utils::{
    AtomicWriteOptions, FileSyncPolicy, ParentDirSyncPolicy, PersistMode,
    atomic_write_with_options,
};

/// 1-based inclusive line range from `--lines START:END` (or a single `N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid line number '{}'", part.trim()))
        };
        let (start, end) = match raw.split_once(':') {
            Some((start, end)) => (parse(start)?, parse(end)?),
            None => {
                let line = parse(raw)?;
                (line, line)
            }
        };
        if start == 0 {
            return Err("line numbers start at 1".to_string());
        }
        if start > end {
            return Err(format!("range start {start} is after end {end}"));
        }
        Ok(Self { start, end })
    }
}

/// The document named on the command line, held in memory until saved.
#[derive(Debug)]
pub struct FileDocument {
    path: PathBuf,
    buffer: TextBuffer,
}

impl FileDocument {
    /// Read `path`. A file that does not exist is not an error: it means
    /// there is no active document, and `Ok(None)` is returned.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), bytes = content.len(), "Opened document");
                Ok(Some(Self {
                    path: path.to_path_buf(),
                    buffer: TextBuffer::new(content),
                }))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Document not found");
                Ok(None)
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to read document {}", path.display()))
            }
        }
    }

    pub fn select_lines(&mut self, lines: LineRange) -> Result<()> {
        let span = self
            .buffer
            .line_span(lines.start, lines.end)
            .ok_or_else(|| {
                anyhow!(
                    "{} has no line {} to select",
                    self.path.display(),
                    lines.start
                )
            })?;
        self.buffer.select(span);
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// Write the buffer back atomically, keeping the file's permissions.
    pub fn save(&self) -> Result<()> {
        let options = AtomicWriteOptions {
            file_sync: FileSyncPolicy::SyncAll,
            parent_dir_sync: ParentDirSyncPolicy::SyncBestEffort,
            mode: PersistMode::preserving(&self.path),
        };
        atomic_write_with_options(&self.path, self.buffer.content().as_bytes(), options)
            .with_context(|| format!("failed to write document {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "Saved refined document");
        Ok(())
    }
}

impl EditorContext for FileDocument {
    fn selection(&self) -> &str {
        self.buffer.selection()
    }

    fn content(&self) -> &str {
        self.buffer.content()
    }

    fn replace_content(&mut self, text: &str) {
        self.buffer.replace_content(text);
    }
}
