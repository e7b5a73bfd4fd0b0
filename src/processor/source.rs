//! Input resolution and line reading
//!
//! A source is stdin, a single file, or a directory searched recursively
//! for files matching a glob. Directory sources select all matches, the
//! newest match, or the matches dated after a given day.

use crate::error::{ProcessorError, Result};
use crate::parser::date_from_path;
use chrono::NaiveDate;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;
use walkdir::WalkDir;

/// Which files of a directory source to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSelection {
    /// Every matching file in lexicographic path order
    All,
    /// Only the lexicographically greatest path
    Latest,
    /// Files whose `/yyyy/MM/dd/` path date is strictly after the date
    Since(NaiveDate),
}

/// Where input lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Directory {
        path: PathBuf,
        pattern: String,
        selection: FileSelection,
    },
}

/// A single readable input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Path of a file input
    pub fn path(&self) -> Option<&Path> {
        match self {
            Input::Stdin => None,
            Input::File(path) => Some(path),
        }
    }

    /// Name used in logs and progress messages
    pub fn display_name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

impl Source {
    /// Build a source from an optional CLI path
    ///
    /// No path (or `-`) reads stdin; a directory path is searched with
    /// `pattern`; anything else is read as a single file.
    pub async fn from_path(
        path: Option<PathBuf>,
        pattern: &str,
        selection: FileSelection,
    ) -> Result<Self> {
        let Some(path) = path.filter(|p| p.as_path() != Path::new("-")) else {
            return Ok(Source::Stdin);
        };

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|_| ProcessorError::InputNotFound { path: path.clone() })?;

        if metadata.is_dir() {
            Ok(Source::Directory {
                path,
                pattern: pattern.to_string(),
                selection,
            })
        } else {
            Ok(Source::File(path))
        }
    }

    /// Resolve the source into the ordered list of inputs to read
    pub fn resolve(&self) -> Result<Vec<Input>> {
        match self {
            Source::Stdin => Ok(vec![Input::Stdin]),
            Source::File(path) => {
                if !path.is_file() {
                    return Err(ProcessorError::InputNotFound { path: path.clone() });
                }
                Ok(vec![Input::File(path.clone())])
            }
            Source::Directory {
                path,
                pattern,
                selection,
            } => {
                let matched = find_matching_files(path, pattern)?;
                let selected = select_files(matched, *selection);
                if selected.is_empty() {
                    return Err(ProcessorError::NoMatchingFiles {
                        path: path.clone(),
                        pattern: pattern.clone(),
                    });
                }
                debug!(
                    "Resolved {} file(s) from {} with {:?}",
                    selected.len(),
                    path.display(),
                    selection
                );
                Ok(selected.into_iter().map(Input::File).collect())
            }
        }
    }

    /// Total bytes to read, or `None` when unknowable (stdin)
    pub fn size_estimate(&self) -> Result<Option<u64>> {
        let inputs = self.resolve()?;
        let mut total = 0u64;
        for input in &inputs {
            match input {
                Input::Stdin => return Ok(None),
                Input::File(path) => total += std::fs::metadata(path)?.len(),
            }
        }
        Ok(Some(total))
    }
}

/// Recursively list files under `root` whose name matches `pattern`
pub fn find_matching_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(ProcessorError::InputNotFound {
            path: root.to_path_buf(),
        });
    }

    let pattern = Pattern::new(pattern)?;
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Apply a file selection to a sorted list of paths
pub fn select_files(mut files: Vec<PathBuf>, selection: FileSelection) -> Vec<PathBuf> {
    files.sort();
    match selection {
        FileSelection::All => files,
        FileSelection::Latest => files.pop().into_iter().collect(),
        FileSelection::Since(since) => files
            .into_iter()
            .filter(|path| match date_from_path(path) {
                Some(date) => date > since,
                None => {
                    debug!("Skipping undated file {}", path.display());
                    false
                }
            })
            .collect(),
    }
}

/// Buffered reader yielding raw lines
///
/// Lines are split on `\n` with a trailing `\r` removed. Bytes are handed
/// out untouched so that fixed-width offsets stay exact.
pub struct LineReader {
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    buffer: Vec<u8>,
    bytes_read: u64,
}

impl LineReader {
    /// Open an input with the given read buffer size
    pub async fn open(input: &Input, buffer_size: usize) -> Result<Self> {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = match input {
            Input::Stdin => Box::new(BufReader::with_capacity(buffer_size, io::stdin())),
            Input::File(path) => {
                let file = File::open(path)
                    .await
                    .map_err(|_| ProcessorError::InputNotFound { path: path.clone() })?;
                Box::new(BufReader::with_capacity(buffer_size, file))
            }
        };
        Ok(Self::from_reader(reader))
    }

    /// Wrap an existing async reader
    pub fn from_reader(reader: Box<dyn AsyncBufRead + Unpin + Send>) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(1024),
            bytes_read: 0,
        }
    }

    /// Bytes consumed so far, line terminators included
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Read the next line, or `None` at end of input
    pub async fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.buffer.clear();
        if !self.read_physical_line().await? {
            return Ok(None);
        }
        Ok(Some(trim_line_end(&self.buffer)))
    }

    /// Read the next CSV row, joining physical lines inside quoted fields
    pub async fn next_csv_row(&mut self) -> Result<Option<&[u8]>> {
        self.buffer.clear();
        if !self.read_physical_line().await? {
            return Ok(None);
        }
        while has_open_quote(&self.buffer) {
            if !self.read_physical_line().await? {
                break;
            }
        }
        Ok(Some(trim_line_end(&self.buffer)))
    }

    /// Append one physical line to the buffer
    async fn read_physical_line(&mut self) -> Result<bool> {
        let read = self.reader.read_until(b'\n', &mut self.buffer).await?;
        self.bytes_read += read as u64;
        Ok(read > 0)
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn has_open_quote(row: &[u8]) -> bool {
    row.iter().filter(|&&b| b == b'"').count() % 2 == 1
}
