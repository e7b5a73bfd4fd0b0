//! Update file discovery for snapshot runs
//!
//! Update feeds arrive as dated directories of product 101 files and,
//! optionally, product 100 files:
//! ```text
//! updates/
//!   2024/01/08/prod101_3412_all_opt.txt
//!   2024/01/09/prod101_3413_all_opt.txt
//! gazette/
//!   2024/01/09/prod100_3413_all_opt.txt
//!   2024/01/10/prod100_3414_all_opt.txt
//! ```
//! Product 101 files are preferred. A product 100 file is only used when no
//! product 101 file exists for the same run (`NNNN_all_opt.txt`).

use super::source::{FileSelection, find_matching_files, select_files};
use crate::constants::{FIXED_WIDTH_PATTERN, UPDATE_FILE_SUFFIX};
use crate::error::Result;
use crate::models::Product;
use crate::parser::date_from_path;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static RUN_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\d{{4}}){}$", regex::escape(UPDATE_FILE_SUFFIX)))
        .expect("valid update file pattern")
});

/// A transaction file to replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFile {
    pub path: PathBuf,
    pub product: Product,
    /// Date from the `/yyyy/MM/dd/` path segments
    pub date: Option<NaiveDate>,
    /// Four digit run number from the file name
    pub run: Option<String>,
}

impl UpdateFile {
    pub fn new(path: PathBuf, product: Product) -> Self {
        Self {
            date: date_from_path(&path),
            run: run_key(&path),
            path,
            product,
        }
    }
}

/// Where to look for update files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSources {
    /// Directory of product 101 files
    pub data_updates: Option<PathBuf>,
    /// Directory of product 100 files, used to fill gaps
    pub gazette_updates: Option<PathBuf>,
}

impl UpdateSources {
    pub fn is_empty(&self) -> bool {
        self.data_updates.is_none() && self.gazette_updates.is_none()
    }
}

/// Four digit run number of an update file name
pub fn run_key(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    RUN_KEY
        .captures(&name)
        .map(|captures| captures[1].to_string())
}

fn list(dir: &Path, product: Product, since: Option<NaiveDate>) -> Result<Vec<UpdateFile>> {
    let files = find_matching_files(dir, FIXED_WIDTH_PATTERN)?;
    let selection = since.map_or(FileSelection::All, FileSelection::Since);
    Ok(select_files(files, selection)
        .into_iter()
        .map(|path| UpdateFile::new(path, product))
        .collect())
}

/// Discover update files in replay order
///
/// Only files dated strictly after `since` are returned. The result is
/// ordered by path date, then run number, then path.
pub fn discover_update_files(
    sources: &UpdateSources,
    since: Option<NaiveDate>,
) -> Result<Vec<UpdateFile>> {
    let mut files = match &sources.data_updates {
        Some(dir) => list(dir, Product::Prod101, since)?,
        None => Vec::new(),
    };

    if let Some(dir) = &sources.gazette_updates {
        let covered: HashSet<String> = files.iter().filter_map(|file| file.run.clone()).collect();
        let gazette = list(dir, Product::Prod100, since)?;
        let before = files.len();
        files.extend(
            gazette
                .into_iter()
                .filter(|file| file.run.as_ref().is_some_and(|run| !covered.contains(run))),
        );
        debug!(
            "Added {} product 100 file(s) for runs missing from product 101",
            files.len() - before
        );
    }

    files.sort_by(|a, b| {
        (a.date, &a.run, &a.path).cmp(&(b.date, &b.run, &b.path))
    });

    debug!("Discovered {} update file(s) after {:?}", files.len(), since);
    Ok(files)
}
