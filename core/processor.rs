use crate::CoreError;
use crate::dispatcher::{FormatTable, SourceDocument};
use crate::file_finder::find_files;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Suffix not in the table; the file was never opened.
    Skipped,
    Unchanged,
    Stripped,
}

#[derive(Debug)]
pub struct ProcessedFileResult {
    pub path: PathBuf,
    pub outcome: Result<FileOutcome, CoreError>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<ProcessedFileResult>,
    pub walk_errors: Vec<CoreError>,
}

impl RunSummary {
    pub fn stripped(&self) -> impl Iterator<Item = &Path> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Ok(FileOutcome::Stripped)))
            .map(|r| r.path.as_path())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CoreError> {
        self.walk_errors
            .iter()
            .chain(self.results.iter().filter_map(|r| r.outcome.as_ref().err()))
    }
}

fn process_single_file(path: &Path, table: &FormatTable) -> Result<FileOutcome, CoreError> {
    let format = table.format_for(path);
    if !format.is_recognized() {
        return Ok(FileOutcome::Skipped);
    }

    let read_err = |source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    };
    let write_err = |source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let permissions = fs::metadata(path).map_err(read_err)?.permissions();
    let document = SourceDocument::new(format, fs::read(path).map_err(read_err)?);
    let stripped = document.strip().map_err(|source| CoreError::Strip {
        path: path.to_path_buf(),
        source,
    })?;

    if !document.is_changed_by(&stripped) {
        tracing::trace!(path = %path.display(), %format, "no comments found");
        return Ok(FileOutcome::Unchanged);
    }

    fs::write(path, &stripped).map_err(write_err)?;
    fs::set_permissions(path, permissions).map_err(write_err)?;
    tracing::debug!(
        path = %path.display(),
        %format,
        removed = document.content.len().saturating_sub(stripped.len()),
        "rewrote file"
    );
    Ok(FileOutcome::Stripped)
}

/// Strips every file in `files`. Files are independent, so they are handled
/// in parallel; results come back in input order.
pub fn process_files(files: &[PathBuf], table: &FormatTable) -> Vec<ProcessedFileResult> {
    files
        .par_iter()
        .map(|p| ProcessedFileResult {
            path: p.clone(),
            outcome: process_single_file(p, table),
        })
        .collect()
}

/// Walks each root and strips every file found under it.
///
/// A root that cannot be walked is recorded and skipped; the others still
/// run. A file reachable from several roots is processed once.
pub fn process_paths(roots: &[PathBuf], table: &FormatTable) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut files = Vec::new();

    for root in roots {
        match find_files(root) {
            Ok(found) => {
                files.extend(found.files);
                summary.walk_errors.extend(found.errors);
            }
            Err(err) => {
                tracing::debug!("skipping root {}: {}", root.display(), err);
                summary.walk_errors.push(err);
            }
        }
    }

    summary.results = process_files(&unique_files(files), table);
    summary
}

/// Sorts `files` and keeps one path per file on disk.
///
/// Paths are compared by their canonical form, so `dir/a.css` and
/// `dir/sub/../a.css` collapse into one entry. A path that cannot be
/// canonicalized is compared as written.
fn unique_files(mut files: Vec<PathBuf>) -> Vec<PathBuf> {
    files.sort();
    let mut seen = HashSet::with_capacity(files.len());
    files.retain(|path| seen.insert(fs::canonicalize(path).unwrap_or_else(|_| path.clone())));
    files
}
