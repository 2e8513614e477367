//! Walks a source tree and folds every file of one language into a single
//! delimited text blob (see [`crate::protocol`]).

use crate::protocol::{push_block, SEPARATOR};
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Base names (without extension) skipped by default. These are the support
/// shims each side ships for the other language.
pub const DEFAULT_IGNORE_LIST: &[&str] = &["swiftSupportInKotlin", "kotlinSupportInSwift"];

/// Result of combining a source tree.
#[derive(Debug, Clone, Default)]
pub struct CombinedSources {
    /// The delimited text sent to the service.
    pub blob: String,
    /// Identifiers written into the blob, in walk order.
    pub included: Vec<String>,
    /// Identifiers that matched the extension but were skipped.
    pub ignored: Vec<String>,
}

impl CombinedSources {
    pub fn count(&self) -> usize {
        self.included.len()
    }
}

#[derive(Debug)]
pub enum CombineError {
    Walk(walkdir::Error),
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineError::Walk(e) => write!(f, "failed to walk source directory: {e}"),
            CombineError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CombineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CombineError::Walk(e) => Some(e),
            CombineError::Read { source, .. } => Some(source),
        }
    }
}

impl From<walkdir::Error> for CombineError {
    fn from(e: walkdir::Error) -> Self {
        CombineError::Walk(e)
    }
}

/// Identifier of `path` relative to `root`: `/`-separated, last segment
/// without its extension.
fn identifier_for(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut segments: Vec<String> = rel
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    segments.push(rel.file_stem()?.to_string_lossy().into_owned());
    Some(segments.join("/"))
}

/// Concatenates every `*.{extension}` file under `root`.
///
/// Files are visited in sorted walk order, following symlinks. Invalid UTF-8
/// is replaced rather than rejected. A file whose stem is in
/// `ignore_list`, or whose identifier would contain the delimiter token, is
/// reported as ignored and left out of the blob.
pub fn combine_files<S: AsRef<str>>(
    root: &Path,
    extension: &str,
    ignore_list: &[S],
) -> Result<CombinedSources, CombineError> {
    info!(root = %root.display(), extension, "Combining source files");
    let mut combined = CombinedSources::default();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            error!(error = %e, "Directory walk failed");
            CombineError::from(e)
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension() != Some(OsStr::new(extension)) {
            continue;
        }
        let Some(identifier) = identifier_for(root, path) else {
            continue;
        };

        let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
        let listed = ignore_list.iter().any(|name| name.as_ref() == stem);
        if listed || identifier.contains(SEPARATOR) {
            println!("{identifier} -> IGNORED");
            debug!(identifier = %identifier, "Ignored source file");
            combined.ignored.push(identifier);
            continue;
        }

        let bytes = fs::read(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "Failed to read source file");
            CombineError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    "Source file is not valid UTF-8, decoding lossily"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        println!("{identifier}");
        debug!(identifier = %identifier, bytes = content.len(), "Read source file");
        push_block(&mut combined.blob, &identifier, &content);
        combined.included.push(identifier);
    }

    println!("{} files read.", combined.count());
    info!(
        included = combined.count(),
        ignored = combined.ignored.len(),
        "Combined source files"
    );
    Ok(combined)
}

/// Outcome of persisting the blob in combine-only mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombinedOutput {
    Written(PathBuf),
    AlreadyExists(PathBuf),
}

/// Writes `blob` to `path` unless a file is already there.
pub fn write_combined_sources(path: &Path, blob: &str) -> io::Result<CombinedOutput> {
    let file = fs::OpenOptions::new().write(true).create_new(true).open(path);
    match file {
        Ok(mut file) => {
            file.write_all(blob.as_bytes())?;
            println!("Combined sources written to '{}'.", path.display());
            info!(path = %path.display(), bytes = blob.len(), "Combined sources written");
            Ok(CombinedOutput::Written(path.to_path_buf()))
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            println!("Could not write combined sources to file. File already exists.");
            info!(path = %path.display(), "Combined output exists, leaving it untouched");
            Ok(CombinedOutput::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to create combined output");
            Err(e)
        }
    }
}
