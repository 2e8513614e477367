//! Writes translated files into the target tree.
//!
//! A file is only touched when its content actually changes, so tools watching
//! the target tree (IDEs, build systems) do not see spurious modifications.
//! Nothing is ever deleted.

use crate::protocol::TranslationResult;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Counts of what happened to each translated entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub overwritten: usize,
    pub unchanged: usize,
    pub created: usize,
    /// Entries with empty text or an identifier escaping the target directory.
    pub skipped: usize,
}

#[derive(Debug)]
pub struct SyncError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to sync {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SyncError + '_ {
    move |source| {
        error!(path = %path.display(), error = %source, "Filesystem operation failed");
        SyncError {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Collapses any run of trailing newlines down to a single one.
pub fn normalize_trailing_newlines(text: &str) -> &str {
    let mut text = text;
    while text.ends_with("\n\n") {
        text = &text[..text.len() - 1];
    }
    text
}

/// Identifiers must stay below the target directory.
fn is_contained(identifier: &str) -> bool {
    Path::new(identifier)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Path of the translated file for `identifier`.
pub fn target_path(target_dir: &Path, identifier: &str, extension: &str) -> PathBuf {
    target_dir.join(format!("{identifier}.{extension}"))
}

/// Writes every entry of `targets` below `target_dir` with `extension`.
pub fn write_targets(
    target_dir: &Path,
    extension: &str,
    targets: &TranslationResult,
) -> Result<SyncReport, SyncError> {
    println!("{} transpiled files received.", targets.len());
    info!(target_dir = %target_dir.display(), files = targets.len(), "Writing translated files");
    let mut report = SyncReport::default();

    for (identifier, text) in targets {
        if text.is_empty() {
            debug!(identifier = %identifier, "Skipping entry with empty text");
            report.skipped += 1;
            continue;
        }
        if !is_contained(identifier) {
            warn!(identifier = %identifier, "Skipping entry outside the target directory");
            report.skipped += 1;
            continue;
        }

        let code = normalize_trailing_newlines(text);
        let path = target_path(target_dir, identifier, extension);

        match fs::read(&path) {
            Ok(existing) if existing == code.as_bytes() => {
                println!("{} -> exists / no change", path.display());
                debug!(path = %path.display(), "Unchanged");
                report.unchanged += 1;
            }
            Ok(_) => {
                fs::write(&path, code).map_err(io_error(&path))?;
                println!("{} -> exists / OVERWRITTEN", path.display());
                debug!(path = %path.display(), "Overwritten");
                report.overwritten += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let mut line = path.display().to_string();
                if let Some(parent) = path.parent().filter(|p| !p.exists()) {
                    fs::create_dir_all(parent).map_err(io_error(parent))?;
                    line.push_str(" -> DIRECTORY CREATED");
                }
                fs::write(&path, code).map_err(io_error(&path))?;
                println!("{line} -> WRITTEN");
                debug!(path = %path.display(), "Created");
                report.created += 1;
            }
            Err(e) => return Err(io_error(&path)(e)),
        }
    }

    println!(
        "overwritten: {}, no change: {}, newly created: {}",
        report.overwritten, report.unchanged, report.created
    );
    info!(?report, "Finished writing translated files");
    Ok(report)
}
