//! High-level run: combine → (transpile → write back).
//!
//! # Modes
//! - [`Mode::CombineOnly`]: the combined blob is written to the configured
//!   output file and nothing is sent. An existing output file is left alone
//!   and reported, not treated as an error.
//! - [`Mode::RoundTrip`]: the blob is sent through a [`Transpiler`] and the
//!   translations are synced into the target directory.
//!
//! # Error Handling
//! Fail-fast: the first failing stage ends the run with its error wrapped in
//! context. Nothing is retried and nothing partial is persisted when the
//! service call fails.

use crate::combine::{combine_files, write_combined_sources, CombinedOutput};
use crate::config::Config;
use crate::contract::Transpiler;
use crate::language::Language;
use crate::stopwatch::Stopwatch;
use crate::sync::{write_targets, SyncReport};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    CombineOnly,
    RoundTrip { target_dir: PathBuf },
}

/// What to run, as decided by the command line.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub language: Language,
    pub source_dir: PathBuf,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    CombineOnly {
        files: usize,
        output: CombinedOutput,
    },
    RoundTrip {
        files: usize,
        received: usize,
        sync: SyncReport,
    },
}

pub async fn execute<T>(config: &Config, request: &RunRequest, transpiler: &T) -> Result<RunReport>
where
    T: Transpiler + ?Sized,
{
    let language = request.language;
    info!(%language, source_dir = %request.source_dir.display(), mode = ?request.mode, "Starting run");

    let combined = combine_files(
        &request.source_dir,
        language.extension(),
        config.ignore_list.as_slice(),
    )
    .with_context(|| {
        format!(
            "Failed to combine sources from {}",
            request.source_dir.display()
        )
    })?;

    let target_dir = match &request.mode {
        Mode::CombineOnly => {
            let output = write_combined_sources(&config.combined_output, &combined.blob)
                .with_context(|| {
                    format!(
                        "Failed to write combined sources to {}",
                        config.combined_output.display()
                    )
                })?;
            return Ok(RunReport::CombineOnly {
                files: combined.count(),
                output,
            });
        }
        Mode::RoundTrip { target_dir } => target_dir,
    };

    let (targets, _stopwatch) = match transpiler
        .transpile(language, &combined.blob, Stopwatch::new())
        .await
    {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Transpilation failed");
            return Err(anyhow::Error::new(e).context("Transpilation failed"));
        }
    };

    let sync = write_targets(target_dir, language.opposite().extension(), &targets)
        .context("Failed to write translated files")?;

    Ok(RunReport::RoundTrip {
        files: combined.count(),
        received: targets.len(),
        sync,
    })
}
