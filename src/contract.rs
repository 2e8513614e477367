//! # contract: the seam between the driver and the transpilation service
//!
//! The driver never talks HTTP directly. It hands the combined sources to a
//! [`Transpiler`], which returns the per-file translations. The real
//! implementation is [`crate::transpile::TranspileClient`]; tests use the
//! generated `MockTranspiler`.
//!
//! ## Mocking
//! - The trait is annotated for `mockall`; the mock is exported under the
//!   `test-export-mocks` feature (on by default) so integration tests in
//!   `tests/` can build it.

use crate::language::Language;
use crate::protocol::TranslationResult;
use crate::stopwatch::Stopwatch;
use async_trait::async_trait;
use std::fmt;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

#[derive(Debug)]
pub enum TranspileError {
    /// Connection, TLS or body transfer failure.
    Http(reqwest::Error),
    /// The service answered with a non-success status.
    Status { url: String, status: u16 },
    /// The response body was not UTF-8 text.
    Decode(std::string::FromUtf8Error),
}

impl fmt::Display for TranspileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranspileError::Http(e) => write!(f, "request to transpilation service failed: {e}"),
            TranspileError::Status { url, status } => {
                write!(f, "transpilation service at {url} answered with status {status}")
            }
            TranspileError::Decode(e) => write!(f, "response body is not UTF-8 text: {e}"),
        }
    }
}

impl std::error::Error for TranspileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranspileError::Http(e) => Some(e),
            TranspileError::Decode(e) => Some(e),
            TranspileError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for TranspileError {
    fn from(e: reqwest::Error) -> Self {
        TranspileError::Http(e)
    }
}

impl From<std::string::FromUtf8Error> for TranspileError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        TranspileError::Decode(e)
    }
}

/// Sends combined sources to a translation backend.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transpiler: Send + Sync {
    /// Translate `sources` (a delimited blob in `language`) to the opposite
    /// language.
    ///
    /// The stopwatch is lapped around the exchange and handed back so the
    /// caller owns the timing state.
    async fn transpile(
        &self,
        language: Language,
        sources: &str,
        stopwatch: Stopwatch,
    ) -> Result<(TranslationResult, Stopwatch), TranspileError>;
}
