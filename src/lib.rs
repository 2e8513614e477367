#![doc = "sk-client: combine Kotlin/Swift sources, transpile them remotely, sync the translations back."]

//! Stages, in the order a run uses them:
//!
//! - [`combine`]: walk a source tree and build the delimited blob
//! - [`transpile`]: send the blob to the service and split the answer
//! - [`sync`]: write changed or new translations, never delete
//! - [`pipeline`]: tie the stages together for one run
//!
//! The wire format lives in [`protocol`]; the service seam in [`contract`].

pub mod cli;
pub mod combine;
pub mod config;
pub mod contract;
pub mod language;
pub mod load_config;
pub mod pipeline;
pub mod protocol;
pub mod stopwatch;
pub mod sync;
pub mod transpile;

pub use cli::{run, Cli};
