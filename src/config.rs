use crate::combine::DEFAULT_IGNORE_LIST;
use crate::transpile::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// File written in combine-only mode, relative to the working directory.
pub const DEFAULT_COMBINED_OUTPUT: &str = "combinedSources.txt";

/// Runtime settings. Every field has a default, so a YAML file only needs the
/// keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transpilation service URL; `?input=<language>` is appended per request.
    pub endpoint: String,
    pub combined_output: PathBuf,
    /// File stems never sent to the service, applied in both directions.
    pub ignore_list: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            combined_output: PathBuf::from(DEFAULT_COMBINED_OUTPUT),
            ignore_list: DEFAULT_IGNORE_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            endpoint = %self.endpoint,
            combined_output = %self.combined_output.display(),
            ignored = self.ignore_list.len(),
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}
