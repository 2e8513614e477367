//! Command-line surface of `sk-client`.
//!
//! `sk-client <language> <source-dir> [target-dir]`
//!
//! Without a target directory the sources are only combined into
//! `combinedSources.txt`; with one, they are sent to the transpilation
//! service and the translations are synced into the target directory.
//!
//! [`run`] holds the whole flow so integration tests can drive it without
//! spawning the binary.

use crate::language::Language;
use crate::load_config::{endpoint_url, load_config};
use crate::pipeline::{execute, Mode, RunReport, RunRequest};
use crate::transpile::TranspileClient;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Exit status for a malformed command line.
pub const USAGE_EXIT_CODE: i32 = -1;

fn parse_language(arg: &str) -> Result<Language, String> {
    Ok(Language::from_arg(arg))
}

#[derive(Parser, Debug)]
#[clap(
    name = "sk-client",
    version,
    about = "Combine Kotlin or Swift sources, transpile them to the other language and sync the result"
)]
pub struct Cli {
    /// Input language: anything starting with "k" is Kotlin, everything else Swift
    #[clap(value_parser = parse_language)]
    pub language: Language,

    /// Directory holding the sources to translate
    pub source_dir: PathBuf,

    /// Directory receiving the translations; omit to only combine the sources
    pub target_dir: Option<PathBuf>,

    /// Further positional arguments are accepted and ignored
    #[clap(hide = true)]
    pub extra: Vec<String>,

    /// Optional YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Transpilation service URL, overrides config file and environment
    #[clap(long)]
    pub endpoint: Option<String>,

    /// Wait for ENTER before exiting
    #[clap(long)]
    pub wait: bool,
}

impl Cli {
    pub fn request(&self) -> RunRequest {
        RunRequest {
            language: self.language,
            source_dir: self.source_dir.clone(),
            mode: match &self.target_dir {
                Some(dir) => Mode::RoundTrip {
                    target_dir: dir.clone(),
                },
                None => Mode::CombineOnly,
            },
        }
    }
}

pub fn print_usage() {
    println!("You have to provide at least two arguments.");
    println!("1) the input language: either kotlin or swift");
    println!("2) the relative path of the source directory");
    println!("3) the relative path of the target directory (omit to only combine the sources)");
}

pub async fn run(cli: Cli) -> Result<RunReport> {
    println!("input language: {}", cli.language);
    println!("sources directory: {}", cli.source_dir.display());
    println!(
        "target directory: {}",
        cli.target_dir
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    );

    let config = load_config(cli.config.as_deref(), cli.endpoint.as_deref())?;
    let client = TranspileClient::new(endpoint_url(&config)?);
    let request = cli.request();

    let report = execute(&config, &request, &client).await?;
    tracing::info!(?report, "Run complete");

    if cli.wait {
        println!("Press ENTER to quit.");
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    }

    Ok(report)
}
