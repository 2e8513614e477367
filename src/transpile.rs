#![doc = "HTTP client for the transpilation service: one POST per run, response split back into files."]
//
//! The request body is the combined blob; the source language travels as the
//! `input` query parameter. The response uses the same delimiter format and is
//! handed to [`crate::protocol::split_blocks`]. No retry and no timeout: a
//! failed exchange ends the run.

use crate::contract::{TranspileError, Transpiler};
use crate::language::Language;
use crate::protocol::{split_blocks, TranslationResult};
use crate::stopwatch::Stopwatch;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::{error, info};

/// Service endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://transpile.iem.thm.de/sek/";

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

pub struct TranspileClient {
    client: Client,
    endpoint: Url,
}

impl TranspileClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Transpiler for TranspileClient {
    async fn transpile(
        &self,
        language: Language,
        sources: &str,
        mut stopwatch: Stopwatch,
    ) -> Result<(TranslationResult, Stopwatch), TranspileError> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .query(&[("input", language.tag())])
            .header(CONTENT_TYPE, TEXT_PLAIN_UTF8)
            .body(sources.to_owned())
            .build()?;
        let url = request.url().to_string();
        info!(url = %url, bytes = sources.len(), %language, "Sending sources to transpilation service");

        stopwatch.lap();
        let response = self.client.execute(request).await.map_err(|e| {
            error!(url = %url, error = %e, "Transpilation request failed");
            TranspileError::from(e)
        })?;
        let elapsed = stopwatch.lap().unwrap_or_default();
        let status = response.status();

        println!("URL : {url}");
        println!("Response Code : {}", status.as_u16());
        println!("Elapsed Time : {} ms", elapsed.as_millis());
        info!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Transpilation service responded"
        );

        if !status.is_success() {
            error!(url = %url, status = status.as_u16(), "Transpilation service returned an error status");
            return Err(TranspileError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = String::from_utf8(response.bytes().await?.to_vec())?;
        let targets = split_blocks(&body);
        info!(files = targets.len(), "Parsed transpilation response");
        Ok((targets, stopwatch))
    }
}
