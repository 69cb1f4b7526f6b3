// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Ollama Code Analysis Adapter
//
// Anti-Corruption Layer for an Ollama-style /api/generate endpoint.
// One POST per analysis, no retry. Every failure becomes a Correction payload.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::analysis::{self, CodeAnalyzer};
use crate::domain::script::Correction;
use crate::domain::server_config::AnalysisConfig;

pub struct OllamaAnalysisGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum GatewayError {
    #[error("{}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),
}

/// Renders an error with its sources so the root cause (e.g. "Connection
/// refused") reaches the student.
fn error_chain(err: &reqwest::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !rendered.contains(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}

impl OllamaAnalysisGateway {
    /// Gateway without a request timeout.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self, reqwest::Error> {
        Self::with_timeout(&config.endpoint, &config.model, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `Ok(None)` when the service answered 200 without a usable `response`.
    async fn generate(&self, code: &str) -> Result<Option<String>, GatewayError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: analysis::correction_prompt(code),
            stream: false,
        };

        debug!("Requesting code analysis from {} (model: {})", self.endpoint, self.model);

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        if response.status() != StatusCode::OK {
            return Err(GatewayError::Status(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<GenerateResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.response)
            .filter(|text| !text.is_empty()))
    }
}

#[async_trait]
impl CodeAnalyzer for OllamaAnalysisGateway {
    async fn analyze(&self, code: &str) -> Correction {
        match self.generate(code).await {
            Ok(Some(text)) => analysis::analyzed(text),
            Ok(None) => {
                debug!("Analysis service returned no response field");
                analysis::analyzed(analysis::NO_RESPONSE)
            }
            Err(GatewayError::Status(status)) => {
                warn!("Analysis service at {} answered {}", self.endpoint, status);
                analysis::analysis_failed()
            }
            Err(err @ GatewayError::Transport(_)) => {
                warn!("Failed to reach analysis service at {}: {}", self.endpoint, err);
                analysis::connection_failed(err)
            }
        }
    }
}
