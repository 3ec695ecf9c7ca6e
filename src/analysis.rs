//! Decorative commentary on the election, produced by a text-generation API.
//!
//! The output is display text only. It is never parsed, and a failure here
//! never affects the election itself: callers go through
//! [`analysis_or_fallback`], which always yields something to show.

use reqwest::Client;
use rocket::serde::json::serde_json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::model::results::Standing;

/// Shown when the service answers with no text.
pub const EMPTY_ANALYSIS: &str = "Analyzing current trends...";

/// Shown whenever the service cannot be reached or misbehaves.
pub const FALLBACK_ANALYSIS: &str =
    "The system is monitoring vote integrity. Please proceed to vote responsibly.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no analysis service is configured")]
    NotConfigured,
    #[error("could not encode standings: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("analysis request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Something that can comment on the current standings.
#[rocket::async_trait]
pub trait Analyst: Send + Sync {
    async fn analyse(&self, standings: &[Standing]) -> Result<String, AnalysisError>;
}

/// Ask `analyst` for commentary, substituting fixed text on empty replies and errors.
pub async fn analysis_or_fallback(analyst: &dyn Analyst, standings: &[Standing]) -> String {
    match analyst.analyse(standings).await {
        Ok(text) if text.trim().is_empty() => EMPTY_ANALYSIS.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Election analysis unavailable: {e}");
            FALLBACK_ANALYSIS.to_string()
        }
    }
}

/// The instruction sent along with the standings.
pub fn prompt(standings: &[Standing]) -> Result<String, AnalysisError> {
    let standings = serde_json::to_string(standings)?;
    Ok(format!(
        "Analyze the current voting scenario with the following candidates:\n\
         {standings}\n\n\
         Provide a brief 3-sentence summary of the election progress, identifying the \
         leading party and a message encouraging fair participation.\n\
         Return the response as a plain string."
    ))
}

/// Analyst backed by the `generateContent` text-generation endpoint.
pub struct GenerativeAnalyst {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GenerativeAnalyst {
    /// Build a client from the config, or `None` if no API key is set.
    pub fn from_config(config: &Config) -> Result<Option<Self>, AnalysisError> {
        let Some(api_key) = config.analysis_api_key() else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(config.analysis_timeout())
            .build()?;
        Ok(Some(Self {
            client,
            endpoint: config.analysis_endpoint().trim_end_matches('/').to_string(),
            model: config.analysis_model().to_string(),
            api_key: api_key.to_string(),
        }))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[rocket::async_trait]
impl Analyst for GenerativeAnalyst {
    async fn analyse(&self, standings: &[Standing]) -> Result<String, AnalysisError> {
        let request = GenerateRequest::new(prompt(standings)?);
        let response: GenerateResponse = self
            .client
            .post(self.url())
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.text())
    }
}

/// Stand-in used when no API key is configured.
pub struct OfflineAnalyst;

#[rocket::async_trait]
impl Analyst for OfflineAnalyst {
    async fn analyse(&self, _standings: &[Standing]) -> Result<String, AnalysisError> {
        Err(AnalysisError::NotConfigured)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn new(text: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(text) }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GeneratedCandidate>,
}

impl GenerateResponse {
    /// All text parts of the first candidate reply, joined.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct GeneratedCandidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}
