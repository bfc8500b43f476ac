//! HTTP rendering service client
//!
//! Routes, relative to the configured endpoint:
//!
//! | Operation | Request |
//! |---|---|
//! | create analysis | `POST /accounts/{account}/analyses/{analysis}` with the document as body |
//! | list datasets | `GET /accounts/{account}/data-sets` |
//! | describe analysis | `GET /accounts/{account}/analyses/{analysis}/definition` |
//!
//! Path segments are percent-encoded, so ids containing `/` stay one segment.
//!
//! Non-success responses carry `{"Code": ..., "Message": ...}`; the message is
//! surfaced unmodified.

use crate::error::{RenderError, RenderResult};
use crate::traits::{CreatedAnalysis, DataSetSummary, PublishedAnalysis, RenderingService};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sl_core::{AccountId, AnalysisDocument, AnalysisId};
use std::time::Duration;

/// Rendering service reached over HTTP
pub struct HttpRenderingService {
    client: Client,
    endpoint: String,
    base: Url,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DataSetListResponse {
    #[serde(default)]
    data_set_summaries: Vec<DataSetSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDefinitionResponse {
    #[serde(default)]
    definition: PublishedAnalysis,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(alias = "Code", alias = "__type", default)]
    code: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

impl HttpRenderingService {
    /// Create a client for `endpoint` with a per-request timeout
    pub fn new(endpoint: &str, timeout: Duration) -> RenderResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RenderError::Transport(e.to_string()))?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let base = Url::parse(&endpoint)
            .map_err(|e| RenderError::Transport(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        if base.cannot_be_a_base() {
            return Err(RenderError::Transport(format!(
                "endpoint '{}' cannot be a base URL",
                endpoint
            )));
        }
        Ok(Self {
            client,
            endpoint,
            base,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `{endpoint}/accounts/{account}/{segments...}`, each segment encoded
    fn url(&self, account_id: &str, segments: &[&str]) -> RenderResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RenderError::Transport(format!("endpoint '{}' cannot be a base URL", self.endpoint))
            })?
            .pop_if_empty()
            .push("accounts")
            .push(account_id)
            .extend(segments);
        Ok(url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> RenderError {
        if err.is_timeout() {
            RenderError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            RenderError::from(err)
        }
    }

    async fn read<T: DeserializeOwned>(&self, response: Response) -> RenderResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let parsed: ServiceErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(RenderError::Service {
                code: parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
                message: parsed.message.unwrap_or(body),
            });
        }

        serde_json::from_str(&body).map_err(|e| RenderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RenderingService for HttpRenderingService {
    async fn create_analysis(&self, document: &AnalysisDocument) -> RenderResult<CreatedAnalysis> {
        let url = self.url(
            &document.aws_account_id,
            &["analyses", document.analysis_id.as_str()],
        )?;
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(document)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read(response).await
    }

    async fn list_data_sets(&self, account_id: &AccountId) -> RenderResult<Vec<DataSetSummary>> {
        let url = self.url(account_id, &["data-sets"])?;
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let list: DataSetListResponse = self.read(response).await?;
        Ok(list.data_set_summaries)
    }

    async fn describe_analysis(
        &self,
        account_id: &AccountId,
        analysis_id: &AnalysisId,
    ) -> RenderResult<PublishedAnalysis> {
        let url = self.url(account_id, &["analyses", analysis_id.as_str(), "definition"])?;
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let described: DescribeDefinitionResponse = self.read(response).await?;
        Ok(described.definition)
    }

    fn service_type(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
