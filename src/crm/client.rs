//! HTTP client for the LeadSquared Lead.Create endpoint

use super::payload::LeadPayload;
use super::traits::LeadSink;
use super::CrmError;
use crate::config::CrmConfig;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

/// Lead.Create URL with URL-encoded credentials
pub fn endpoint_url(config: &CrmConfig) -> Result<Url, CrmError> {
    let base = config
        .endpoint
        .clone()
        .unwrap_or_else(|| config.base_url());
    Url::parse_with_params(
        &base,
        &[
            ("accessKey", config.access_key.as_str()),
            ("secretKey", config.secret_key.as_str()),
        ],
    )
    .map_err(|e| CrmError::Endpoint(format!("{base}: {e}")))
}

/// Client for posting leads to LeadSquared
#[derive(Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    url: Url,
}

impl CrmClient {
    /// Create a client from explicit configuration
    pub fn new(config: &CrmConfig) -> Result<Self, CrmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            url: endpoint_url(config)?,
        })
    }
}

#[async_trait]
impl LeadSink for CrmClient {
    async fn create_lead(&self, payload: &LeadPayload) -> Result<serde_json::Value, CrmError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(CrmError::Decode)
    }
}
