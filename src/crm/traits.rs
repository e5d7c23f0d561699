//! Trait abstraction for the CRM endpoint to enable mocking in tests

use super::payload::LeadPayload;
use super::CrmError;
use async_trait::async_trait;

/// Destination for lead payloads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Create a lead, returning the CRM's JSON response
    async fn create_lead(&self, payload: &LeadPayload) -> Result<serde_json::Value, CrmError>;
}
