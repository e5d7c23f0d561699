//! CRM integration: lead payloads, the HTTP sink, and the submitter

mod client;
mod payload;
mod submitter;
mod traits;

pub use submitter::LeadSubmitter;

#[cfg(test)]
pub use traits::MockLeadSink;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("CRM request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CRM returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("CRM response was not JSON: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid CRM endpoint {0}")]
    Endpoint(String),
}
