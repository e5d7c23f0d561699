//! Fire-and-forget lead dispatch

use super::client::CrmClient;
use super::payload::{LeadKind, LeadPayload};
use super::traits::LeadSink;
use super::CrmError;
use crate::config::CrmConfig;
use crate::state::{FormState, FormStore};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Builds lead payloads from stored answers and sends them to the CRM
#[derive(Clone)]
pub struct LeadSubmitter {
    sink: Arc<dyn LeadSink>,
}

impl LeadSubmitter {
    pub fn new(sink: Arc<dyn LeadSink>) -> Self {
        Self { sink }
    }

    /// Submitter backed by the HTTP client for `config`
    pub fn from_config(config: &CrmConfig) -> Result<Self, CrmError> {
        Ok(Self::new(Arc::new(CrmClient::new(config)?)))
    }

    /// Build the `kind` payload from `state` and send it in the background.
    /// The outcome is only logged.
    pub fn dispatch(&self, kind: LeadKind, state: &FormState) -> JoinHandle<()> {
        let payload = LeadPayload::for_kind(kind, state);
        let sink = Arc::clone(&self.sink);
        tracing::info!(
            "Dispatching {} lead with {} attributes",
            kind.label(),
            payload.attributes().len()
        );
        tokio::spawn(async move {
            match sink.create_lead(&payload).await {
                Ok(response) => tracing::info!("LeadSquared {} lead accepted: {response}", kind.label()),
                Err(e) => tracing::error!("LeadSquared {} lead failed: {e}", kind.label()),
            }
        })
    }

    /// Send the partial lead once per session, when a phone number is known.
    ///
    /// The sent flag is persisted as soon as the request is dispatched.
    pub fn send_partial(&self, store: &mut FormStore) -> Option<JoinHandle<()>> {
        if store.partial_lead_sent() {
            tracing::debug!("Partial lead already sent");
            return None;
        }
        if store.state().text("mobile").is_empty() {
            tracing::debug!("No mobile number yet, skipping partial lead");
            return None;
        }

        let handle = self.dispatch(LeadKind::Partial, store.state());
        store.mark_partial_lead_sent();
        Some(handle)
    }

    /// Send the full lead built from the current answers
    pub fn send_full(&self, store: &FormStore) -> JoinHandle<()> {
        self.dispatch(LeadKind::Full, store.state())
    }
}
