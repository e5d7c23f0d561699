//! Persisted form answers
//!
//! `FormState` maps input names to answers. `FormStore` owns the state
//! together with the key-value store it is persisted into, and performs the
//! save/restore passes over rendered inputs.

use super::field::{FormInput, InputKind};
use crate::storage::{KeyValueStore, FORM_STATE_KEY, PARTIAL_LEAD_SENT_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored answer: scalar, or an ordered set for checkbox groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Display form, multi-select values joined with ", "
    pub fn as_text(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::Multi(values) => values.join(", "),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(s) => s == value,
            Self::Multi(values) => values.iter().any(|v| v == value),
        }
    }
}

/// Field name to answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, FieldValue>);

impl FormState {
    /// Parse persisted text; anything unparseable is an empty state.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!("Discarding malformed form state: {e}");
                Self::default()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text of an answer, empty when absent
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(FieldValue::as_text).unwrap_or_default()
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Write one input's current value into the state.
    pub fn record(&mut self, input: &FormInput) {
        if input.name.is_empty() {
            return;
        }
        match input.kind {
            InputKind::Checkbox => {
                let entry = self
                    .0
                    .entry(input.name.clone())
                    .or_insert_with(|| FieldValue::Multi(Vec::new()));
                if let FieldValue::Single(previous) = &*entry {
                    let values = if previous.is_empty() {
                        Vec::new()
                    } else {
                        vec![previous.clone()]
                    };
                    *entry = FieldValue::Multi(values);
                }
                if let FieldValue::Multi(values) = entry {
                    let present = values.iter().any(|v| *v == input.value);
                    if input.checked && !present {
                        values.push(input.value.clone());
                    } else if !input.checked && present {
                        values.retain(|v| *v != input.value);
                    }
                }
            }
            InputKind::Radio => {
                if input.checked {
                    self.insert(&input.name, FieldValue::Single(input.value.clone()));
                }
            }
            InputKind::Tel => {
                self.insert(&input.name, FieldValue::Single(digits_only(&input.value)));
            }
            InputKind::Text | InputKind::Email | InputKind::Number => {
                self.insert(&input.name, FieldValue::Single(input.value.clone()));
            }
        }
    }

    /// Write the stored answer back into one input, if there is one.
    pub fn apply(&self, input: &mut FormInput) {
        let Some(stored) = self.get(&input.name) else {
            return;
        };
        match input.kind {
            InputKind::Radio | InputKind::Checkbox => input.checked = stored.contains(&input.value),
            InputKind::Tel => input.value = digits_only(&stored.as_text()),
            _ => input.value = stored.as_text(),
        }
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Form state bound to its persistence
pub struct FormStore {
    state: FormState,
    store: Box<dyn KeyValueStore>,
}

impl FormStore {
    /// Load persisted answers; absent or malformed data gives an empty state.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let state = store
            .get(FORM_STATE_KEY)
            .map(|raw| FormState::parse(&raw))
            .unwrap_or_default();
        tracing::debug!("Loaded {} stored answers", state.len());
        Self { state, store }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Record every named input, then persist the whole state.
    pub fn save<'a>(&mut self, inputs: impl IntoIterator<Item = &'a FormInput>) {
        for input in inputs {
            self.state.record(input);
        }
        self.persist();
    }

    /// Write stored answers back into the given inputs.
    pub fn restore<'a>(&self, inputs: impl IntoIterator<Item = &'a mut FormInput>) {
        for input in inputs {
            self.state.apply(input);
        }
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.state)
            .map_err(crate::storage::StoreError::from)
            .and_then(|json| self.store.set(FORM_STATE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to persist form state: {e}");
        }
    }

    pub fn partial_lead_sent(&self) -> bool {
        self.store.get(PARTIAL_LEAD_SENT_KEY).as_deref() == Some("true")
    }

    pub fn mark_partial_lead_sent(&mut self) {
        if let Err(e) = self.store.set(PARTIAL_LEAD_SENT_KEY, "true") {
            tracing::warn!("Failed to persist partial lead flag: {e}");
        }
    }

    /// Forget all answers and the partial lead flag
    pub fn clear(&mut self) {
        self.state = FormState::default();
        for key in [FORM_STATE_KEY, PARTIAL_LEAD_SENT_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!("Failed to remove {key} from storage: {e}");
            }
        }
    }
}
