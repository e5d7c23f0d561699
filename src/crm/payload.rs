//! Lead payloads in LeadSquared's attribute-list shape

use crate::state::FormState;
use serde::Serialize;

pub const PARTIAL_LEAD_SOURCE: &str = "Hair Assessment - Partial";
pub const PARTIAL_LEAD_STAGE: &str = "Incomplete";
pub const FULL_LEAD_SOURCE: &str = "Hair Assessment - Completed";
pub const FULL_LEAD_STAGE: &str = "Completed";

/// CRM attribute to form field name, for the partial lead
const PARTIAL_FIELDS: &[(&str, &str)] = &[
    ("FirstName", "full_name"),
    ("Age", "age"),
    ("Phone", "mobile"),
];

/// CRM attribute to form field name, for the full lead
const FULL_FIELDS: &[(&str, &str)] = &[
    ("FirstName", "full_name"),
    ("Age", "age"),
    ("Phone", "mobile"),
    ("Gender", "gender"),
    ("HairLossPattern", "pattern"),
    ("HairLossDuration", "duration"),
    ("Goal", "goal"),
    ("EmailAddress", "email"),
];

/// Which lead is being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadKind {
    Partial,
    Full,
}

impl LeadKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Full => "full",
        }
    }
}

/// One `{"Attribute": .., "Value": ..}` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeadAttribute {
    pub attribute: String,
    pub value: String,
}

impl LeadAttribute {
    pub fn new(attribute: &str, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }
}

/// Ordered attribute list POSTed to Lead.Create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeadPayload(Vec<LeadAttribute>);

impl LeadPayload {
    fn build(state: &FormState, fields: &[(&str, &str)], source: &str, stage: &str) -> Self {
        let mut attributes: Vec<LeadAttribute> = fields
            .iter()
            .map(|(attribute, field)| LeadAttribute::new(attribute, state.text(field)))
            .collect();
        attributes.push(LeadAttribute::new("LeadSource", source));
        attributes.push(LeadAttribute::new("LeadStage", stage));
        Self(attributes)
    }

    pub fn partial(state: &FormState) -> Self {
        Self::build(state, PARTIAL_FIELDS, PARTIAL_LEAD_SOURCE, PARTIAL_LEAD_STAGE)
    }

    pub fn full(state: &FormState) -> Self {
        Self::build(state, FULL_FIELDS, FULL_LEAD_SOURCE, FULL_LEAD_STAGE)
    }

    pub fn for_kind(kind: LeadKind, state: &FormState) -> Self {
        match kind {
            LeadKind::Partial => Self::partial(state),
            LeadKind::Full => Self::full(state),
        }
    }

    pub fn attributes(&self) -> &[LeadAttribute] {
        &self.0
    }

    #[cfg(test)]
    pub fn value(&self, attribute: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.attribute == attribute)
            .map(|a| a.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state() -> FormState {
        FormState::parse(
            r#"{
                "full_name": "A",
                "age": "30",
                "mobile": "9876543210",
                "gender": "male",
                "pattern": "thinning_crown",
                "conditions": ["thyroid", "stress"],
                "email": "a@example.com"
            }"#,
        )
    }

    #[test]
    fn test_partial_payload_shape() {
        let payload = LeadPayload::partial(&state());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!([
                {"Attribute": "FirstName", "Value": "A"},
                {"Attribute": "Age", "Value": "30"},
                {"Attribute": "Phone", "Value": "9876543210"},
                {"Attribute": "LeadSource", "Value": "Hair Assessment - Partial"},
                {"Attribute": "LeadStage", "Value": "Incomplete"}
            ])
        );
    }

    #[test]
    fn test_full_payload_fills_missing_with_empty() {
        let payload = LeadPayload::full(&state());
        let names: Vec<&str> = payload
            .attributes()
            .iter()
            .map(|a| a.attribute.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "FirstName",
                "Age",
                "Phone",
                "Gender",
                "HairLossPattern",
                "HairLossDuration",
                "Goal",
                "EmailAddress",
                "LeadSource",
                "LeadStage"
            ]
        );
        assert_eq!(payload.value("HairLossDuration"), Some(""));
        assert_eq!(payload.value("Goal"), Some(""));
        assert_eq!(payload.value("EmailAddress"), Some("a@example.com"));
        assert_eq!(payload.value("LeadSource"), Some(FULL_LEAD_SOURCE));
        assert_eq!(payload.value("LeadStage"), Some(FULL_LEAD_STAGE));
    }

    #[test]
    fn test_for_kind_matches_builders() {
        let state = state();
        assert_eq!(LeadPayload::for_kind(LeadKind::Partial, &state), LeadPayload::partial(&state));
        assert_eq!(LeadPayload::for_kind(LeadKind::Full, &state), LeadPayload::full(&state));
    }

    #[test]
    fn test_empty_state_payload() {
        let payload = LeadPayload::partial(&FormState::default());
        assert_eq!(payload.value("Phone"), Some(""));
        assert!(payload.value("Gender").is_none());
    }
}
