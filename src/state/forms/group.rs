//! Labelled field groups

use super::field::{FormInput, InputKind};
use crate::state::ShakeState;

/// Choice requirement carried by a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    /// At least one radio must be checked
    Radio,
    /// At least one checkbox must be checked
    Checkbox,
}

/// A labelled wrapper around one or more inputs, with its inline error
#[derive(Debug, Clone)]
pub struct FormGroup {
    pub label: String,
    pub required: Option<Required>,
    pub inputs: Vec<FormInput>,
    pub error: Option<String>,
    pub shake: Option<ShakeState>,
}

impl FormGroup {
    pub fn new(label: &str, inputs: Vec<FormInput>) -> Self {
        Self {
            label: label.to_string(),
            required: None,
            inputs,
            error: None,
            shake: None,
        }
    }

    pub fn requiring(mut self, required: Required) -> Self {
        self.required = Some(required);
        self
    }

    /// First input that is neither radio nor checkbox
    pub fn free_input(&self) -> Option<&FormInput> {
        self.inputs.iter().find(|i| !i.kind.is_choice())
    }

    pub fn has_checked(&self, kind: InputKind) -> bool {
        self.inputs.iter().any(|i| i.kind == kind && i.checked)
    }

    /// Select a radio option, unchecking its siblings of the same name.
    pub fn select_radio(&mut self, index: usize) -> bool {
        let Some(name) = self
            .inputs
            .get(index)
            .filter(|i| i.kind == InputKind::Radio)
            .map(|i| i.name.clone())
        else {
            return false;
        };
        for (i, input) in self.inputs.iter_mut().enumerate() {
            if input.kind == InputKind::Radio && input.name == name {
                input.checked = i == index;
            }
        }
        true
    }

    /// Toggle a checkbox chip and apply the exclusive "None" rule.
    pub fn toggle_checkbox(&mut self, index: usize) -> bool {
        match self.inputs.get_mut(index) {
            Some(input) if input.kind == InputKind::Checkbox => {
                input.checked = !input.checked;
            }
            _ => return false,
        }
        self.apply_none_exclusivity(index);
        true
    }

    /// "None" excludes every sibling chip, and any sibling excludes "None".
    pub fn apply_none_exclusivity(&mut self, changed: usize) {
        let Some(changed_input) = self.inputs.get(changed) else {
            return;
        };
        if changed_input.kind != InputKind::Checkbox || !changed_input.checked {
            return;
        }
        let changed_is_none = changed_input.is_none_option();
        for (i, input) in self.inputs.iter_mut().enumerate() {
            if i == changed || input.kind != InputKind::Checkbox {
                continue;
            }
            if changed_is_none || input.is_none_option() {
                input.checked = false;
            }
        }
    }

    /// Reset error text and highlight before a validation pass
    pub fn clear_error(&mut self) {
        self.error = None;
        self.shake = None;
    }

    pub fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}
