//! Step validation

use super::field::InputKind;
use super::group::{FormGroup, Required};
use crate::phone::PhoneAdapter;
use crate::state::{ShakeState, Step};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_PHONE_MESSAGE: &str = "Enter a valid mobile number";
pub const SELECT_OPTION_MESSAGE: &str = "Please select an option";
pub const SELECT_AT_LEAST_ONE_MESSAGE: &str = "Select at least one option";

/// Check one group, returning the message for the last failed rule.
fn group_error(group: &FormGroup, phone: &PhoneAdapter) -> Option<&'static str> {
    let mut error = None;

    if let Some(input) = group.free_input() {
        if input.kind == InputKind::Tel {
            if !phone.is_valid(&input.value) {
                error = Some(INVALID_PHONE_MESSAGE);
            }
        } else if input.value.trim().is_empty() {
            error = Some(REQUIRED_MESSAGE);
        }
    }

    match group.required {
        Some(Required::Radio) if !group.has_checked(InputKind::Radio) => {
            error = Some(SELECT_OPTION_MESSAGE);
        }
        Some(Required::Checkbox) if !group.has_checked(InputKind::Checkbox) => {
            error = Some(SELECT_AT_LEAST_ONE_MESSAGE);
        }
        _ => {}
    }

    error
}

/// Validate every group of a step, refreshing inline errors and shakes.
///
/// Returns true when the step may be left.
pub fn validate_step(step: &mut Step, phone: &PhoneAdapter) -> bool {
    let mut is_valid = true;

    for group in &mut step.groups {
        group.clear_error();
        if let Some(message) = group_error(group, phone) {
            group.fail(message);
            group.shake = Some(ShakeState::new());
            is_valid = false;
        }
    }

    if !is_valid {
        tracing::debug!("Step '{}' failed validation", step.title);
    }
    is_valid
}
