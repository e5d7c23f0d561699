//! Form domain layer
//!
//! Typed inputs and groups, the persisted answer store, and validation.

mod field;
mod group;
mod store;
mod validation;

pub use field::{FormInput, InputKind};
pub use group::{FormGroup, Required};
pub use store::{FieldValue, FormState, FormStore};
pub use validation::validate_step;
