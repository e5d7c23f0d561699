//! Form rendering module
//!
//! - `field_renderer`: group and input rendering
//! - `step_form`: the active step with its navigation row

mod field_renderer;
mod step_form;

pub use step_form::draw as draw_step;
