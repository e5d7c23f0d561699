//! Application state module

mod assessment;
mod forms;
mod shake;
mod steps;

pub use assessment::*;
pub use forms::*;
pub use shake::*;
pub use steps::*;
