//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::StepView;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area());

    layout::draw_stage_header(frame, screen.header, app);
    layout::draw_progress(frame, screen.progress, app);

    match app.steps.view() {
        StepView::Step(_) => forms::draw_step(frame, screen.main, app),
        StepView::Success => components::render_success_dialog(frame),
    }

    layout::draw_status_bar(frame, screen.status, app);
}
