//! Application state and core logic

use crate::config::AppConfig;
use crate::crm::LeadSubmitter;
use crate::phone::{self, PhoneAdapter};
use crate::state::{
    assessment_steps, validate_step, FormInput, FormStore, InputKind, Step, StepController,
};
use crate::storage::KeyValueStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::task::JoinHandle;

/// Navigation buttons in a step's action row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Back,
    Next,
    Submit,
}

impl NavButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Next => "Next",
            Self::Submit => "Submit",
        }
    }
}

/// Keyboard focus within the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input { group: usize, input: usize },
    Button(NavButton),
}

/// Main application struct
pub struct App {
    /// Steps, active view and progress
    pub steps: StepController,
    /// Persisted answers
    pub store: FormStore,
    /// Region selection for the tel input
    pub phone: PhoneAdapter,
    pub focus: Focus,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    submitter: LeadSubmitter,
    /// Lead requests still in flight
    pub dispatches: Vec<JoinHandle<()>>,
    quit: bool,
}

impl App {
    /// Create the app with the standard questionnaire
    pub fn new(config: &AppConfig, storage: Box<dyn KeyValueStore>, submitter: LeadSubmitter) -> Self {
        Self::with_steps(assessment_steps(), config, storage, submitter)
    }

    pub fn with_steps(
        steps: Vec<Step>,
        config: &AppConfig,
        storage: Box<dyn KeyValueStore>,
        submitter: LeadSubmitter,
    ) -> Self {
        let store = FormStore::load(storage);
        let mut steps = StepController::new(steps);

        // Hydrate hidden steps too, so saving over them keeps stored answers
        store.restore(steps.all_inputs_mut());

        let mut app = Self {
            steps,
            store,
            phone: PhoneAdapter::new(config.default_region.unwrap_or_default()),
            focus: Focus::Button(NavButton::Next),
            status_message: None,
            submitter,
            dispatches: Vec::new(),
            quit: false,
        };
        app.show_step(0);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether an animation needs fast redraws
    pub fn is_animating(&self) -> bool {
        self.steps
            .current_step()
            .is_some_and(|s| s.groups.iter().any(|g| g.shake.is_some()))
    }

    /// Per-frame housekeeping: settle finished shakes, drop finished requests
    pub fn tick(&mut self) {
        if let Some(step) = self.steps.current_step_mut() {
            for group in &mut step.groups {
                if group.shake.is_some_and(|s| s.is_finished()) {
                    group.shake = None;
                }
            }
        }
        self.dispatches.retain(|handle| !handle.is_finished());
    }

    /// Buttons shown under the current step
    pub fn buttons(&self) -> Vec<NavButton> {
        let mut buttons = Vec::new();
        if self.steps.current() > 0 {
            buttons.push(NavButton::Back);
        }
        buttons.push(if self.steps.is_last() {
            NavButton::Submit
        } else {
            NavButton::Next
        });
        buttons
    }

    /// Focusable slots of the active step in tab order
    pub fn focus_slots(&self) -> Vec<Focus> {
        let mut slots = Vec::new();
        if let Some(step) = self.steps.current_step() {
            for (g, group) in step.groups.iter().enumerate() {
                for i in 0..group.inputs.len() {
                    slots.push(Focus::Input { group: g, input: i });
                }
            }
        }
        slots.extend(self.buttons().into_iter().map(Focus::Button));
        slots
    }

    fn move_focus(&mut self, forward: bool) {
        let slots = self.focus_slots();
        if slots.is_empty() {
            return;
        }
        let current = slots.iter().position(|s| *s == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % slots.len()
        } else if current == 0 {
            slots.len() - 1
        } else {
            current - 1
        };
        self.focus = slots[next];
    }

    fn focused_input(&self) -> Option<&FormInput> {
        let Focus::Input { group, input } = self.focus else {
            return None;
        };
        self.steps
            .current_step()?
            .groups
            .get(group)?
            .inputs
            .get(input)
    }

    /// Show a step and move focus to its first slot
    pub fn show_step(&mut self, index: isize) -> bool {
        if !self.steps.show_step(index, &self.store) {
            return false;
        }
        self.normalize_phone_inputs();
        if let Some(first) = self.focus_slots().first() {
            self.focus = *first;
        }
        true
    }

    /// Restored tel values may predate the current region selection
    fn normalize_phone_inputs(&mut self) {
        let phone = self.phone;
        for input in self.steps.all_inputs_mut() {
            if input.kind == InputKind::Tel && phone.normalize(&mut input.value) {
                tracing::debug!("Trimmed restored {} to {:?} rules", input.name, phone.region);
            }
        }
    }

    /// Persist every input after an edit
    fn save(&mut self) {
        self.store.save(self.steps.all_inputs());
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        if self.steps.is_success() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                self.quit = true;
            }
            return;
        }

        let focused_kind = self.focused_input().map(|i| i.kind);

        if focused_kind == Some(InputKind::Tel) {
            if key.code == KeyCode::F(2) {
                self.cycle_phone_region();
                return;
            }
            // Esc and Enter navigate rather than edit
            let navigates = matches!(key.code, KeyCode::Esc | KeyCode::Enter);
            if !navigates && !phone::accepts_key(key.code) {
                self.status_message = Some("Digits only".to_string());
                return;
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Esc => self.prev_step(),
            KeyCode::Enter => self.activate(),
            KeyCode::Char(' ') if focused_kind.is_some_and(|k| k.is_choice()) => self.activate(),
            KeyCode::Char(' ') if matches!(self.focus, Focus::Button(_)) => self.activate(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.type_char(c),
            KeyCode::Backspace | KeyCode::Delete => self.delete_char(key.code),
            _ => {}
        }
    }

    /// Enter/Space on the focused slot
    fn activate(&mut self) {
        match self.focus {
            Focus::Button(NavButton::Back) => self.prev_step(),
            Focus::Button(NavButton::Next) => self.next_step(),
            Focus::Button(NavButton::Submit) => self.submit(),
            Focus::Input { group, input } => {
                let Some(step) = self.steps.current_step_mut() else {
                    return;
                };
                let Some(group) = step.groups.get_mut(group) else {
                    return;
                };
                let changed = match group.inputs.get(input).map(|i| i.kind) {
                    Some(InputKind::Radio) => group.select_radio(input),
                    Some(InputKind::Checkbox) => group.toggle_checkbox(input),
                    Some(_) => {
                        self.move_focus(true);
                        false
                    }
                    None => false,
                };
                if changed {
                    self.save();
                }
            }
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut FormInput> {
        let Focus::Input { group, input } = self.focus else {
            return None;
        };
        self.steps
            .current_step_mut()?
            .groups
            .get_mut(group)?
            .inputs
            .get_mut(input)
    }

    fn type_char(&mut self, c: char) {
        let phone = self.phone;
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        let changed = match input.kind {
            InputKind::Tel => phone.handle_key(&mut input.value, KeyCode::Char(c)),
            _ => input.push_char(c),
        };
        if changed {
            self.save();
        }
    }

    fn delete_char(&mut self, code: KeyCode) {
        let phone = self.phone;
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        let changed = match input.kind {
            InputKind::Tel => phone.handle_key(&mut input.value, code),
            _ => input.pop_char(),
        };
        if changed {
            self.save();
        }
    }

    fn cycle_phone_region(&mut self) {
        let mut phone = self.phone;
        if let Some(input) = self.focused_input_mut() {
            phone.cycle_region(&mut input.value);
        }
        self.phone = phone;
        self.status_message = Some(format!(
            "Region: {} ({})",
            phone.region.label(),
            phone.region.dial_code()
        ));
        self.save();
    }

    /// Move focus to the first group that failed validation
    fn focus_first_error(&mut self) {
        if let Some(group) = self.steps.current_step().and_then(Step::first_error_group) {
            self.focus = Focus::Input { group, input: 0 };
        }
    }

    fn validate_current(&mut self) -> bool {
        let phone = self.phone;
        let valid = self
            .steps
            .current_step_mut()
            .is_some_and(|step| validate_step(step, &phone));
        if !valid {
            self.focus_first_error();
        }
        valid
    }

    /// Validate, send the partial lead when leaving the first step, advance
    pub fn next_step(&mut self) {
        if self.steps.is_success() || !self.validate_current() {
            return;
        }

        if self.steps.current() == 0 {
            self.save();
            if let Some(handle) = self.submitter.send_partial(&mut self.store) {
                self.dispatches.push(handle);
            }
        }

        let next = self.steps.current() as isize + 1;
        self.show_step(next);
    }

    /// Go back one step without validation
    pub fn prev_step(&mut self) {
        if self.steps.is_success() {
            return;
        }
        let prev = self.steps.current() as isize - 1;
        self.show_step(prev);
    }

    /// Validate the last step, send the full lead and show the success view.
    ///
    /// Stored answers are cleared right after dispatch whatever the outcome.
    pub fn submit(&mut self) {
        if self.steps.is_success() || !self.validate_current() {
            return;
        }

        self.dispatches.push(self.submitter.send_full(&self.store));
        self.steps.finish();
        self.store.clear();
        tracing::info!("Assessment submitted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::{CrmError, MockLeadSink};
    use crate::state::FieldValue;
    use crate::storage::{MemoryStore, FORM_STATE_KEY, PARTIAL_LEAD_SENT_KEY};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(sink: MockLeadSink, storage: MemoryStore) -> App {
        let submitter = LeadSubmitter::new(Arc::new(sink));
        App::new(&AppConfig::default(), Box::new(storage), submitter)
    }

    fn accepting_sink(times: usize) -> MockLeadSink {
        let mut sink = MockLeadSink::new();
        sink.expect_create_lead()
            .times(times)
            .returning(|_| Ok(json!({"Status": "Success"})));
        sink
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Fill name, age and mobile on the first step, leaving focus on Next
    fn fill_first_step(app: &mut App) {
        app.focus = Focus::Input { group: 0, input: 0 };
        type_text(app, "A");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "30");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "9876543210");
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Button(NavButton::Next));
    }

    /// Select the first option of every choice group on the current step
    fn answer_choices(app: &mut App) {
        let step = app.steps.current_step().unwrap().clone();
        for (g, group) in step.groups.iter().enumerate() {
            if group.inputs[0].kind.is_choice() {
                app.focus = Focus::Input { group: g, input: 0 };
                app.handle_key(key(KeyCode::Char(' ')));
            }
        }
    }

    async fn drain(app: &mut App) {
        for handle in app.dispatches.drain(..) {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_starts_on_first_step() {
        let app = app_with(accepting_sink(0), MemoryStore::new());
        assert_eq!(app.steps.current(), 0);
        assert!(app.steps.is_active(0));
        assert_eq!(app.steps.progress_percent(), 0);
        assert_eq!(app.focus, Focus::Input { group: 0, input: 0 });
        assert_eq!(app.buttons(), vec![NavButton::Next]);
    }

    #[tokio::test]
    async fn test_invalid_step_blocks_next() {
        let mut app = app_with(accepting_sink(0), MemoryStore::new());
        app.next_step();
        assert_eq!(app.steps.current(), 0);
        let step = app.steps.current_step().unwrap();
        assert_eq!(step.groups[0].error.as_deref(), Some("This field is required"));
        assert_eq!(step.groups[2].error.as_deref(), Some("Enter a valid mobile number"));
        assert!(app.is_animating());
        assert_eq!(app.focus, Focus::Input { group: 0, input: 0 });
        assert!(app.dispatches.is_empty());
    }

    #[tokio::test]
    async fn test_phone_typing_is_digit_only_and_capped() {
        let storage = MemoryStore::new();
        let mut app = app_with(accepting_sink(0), storage);
        app.focus = Focus::Input { group: 2, input: 0 };
        type_text(&mut app, "98a7-6543210999");

        assert_eq!(app.focused_input().unwrap().value, "9876543210");
        assert_eq!(app.store.state().text("mobile"), "9876543210");
        assert_eq!(app.status_message.as_deref(), None);

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.status_message.as_deref(), Some("Digits only"));
    }

    #[tokio::test]
    async fn test_partial_lead_sent_once_when_leaving_first_step() {
        let mut sink = MockLeadSink::new();
        sink.expect_create_lead()
            .withf(|payload| {
                payload.value("FirstName") == Some("A")
                    && payload.value("Age") == Some("30")
                    && payload.value("Phone") == Some("9876543210")
                    && payload.value("LeadSource") == Some("Hair Assessment - Partial")
                    && payload.value("LeadStage") == Some("Incomplete")
            })
            .times(1)
            .returning(|_| Ok(json!({"Status": "Success"})));
        let storage = MemoryStore::new();
        let mut app = app_with(sink, storage.clone());

        fill_first_step(&mut app);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.steps.current(), 1);
        assert_eq!(app.dispatches.len(), 1);
        assert_eq!(storage.get(PARTIAL_LEAD_SENT_KEY).as_deref(), Some("true"));
        drain(&mut app).await;

        app.prev_step();
        assert_eq!(app.steps.current(), 0);
        app.next_step();
        assert_eq!(app.steps.current(), 1);
        assert!(app.dispatches.is_empty());
    }

    #[tokio::test]
    async fn test_prev_skips_validation_and_stops_at_first_step() {
        let mut app = app_with(accepting_sink(1), MemoryStore::new());
        fill_first_step(&mut app);
        app.next_step();
        assert_eq!(app.steps.current(), 1);

        // Step 1 is unanswered, going back still works
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.steps.current(), 0);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.steps.current(), 0);
        drain(&mut app).await;
    }

    #[tokio::test]
    async fn test_show_step_out_of_range_keeps_active_step() {
        let mut app = app_with(accepting_sink(0), MemoryStore::new());
        let count = app.steps.step_count() as isize;
        assert!(!app.show_step(-1));
        assert!(!app.show_step(count));
        assert!(app.steps.is_active(0));
    }

    #[tokio::test]
    async fn test_none_chip_is_exclusive() {
        let storage = MemoryStore::new();
        let mut app = app_with(accepting_sink(0), storage);
        let conditions = app
            .steps
            .steps()
            .iter()
            .position(|s| s.inputs().any(|i| i.name == "conditions"))
            .unwrap();
        app.show_step(conditions as isize);

        let none = app.steps.current_step().unwrap().groups[0]
            .inputs
            .iter()
            .position(|i| i.is_none_option())
            .unwrap();
        for input in [0, 1] {
            app.focus = Focus::Input { group: 0, input };
            app.handle_key(key(KeyCode::Char(' ')));
        }
        assert_eq!(
            app.store.state().get("conditions"),
            Some(&FieldValue::Multi(vec!["thyroid".into(), "anaemia".into()]))
        );

        app.focus = Focus::Input { group: 0, input: none };
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.store.state().get("conditions"),
            Some(&FieldValue::Multi(vec!["none".into()]))
        );

        app.focus = Focus::Input { group: 0, input: 1 };
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(
            app.store.state().get("conditions"),
            Some(&FieldValue::Multi(vec!["anaemia".into()]))
        );
    }

    #[tokio::test]
    async fn test_answers_survive_restart() {
        let storage = MemoryStore::new();
        {
            let mut app = app_with(accepting_sink(0), storage.clone());
            app.focus = Focus::Input { group: 0, input: 0 };
            type_text(&mut app, "Asha");
            app.show_step(5);
            app.focus = Focus::Input { group: 1, input: 0 };
            type_text(&mut app, "a@b.co");
        }

        let mut app = app_with(accepting_sink(0), storage);
        assert_eq!(app.focused_input().unwrap().value, "Asha");

        // Typing on the first step must not wipe answers of later steps
        type_text(&mut app, "!");
        assert_eq!(app.store.state().text("email"), "a@b.co");
        app.show_step(5);
        assert_eq!(
            app.steps.current_step().unwrap().groups[1].inputs[0].value,
            "a@b.co"
        );
    }

    #[tokio::test]
    async fn test_full_submission_clears_storage_even_when_send_fails() {
        let mut sink = MockLeadSink::new();
        sink.expect_create_lead()
            .withf(|payload| payload.value("LeadStage") == Some("Incomplete"))
            .times(1)
            .returning(|_| Ok(json!({"Status": "Success"})));
        sink.expect_create_lead()
            .withf(|payload| {
                payload.value("LeadStage") == Some("Completed")
                    && payload.value("EmailAddress") == Some("a@b.co")
                    && payload.value("Gender") == Some("male")
            })
            .times(1)
            .returning(|_| {
                Err(CrmError::Status {
                    status: 502,
                    body: "bad gateway".to_string(),
                })
            });
        let storage = MemoryStore::new();
        let mut app = app_with(sink, storage.clone());

        fill_first_step(&mut app);
        app.next_step();
        while !app.steps.is_last() {
            answer_choices(&mut app);
            app.next_step();
        }
        answer_choices(&mut app);
        app.focus = Focus::Input { group: 1, input: 0 };
        type_text(&mut app, "a@b.co");
        assert_eq!(app.buttons(), vec![NavButton::Back, NavButton::Submit]);
        assert!(storage.contains(FORM_STATE_KEY));

        app.focus = Focus::Button(NavButton::Submit);
        app.handle_key(key(KeyCode::Enter));

        assert!(app.steps.is_success());
        assert_eq!(app.steps.progress_percent(), 100);
        assert!(!storage.contains(FORM_STATE_KEY));
        assert!(!storage.contains(PARTIAL_LEAD_SENT_KEY));
        drain(&mut app).await;

        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_submit_requires_valid_last_step() {
        let mut app = app_with(accepting_sink(0), MemoryStore::new());
        let last = app.steps.step_count() as isize - 1;
        app.show_step(last);
        app.submit();
        assert!(!app.steps.is_success());
        assert!(app.dispatches.is_empty());
    }

    #[tokio::test]
    async fn test_focus_wraps_around() {
        let mut app = app_with(accepting_sink(0), MemoryStore::new());
        let slots = app.focus_slots();
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus, *slots.last().unwrap());
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, slots[0]);
    }

    #[tokio::test]
    async fn test_restored_phone_is_capped_for_india() {
        let storage = MemoryStore::new();
        let mut app = app_with(accepting_sink(0), storage.clone());
        app.focus = Focus::Input { group: 2, input: 0 };
        app.handle_key(key(KeyCode::F(2)));
        assert_eq!(app.phone.region, phone::Region::UnitedStates);
        type_text(&mut app, "212555012399");
        assert_eq!(app.store.state().text("mobile"), "212555012399");

        let mut app = app_with(accepting_sink(0), storage.clone());
        assert_eq!(app.phone.region, phone::Region::India);
        let mobile = &app.steps.current_step().unwrap().groups[2].inputs[0].value;
        assert_eq!(mobile, "2125550123");

        app.focus = Focus::Input { group: 0, input: 0 };
        type_text(&mut app, "A");
        assert_eq!(app.store.state().text("mobile"), "2125550123");
    }

    #[tokio::test]
    async fn test_f2_cycles_region_on_phone_field() {
        let mut app = app_with(accepting_sink(0), MemoryStore::new());
        app.focus = Focus::Input { group: 2, input: 0 };
        app.handle_key(key(KeyCode::F(2)));
        assert_eq!(app.phone.region, phone::Region::UnitedStates);
        assert!(app.status_message.as_deref().unwrap().contains("+1"));
    }
}
