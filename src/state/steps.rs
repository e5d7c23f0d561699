//! Step panels and the step controller

use super::forms::{FormGroup, FormInput, FormStore};

/// One screen of the assessment
#[derive(Debug, Clone)]
pub struct Step {
    pub title: String,
    /// Index into the stage list shown in the header
    pub stage: usize,
    pub groups: Vec<FormGroup>,
}

impl Step {
    pub fn new(title: &str, stage: usize, groups: Vec<FormGroup>) -> Self {
        Self {
            title: title.to_string(),
            stage,
            groups,
        }
    }

    pub fn inputs(&self) -> impl Iterator<Item = &FormInput> {
        self.groups.iter().flat_map(|g| g.inputs.iter())
    }

    pub fn inputs_mut(&mut self) -> impl Iterator<Item = &mut FormInput> {
        self.groups.iter_mut().flat_map(|g| g.inputs.iter_mut())
    }

    /// Index of the first group carrying an error
    pub fn first_error_group(&self) -> Option<usize> {
        self.groups.iter().position(|g| g.error.is_some())
    }
}

/// What the form panel currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepView {
    Step(usize),
    /// Terminal view after the full lead was submitted
    Success,
}

/// Tracks the active step, the stage indicator and the progress bar
#[derive(Debug, Clone)]
pub struct StepController {
    steps: Vec<Step>,
    current: usize,
    view: StepView,
    progress: u16,
}

impl StepController {
    /// Build the controller at step 0. Call `show_step(0, ..)` to display it.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            current: 0,
            view: StepView::Step(0),
            progress: 0,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn view(&self) -> StepView {
        self.view
    }

    pub fn is_success(&self) -> bool {
        self.view == StepView::Success
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.view == StepView::Step(index)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current)
    }

    pub fn current_step_mut(&mut self) -> Option<&mut Step> {
        self.steps.get_mut(self.current)
    }

    /// Stage highlighted in the header
    pub fn active_stage(&self) -> Option<usize> {
        match self.view {
            StepView::Step(i) => self.steps.get(i).map(|s| s.stage),
            StepView::Success => None,
        }
    }

    /// Progress bar fill in percent
    pub fn progress_percent(&self) -> u16 {
        self.progress
    }

    /// Every input of every step, hidden ones included
    pub fn all_inputs(&self) -> impl Iterator<Item = &FormInput> {
        self.steps.iter().flat_map(|s| s.inputs())
    }

    pub fn all_inputs_mut(&mut self) -> impl Iterator<Item = &mut FormInput> {
        self.steps.iter_mut().flat_map(|s| s.inputs_mut())
    }

    /// Activate step `index`, restoring its stored answers.
    ///
    /// Out-of-range indices are ignored. Returns whether the step changed.
    pub fn show_step(&mut self, index: isize, store: &FormStore) -> bool {
        let Some(index) = usize::try_from(index)
            .ok()
            .filter(|i| *i < self.steps.len())
        else {
            tracing::debug!("Ignoring request to show step {index}");
            return false;
        };

        self.current = index;
        self.view = StepView::Step(index);
        store.restore(self.steps[index].inputs_mut());

        let last = self.steps.len() - 1;
        self.progress = if last == 0 {
            100
        } else {
            (index * 100 / last) as u16
        };
        tracing::debug!("Showing step {index} ({}%)", self.progress);
        true
    }

    /// Switch to the success view with a full progress bar
    pub fn finish(&mut self) {
        self.view = StepView::Success;
        self.progress = 100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldValue, FormInput};
    use crate::storage::MemoryStore;

    fn controller() -> StepController {
        StepController::new(vec![
            Step::new(
                "One",
                0,
                vec![FormGroup::new("Name", vec![FormInput::text("full_name", "Name")])],
            ),
            Step::new(
                "Two",
                0,
                vec![FormGroup::new("Email", vec![FormInput::email("email", "Email")])],
            ),
            Step::new("Three", 1, vec![]),
        ])
    }

    fn store() -> FormStore {
        FormStore::load(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_initial_state() {
        let mut steps = controller();
        assert!(steps.show_step(0, &store()));
        assert_eq!(steps.current(), 0);
        assert!(steps.is_active(0));
        assert_eq!(steps.progress_percent(), 0);
        assert_eq!(steps.active_stage(), Some(0));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let store = store();
        let mut steps = controller();
        steps.show_step(1, &store);

        assert!(!steps.show_step(-1, &store));
        assert!(!steps.show_step(3, &store));
        assert_eq!(steps.current(), 1);
        assert!(steps.is_active(1));
        assert_eq!(steps.progress_percent(), 50);
    }

    #[test]
    fn test_exactly_one_step_active() {
        let store = store();
        let mut steps = controller();
        steps.show_step(2, &store);
        let active: Vec<usize> = (0..steps.step_count())
            .filter(|i| steps.is_active(*i))
            .collect();
        assert_eq!(active, vec![2]);
        assert_eq!(steps.active_stage(), Some(1));
        assert_eq!(steps.progress_percent(), 100);
    }

    #[test]
    fn test_show_step_restores_answers() {
        let mut state_store = store();
        let mut answered = FormInput::email("email", "Email");
        answered.value = "a@b.co".to_string();
        state_store.save([&answered]);
        assert_eq!(
            state_store.state().get("email"),
            Some(&FieldValue::Single("a@b.co".into()))
        );

        let mut steps = controller();
        steps.show_step(1, &state_store);
        let restored = steps.current_step().unwrap().inputs().next().unwrap();
        assert_eq!(restored.value, "a@b.co");
    }

    #[test]
    fn test_finish_forces_full_progress() {
        let store = store();
        let mut steps = controller();
        steps.show_step(0, &store);
        steps.finish();
        assert!(steps.is_success());
        assert_eq!(steps.progress_percent(), 100);
        assert_eq!(steps.active_stage(), None);
        assert!(!steps.is_active(0));
    }

    #[test]
    fn test_single_step_progress_is_full() {
        let mut steps = StepController::new(vec![Step::new("Only", 0, vec![])]);
        steps.show_step(0, &store());
        assert_eq!(steps.progress_percent(), 100);
        assert!(steps.is_last());
    }
}
