//! Step graph of a multi-page form.

use std::collections::HashSet;

use thiserror::Error;

use crate::ui::mvi::UiState;

pub const CATEGORY: &str = "category";
pub const LOCATION: &str = "location";
pub const INFO: &str = "info";
pub const PHOTOS: &str = "photos";
pub const DESCRIPTION: &str = "description";
pub const PRICE: &str = "price";

/// Step order of the listing creation wizard.
pub const LISTING_CREATION_STEPS: [&str; 6] = [CATEGORY, LOCATION, INFO, PHOTOS, DESCRIPTION, PRICE];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,
    #[error("step ids must not be empty")]
    EmptyId,
    #[error("duplicate step id '{0}'")]
    DuplicateId(String),
}

/// One page of the wizard. Links are indices into the step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub next: Option<usize>,
    pub previous: Option<usize>,
    pub is_valid: bool,
}

/// Linked chain of steps plus the current position.
///
/// `current` is always a valid index. Navigation never looks at validity;
/// each step's owner keeps its flag up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    steps: Vec<Step>,
    current: usize,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::listing_creation()
    }
}

impl UiState for WizardState {}

impl WizardState {
    /// Chain `ids` in order, first step current, every step invalid.
    pub fn new<I, S>(ids: I) -> Result<Self, WizardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(WizardError::NoSteps);
        }

        let mut seen = HashSet::new();
        for id in &ids {
            if id.is_empty() {
                return Err(WizardError::EmptyId);
            }
            if !seen.insert(id.as_str()) {
                return Err(WizardError::DuplicateId(id.clone()));
            }
        }

        let last = ids.len() - 1;
        let steps = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| Step {
                id,
                next: (index < last).then_some(index + 1),
                previous: index.checked_sub(1),
                is_valid: false,
            })
            .collect();

        Ok(Self { steps, current: 0 })
    }

    /// The six-step listing creation wizard.
    pub fn listing_creation() -> Self {
        let steps = LISTING_CREATION_STEPS
            .iter()
            .enumerate()
            .map(|(index, id)| Step {
                id: (*id).to_string(),
                next: (index + 1 < LISTING_CREATION_STEPS.len()).then_some(index + 1),
                previous: index.checked_sub(1),
                is_valid: false,
            })
            .collect();
        Self { steps, current: 0 }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_first(&self) -> bool {
        self.current_step().previous.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.current_step().next.is_none()
    }

    /// Move to the next step; no-op on the last one.
    pub fn next(&mut self) {
        if let Some(next) = self.current_step().next {
            self.current = next;
        }
    }

    /// Move to the previous step; no-op on the first one.
    pub fn previous(&mut self) {
        if let Some(previous) = self.current_step().previous {
            self.current = previous;
        }
    }

    /// Set the named step's flag. Returns false if no step has that id.
    pub fn set_validity(&mut self, step_id: &str, is_valid: bool) -> bool {
        match self.steps.iter_mut().find(|step| step.id == step_id) {
            Some(step) => {
                step.is_valid = is_valid;
                true
            }
            None => false,
        }
    }

    pub fn set_current_validity(&mut self, is_valid: bool) {
        let current = self.current;
        self.steps[current].is_valid = is_valid;
    }

    /// Gate for the final submission.
    pub fn all_valid(&self) -> bool {
        self.steps.iter().all(|step| step.is_valid)
    }

    /// Ids of steps that still block submission.
    pub fn invalid_steps(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter(|step| !step.is_valid)
            .map(|step| step.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_creation_matches_generic_builder() {
        assert_eq!(
            WizardState::listing_creation(),
            WizardState::new(LISTING_CREATION_STEPS).unwrap()
        );
    }

    #[test]
    fn chain_links_are_consistent() {
        let wizard = WizardState::new(["a", "b", "c"]).unwrap();
        let steps = wizard.steps();
        assert_eq!(steps[0].previous, None);
        assert_eq!(steps[0].next, Some(1));
        assert_eq!(steps[1].previous, Some(0));
        assert_eq!(steps[1].next, Some(2));
        assert_eq!(steps[2].next, None);
        assert!(steps.iter().all(|s| !s.is_valid));
    }

    #[test]
    fn five_nexts_reach_last_and_sixth_is_noop() {
        let mut wizard = WizardState::listing_creation();
        for _ in 0..5 {
            wizard.next();
        }
        assert_eq!(wizard.current_step().id, PRICE);
        assert!(wizard.is_last());

        wizard.next();
        assert_eq!(wizard.current_step().id, PRICE);
    }

    #[test]
    fn previous_on_first_is_noop() {
        let mut wizard = WizardState::listing_creation();
        wizard.previous();
        assert_eq!(wizard.current_index(), 0);
        assert!(wizard.is_first());
    }

    #[test]
    fn navigation_ignores_validity() {
        let mut wizard = WizardState::listing_creation();
        wizard.next();
        wizard.next();
        assert_eq!(wizard.current_step().id, INFO);
        assert!(!wizard.step(CATEGORY).unwrap().is_valid);
    }

    #[test]
    fn all_valid_requires_every_step() {
        let mut wizard = WizardState::listing_creation();
        for (id, valid) in LISTING_CREATION_STEPS.iter().zip([true, true, false, true, true, true]) {
            wizard.set_validity(id, valid);
        }
        assert!(!wizard.all_valid());
        assert_eq!(wizard.invalid_steps(), vec![INFO.to_string()]);

        wizard.set_validity(INFO, true);
        assert!(wizard.all_valid());
    }

    #[test]
    fn set_validity_does_not_move() {
        let mut wizard = WizardState::listing_creation();
        assert!(wizard.set_validity(PRICE, true));
        assert_eq!(wizard.current_index(), 0);
        assert!(!wizard.set_validity("garage", true));
    }

    #[test]
    fn set_current_validity_targets_current_step() {
        let mut wizard = WizardState::listing_creation();
        wizard.next();
        wizard.set_current_validity(true);
        assert!(wizard.step(LOCATION).unwrap().is_valid);
        assert!(!wizard.step(CATEGORY).unwrap().is_valid);
    }

    #[test]
    fn rejects_bad_step_lists() {
        assert_eq!(WizardState::new(Vec::<String>::new()), Err(WizardError::NoSteps));
        assert_eq!(WizardState::new(["a", ""]), Err(WizardError::EmptyId));
        assert_eq!(
            WizardState::new(["a", "b", "a"]),
            Err(WizardError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn single_step_wizard_is_first_and_last() {
        let mut wizard = WizardState::new(["only"]).unwrap();
        wizard.next();
        wizard.previous();
        assert!(wizard.is_first() && wizard.is_last());
    }
}
