use crate::ui::mvi::Reducer;
use crate::ui::wizard::intent::WizardIntent;
use crate::ui::wizard::state::WizardState;

pub struct WizardReducer;

impl Reducer for WizardReducer {
    type State = WizardState;
    type Intent = WizardIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            WizardIntent::Next => state.next(),
            WizardIntent::Previous => state.previous(),
            WizardIntent::SetValidity { step_id, valid } => {
                if !state.set_validity(&step_id, valid) {
                    tracing::debug!(step = %step_id, "validity change for unknown wizard step");
                }
            }
            WizardIntent::SetCurrentValidity(valid) => state.set_current_validity(valid),
        }
        state
    }
}
