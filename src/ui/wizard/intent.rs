use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardIntent {
    Next,
    Previous,
    /// A section reported the validity of its bound data.
    SetValidity { step_id: String, valid: bool },
    /// Validity change coming from whichever section is on screen.
    SetCurrentValidity(bool),
}

impl Intent for WizardIntent {}
