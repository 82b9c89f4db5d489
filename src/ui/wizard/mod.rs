//! Multi-step form wizard.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Step chain and current position
//! - `intent.rs` - Navigation and validity changes
//! - `reducer.rs` - State transitions

mod intent;
mod reducer;
mod state;

pub use intent::WizardIntent;
pub use reducer::WizardReducer;
pub use state::{
    Step, WizardError, WizardState, CATEGORY, DESCRIPTION, INFO, LISTING_CREATION_STEPS, LOCATION,
    PHOTOS, PRICE,
};
