//! Controller behind the listing creation wizard.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::auth::AuthService;
use crate::listing::{
    CategoryName, CreatedListing, Description, LandlordListingService, NewListing,
    NewListingInfo, NewListingPicture, PriceVO,
};
use crate::state::{AsyncState, FailureInfo, Status};
use crate::ui::mvi::Reducer;
use crate::ui::wizard::{
    WizardIntent, WizardReducer, WizardState, CATEGORY, DESCRIPTION, INFO, LOCATION, PHOTOS, PRICE,
};

/// Fewest pictures a listing can be published with.
pub const MIN_PICTURES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("steps not completed: {}", .0.join(", "))]
    IncompleteSteps(Vec<String>),
    #[error("a listing is already being created")]
    InProgress,
}

/// What the create store's latest state means for the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Uuid),
    Failed(FailureInfo),
}

fn category_is_valid(category: CategoryName) -> bool {
    category != CategoryName::All
}

fn location_is_valid(location: &str) -> bool {
    !location.trim().is_empty()
}

fn info_is_valid(info: &NewListingInfo) -> bool {
    [info.guests, info.bedrooms, info.beds, info.baths]
        .iter()
        .all(|count| count.value >= 1)
}

fn pictures_are_valid(pictures: &[NewListingPicture]) -> bool {
    pictures.len() >= MIN_PICTURES
}

fn description_is_valid(description: &Description) -> bool {
    !description.title.value.trim().is_empty() && !description.description.value.trim().is_empty()
}

fn price_is_valid(price: PriceVO) -> bool {
    price.value > 0
}

/// Owns the wizard and the draft listing; each section's change handler
/// stores its data and the validity of the step it belongs to.
pub struct ListingCreateController {
    wizard: WizardState,
    draft: NewListing,
    loading: bool,
    service: Arc<LandlordListingService>,
    auth: Arc<AuthService>,
}

impl ListingCreateController {
    pub fn new(service: Arc<LandlordListingService>, auth: Arc<AuthService>) -> Self {
        Self {
            wizard: WizardState::listing_creation(),
            draft: NewListing::default(),
            loading: false,
            service,
            auth,
        }
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn draft(&self) -> &NewListing {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dispatch(&mut self, intent: WizardIntent) {
        let state = std::mem::take(&mut self.wizard);
        self.wizard = WizardReducer::reduce(state, intent);
    }

    pub fn next_step(&mut self) {
        self.dispatch(WizardIntent::Next);
    }

    pub fn previous_step(&mut self) {
        self.dispatch(WizardIntent::Previous);
    }

    fn mark(&mut self, step_id: &str, valid: bool) {
        self.dispatch(WizardIntent::SetValidity {
            step_id: step_id.to_string(),
            valid,
        });
    }

    pub fn on_category_change(&mut self, category: CategoryName) {
        self.draft.category = category;
        self.mark(CATEGORY, category_is_valid(category));
    }

    pub fn on_location_change(&mut self, location: impl Into<String>) {
        self.draft.location = location.into();
        let valid = location_is_valid(&self.draft.location);
        self.mark(LOCATION, valid);
    }

    pub fn on_info_change(&mut self, info: NewListingInfo) {
        self.draft.infos = info;
        self.mark(INFO, info_is_valid(&info));
    }

    pub fn on_picture_change(&mut self, pictures: Vec<NewListingPicture>) {
        let valid = pictures_are_valid(&pictures);
        self.draft.pictures = pictures;
        self.mark(PHOTOS, valid);
    }

    pub fn on_description_change(&mut self, description: Description) {
        let valid = description_is_valid(&description);
        self.draft.description = description;
        self.mark(DESCRIPTION, valid);
    }

    pub fn on_price_change(&mut self, price: PriceVO) {
        self.draft.price = price;
        self.mark(PRICE, price_is_valid(price));
    }

    /// Send the draft if every step is valid.
    ///
    /// A created listing makes its owner a landlord, so on success the
    /// session is re-synced to pick up the new authority.
    pub async fn submit(&mut self) -> Result<Status, SubmitError> {
        if self.loading {
            return Err(SubmitError::InProgress);
        }
        if !self.wizard.all_valid() {
            return Err(SubmitError::IncompleteSteps(self.wizard.invalid_steps()));
        }

        self.loading = true;
        let status = self.service.create(self.draft.clone()).await;
        if status == Status::Ok {
            self.auth.fetch(true).await;
        }
        Ok(status)
    }

    /// React to a create-store transition.
    pub fn on_create_state(&mut self, state: &AsyncState<CreatedListing>) -> Option<CreateOutcome> {
        let outcome = match state {
            AsyncState::Init => return None,
            AsyncState::Ok(created) => CreateOutcome::Created(created.public_id),
            AsyncState::Error(failure) => CreateOutcome::Failed(failure.clone()),
        };
        self.loading = false;
        Some(outcome)
    }

    /// Leave the create store ready for the next dialog.
    pub fn teardown(&mut self) {
        self.service.reset_listing_creation();
        self.loading = false;
    }
}
