// ============================================================================
// DASHBOARD VIEWMODEL - Product list + form orchestration
// ============================================================================
// Consistency policy: a successful create or update is NEVER patched into the
// local list. After the confirmation delay the whole list is fetched again,
// and only then is the form closed. The table therefore always shows the
// last successful full fetch.
// ============================================================================

use crate::error::ApiError;
use crate::models::Product;
use crate::state::{AppState, Route};
use crate::utils::sleep_ms;
use crate::viewmodels::product_form_viewmodel::{FormOutcome, ProductFormViewModel};

/// One table row. `editable` is decided per render from the mutation gate.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductRow {
    pub product: Product,
    pub editable: bool,
}

#[derive(Clone)]
pub struct DashboardViewModel {
    state: AppState,
}

impl DashboardViewModel {
    /// View-model over the shared app state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Full load (initial fetch and the refresh button).
    pub async fn load(&self) -> Result<(), ApiError> {
        log::info!("📦 [PRODUCTS] Loading product list");
        let result = self.state.products.reload(&self.state.api).await;
        if let Err(err) = &result {
            if err.is_unauthorized() && self.state.session.is_authenticated() {
                self.state.handle_unauthorized();
            }
        }
        result
    }

    /// Rows to render: empty while loading or after a failed load.
    pub fn rows(&self) -> Vec<ProductRow> {
        let editable = self.state.can_mutate();
        self.state
            .products
            .visible_products()
            .into_iter()
            .map(|product| ProductRow { product, editable })
            .collect()
    }

    /// Form currently open, if any.
    pub fn current_form(&self) -> Option<ProductFormViewModel> {
        self.state.form.borrow().clone()
    }

    /// Open a blank create form. Returns false when refused.
    pub fn open_create(&self) -> bool {
        self.open_form(ProductFormViewModel::create)
    }

    /// Open an edit form pre-filled from `product`.
    pub fn open_edit(&self, product: &Product) -> bool {
        self.open_form(|| ProductFormViewModel::edit(product))
    }

    /// Anonymous users are sent to the login page instead of seeing a form.
    fn open_form(&self, build: impl FnOnce() -> ProductFormViewModel) -> bool {
        if !self.state.can_mutate() {
            log::info!("🔒 [PRODUCTS] Not signed in, redirecting to login");
            self.state.navigate(Route::Login);
            return false;
        }
        if self.current_form().is_some_and(|form| form.is_submitting()) {
            return false;
        }
        *self.state.form.borrow_mut() = Some(build());
        self.state.notify_subscribers();
        true
    }

    /// Cancel. Refused while a submission is running.
    pub fn close_form(&self) -> bool {
        if self.current_form().is_some_and(|form| !form.can_cancel()) {
            return false;
        }
        *self.state.form.borrow_mut() = None;
        self.state.notify_subscribers();
        true
    }

    /// Save the open form: send, confirm, wait, reload the whole list, close.
    pub async fn submit_form(&self) -> FormOutcome {
        let Some(form) = self.current_form() else {
            return FormOutcome::Ignored;
        };
        if !self.state.can_mutate() {
            self.state.navigate(Route::Login);
            return FormOutcome::Ignored;
        }
        let Some(fields) = form.begin_submit() else {
            return FormOutcome::Ignored;
        };
        self.state.notify_subscribers();

        let outcome = form.send(&self.state.api, &fields).await;
        self.state.notify_subscribers();

        match &outcome {
            FormOutcome::Saved(_) => {
                // Confirmation stays visible, then one full reload, then close
                sleep_ms(self.state.form_close_delay_ms).await;
                let _ = self.load().await;
                self.close_if_current(&form);
            }
            FormOutcome::Failed(err) if err.is_unauthorized() => {
                self.state.handle_unauthorized();
            }
            _ => {}
        }
        outcome
    }

    // The user may have closed or replaced the form meanwhile.
    fn close_if_current(&self, form: &ProductFormViewModel) {
        let is_current = self
            .current_form()
            .is_some_and(|current| current.same_instance(form));
        if is_current {
            *self.state.form.borrow_mut() = None;
            self.state.notify_subscribers();
        }
    }
}
