// ============================================================================
// PRODUCT FORM VIEWMODEL - Create/edit form state machine
// ============================================================================
// Mode (create or edit) is fixed per instance; editing another product means
// a new instance. Editing -> Submitting -> Succeeded | Failed(message).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{Product, ProductFields};
use crate::services::ApiClient;

#[derive(Clone, Debug, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Product),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: f64,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            quantity: product.quantity,
            price: product.price,
        }
    }

    /// Only name and SKU are required.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.sku.trim().is_empty()
    }

    pub fn to_fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            quantity: self.quantity,
            price: self.price,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Succeeded(String),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormOutcome {
    /// Nothing sent (already submitting, incomplete draft, no form, no session).
    Ignored,
    Saved(Product),
    Failed(ApiError),
}

#[derive(Clone)]
pub struct ProductFormViewModel {
    mode: Rc<FormMode>,
    draft: Rc<RefCell<ProductDraft>>,
    phase: Rc<RefCell<FormPhase>>,
    field_error: Rc<RefCell<Option<String>>>,
}

impl ProductFormViewModel {
    /// Blank create form.
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create, ProductDraft::default())
    }

    /// Edit form pre-filled from `product`.
    pub fn edit(product: &Product) -> Self {
        Self::with_mode(FormMode::Edit(product.clone()), ProductDraft::from_product(product))
    }

    fn with_mode(mode: FormMode, draft: ProductDraft) -> Self {
        Self {
            mode: Rc::new(mode),
            draft: Rc::new(RefCell::new(draft)),
            phase: Rc::new(RefCell::new(FormPhase::Editing)),
            field_error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(*self.mode, FormMode::Edit(_))
    }

    /// Heading for the modal.
    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit product"
        } else {
            "New product"
        }
    }

    /// Button text for the current phase and mode.
    pub fn submit_label(&self) -> &'static str {
        match (self.is_submitting(), self.is_edit()) {
            (true, _) => "Saving...",
            (false, true) => "Save changes",
            (false, false) => "Add product",
        }
    }

    /// Whether `other` is a handle to this same form instance.
    pub fn same_instance(&self, other: &ProductFormViewModel) -> bool {
        Rc::ptr_eq(&self.phase, &other.phase)
    }

    /// Snapshot of the entered values.
    pub fn draft(&self) -> ProductDraft {
        self.draft.borrow().clone()
    }

    /// Current phase
    pub fn phase(&self) -> FormPhase {
        self.phase.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        *self.phase.borrow() == FormPhase::Submitting
    }

    /// Inputs are locked while a request runs and after a save, until the
    /// form is closed.
    pub fn accepts_input(&self) -> bool {
        matches!(*self.phase.borrow(), FormPhase::Editing | FormPhase::Failed(_))
    }

    /// Submit is enabled only for an open, complete draft.
    pub fn can_submit(&self) -> bool {
        self.accepts_input() && self.draft.borrow().is_complete()
    }

    /// Cancel is refused while a request runs.
    pub fn can_cancel(&self) -> bool {
        !self.is_submitting()
    }

    /// Inline message from the last rejected numeric input.
    pub fn field_error(&self) -> Option<String> {
        self.field_error.borrow().clone()
    }

    /// `Some(price × quantity)` once a price is entered, for the preview line.
    pub fn stock_value(&self) -> Option<f64> {
        let draft = self.draft.borrow();
        (draft.price > 0.0).then(|| draft.price * f64::from(draft.quantity))
    }

    /// Draft setters do not notify: the view keeps its inputs.
    pub fn set_name(&self, name: &str) {
        self.draft.borrow_mut().name = name.to_string();
    }

    pub fn set_sku(&self, sku: &str) {
        self.draft.borrow_mut().sku = sku.to_string();
    }

    /// Bad input leaves the previous value in place and sets the field error.
    pub fn set_quantity(&self, input: &str) -> Result<(), String> {
        let parsed = parse_quantity(input);
        self.apply_numeric(parsed, |draft, value| draft.quantity = value)
    }

    pub fn set_price(&self, input: &str) -> Result<(), String> {
        let parsed = parse_price(input);
        self.apply_numeric(parsed, |draft, value| draft.price = value)
    }

    fn apply_numeric<T>(
        &self,
        parsed: Result<T, String>,
        apply: impl FnOnce(&mut ProductDraft, T),
    ) -> Result<(), String> {
        match parsed {
            Ok(value) => {
                apply(&mut *self.draft.borrow_mut(), value);
                *self.field_error.borrow_mut() = None;
                Ok(())
            }
            Err(message) => {
                *self.field_error.borrow_mut() = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Enter `Submitting` and hand out the request body, or `None` when the
    /// form cannot submit right now.
    pub fn begin_submit(&self) -> Option<ProductFields> {
        if !self.can_submit() {
            return None;
        }
        *self.phase.borrow_mut() = FormPhase::Submitting;
        Some(self.draft.borrow().to_fields())
    }

    /// Apply the API result. Success resets the draft; failure keeps it.
    pub fn finish_submit(&self, result: Result<Product, ApiError>) -> FormOutcome {
        match result {
            Ok(product) => {
                let message = if self.is_edit() {
                    "Product updated"
                } else {
                    "Product created"
                };
                log::info!("✅ [FORM] {} (id {})", message, product.id);
                *self.draft.borrow_mut() = ProductDraft::default();
                *self.phase.borrow_mut() = FormPhase::Succeeded(message.to_string());
                FormOutcome::Saved(product)
            }
            Err(err) => {
                log::warn!("⚠️ [FORM] Save failed: {}", err);
                *self.phase.borrow_mut() = FormPhase::Failed(err.user_message());
                FormOutcome::Failed(err)
            }
        }
    }

    /// Create or update through the API, depending on the mode, with the
    /// fields handed out by `begin_submit`.
    pub async fn send(&self, api: &ApiClient, fields: &ProductFields) -> FormOutcome {
        let result = match &*self.mode {
            FormMode::Create => api.create_product(fields).await,
            FormMode::Edit(product) => api.update_product(product.id, fields).await,
        };
        self.finish_submit(result)
    }
}

/// Empty means zero. Only whole, non-negative numbers are accepted.
pub fn parse_quantity(input: &str) -> Result<u32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = input.parse::<u32>() {
        return Ok(value);
    }
    match input.parse::<f64>() {
        Ok(value) if value < 0.0 => Err("Quantity cannot be negative".to_string()),
        _ => Err("Quantity must be a whole number".to_string()),
    }
}

/// Empty means zero. Any finite, non-negative number is accepted.
pub fn parse_price(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }
    match input.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err("Price must be a number".to_string()),
        Ok(value) if value < 0.0 => Err("Price cannot be negative".to_string()),
        Ok(value) => Ok(value),
        Err(_) => Err("Price must be a number".to_string()),
    }
}
