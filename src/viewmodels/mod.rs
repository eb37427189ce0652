// ============================================================================
// VIEWMODELS - Form state machines and dashboard orchestration
// ============================================================================

pub mod dashboard_viewmodel;
pub mod login_viewmodel;
pub mod product_form_viewmodel;

pub use dashboard_viewmodel::{DashboardViewModel, ProductRow};
pub use login_viewmodel::{LoginDraft, LoginOutcome, LoginPhase, LoginViewModel};
pub use product_form_viewmodel::{FormMode, FormOutcome, FormPhase, ProductDraft, ProductFormViewModel};
