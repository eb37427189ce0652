// ============================================================================
// STATE MODULE - Rc<RefCell> stores with change notifications
// ============================================================================

pub mod app_state;
pub mod product_state;
pub mod reactivity;
pub mod route;
pub mod session_state;

pub use app_state::AppState;
pub use product_state::{LoadState, ProductStore};
pub use reactivity::Listeners;
pub use route::Route;
pub use session_state::SessionStore;
