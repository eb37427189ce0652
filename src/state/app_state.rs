// ============================================================================
// APP STATE - Explicit context handed to view-models and views
// ============================================================================
// Built once at bootstrap. Owns the session, the product list, the API
// client, the current route and the open product form. Views never look up
// a global: they receive this object.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::ApiClient;
use crate::state::{Listeners, ProductStore, Route, SessionStore};
use crate::utils::constants::SESSION_EXPIRED_MESSAGE;
use crate::viewmodels::{LoginViewModel, ProductFormViewModel};

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub products: ProductStore,
    pub api: ApiClient,
    pub login: LoginViewModel,
    pub route: Rc<RefCell<Route>>,
    /// Open create/edit form, if any.
    pub form: Rc<RefCell<Option<ProductFormViewModel>>>,
    /// One-off message for the login screen (e.g. session expired).
    pub notice: Rc<RefCell<Option<String>>>,
    pub form_close_delay_ms: u32,
    listeners: Listeners,
}

impl AppState {
    /// Wire the stores together and resolve the first route from the URL path.
    pub fn new(session: SessionStore, api: ApiClient, form_close_delay_ms: u32, initial_path: &str) -> Self {
        let products = ProductStore::new();
        let listeners = Listeners::new();

        // Store changes bubble up to whoever renders the app
        {
            let listeners = listeners.clone();
            session.subscribe(move || listeners.notify());
        }
        {
            let listeners = listeners.clone();
            products.subscribe(move || listeners.notify());
        }

        let state = Self {
            route: Rc::new(RefCell::new(Route::Dashboard)),
            session,
            products,
            api,
            login: LoginViewModel::new(),
            form: Rc::new(RefCell::new(None)),
            notice: Rc::new(RefCell::new(None)),
            form_close_delay_ms,
            listeners,
        };
        *state.route.borrow_mut() = Route::resolve(initial_path, state.can_mutate());
        state
    }

    /// Browser wiring: localStorage, fetch and the compile-time config.
    #[cfg(target_arch = "wasm32")]
    pub fn bootstrap(initial_path: &str) -> Self {
        use crate::config::CONFIG;
        use crate::services::GlooTransport;
        use crate::utils::storage::{BrowserStorage, KeyValueStorage};

        let storage: Rc<dyn KeyValueStorage> = Rc::new(BrowserStorage);
        let session = SessionStore::load(storage, &CONFIG.token_storage_key);
        let api = ApiClient::new(&CONFIG.api_base_url, Rc::new(GlooTransport), session.clone());
        log::info!("🔧 [APP] API at {} ({})", CONFIG.api_base_url, CONFIG.environment);
        Self::new(session, api, CONFIG.form_close_delay_ms, initial_path)
    }

    /// Current page.
    pub fn route(&self) -> Route {
        *self.route.borrow()
    }

    /// Mutation gate. Checks the in-memory flag and the persisted token, so a
    /// token wiped behind our back downgrades the UI to read-only.
    pub fn can_mutate(&self) -> bool {
        self.session.is_authenticated() && self.session.has_persisted_token()
    }

    /// Go to `route`, re-resolved against the mutation gate.
    pub fn navigate(&self, route: Route) {
        let resolved = Route::resolve(route.path(), self.can_mutate());
        let changed = {
            let mut current = self.route.borrow_mut();
            let changed = *current != resolved;
            *current = resolved;
            changed
        };
        if changed {
            log::info!("🧭 [APP] Route -> {}", resolved.path());
            self.notify_subscribers();
        }
    }

    /// Explicit logout from the navbar.
    pub fn logout(&self) {
        *self.form.borrow_mut() = None;
        self.login.reset();
        self.session.clear();
        self.navigate(Route::Dashboard);
    }

    /// A 401 from any call: the token is dead, so drop it and ask for a new login.
    pub fn handle_unauthorized(&self) {
        log::warn!("⚠️ [APP] Token rejected by the API, logging out");
        *self.form.borrow_mut() = None;
        *self.notice.borrow_mut() = Some(SESSION_EXPIRED_MESSAGE.to_string());
        self.session.clear();
        self.navigate(Route::Login);
    }

    /// Consume the login-screen notice.
    pub fn take_notice(&self) -> Option<String> {
        self.notice.borrow_mut().take()
    }

    /// Peek at the login-screen notice.
    pub fn notice(&self) -> Option<String> {
        self.notice.borrow().clone()
    }

    /// Register a re-render callback
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.subscribe(callback);
    }

    /// Notify every re-render callback
    pub fn notify_subscribers(&self) {
        self.listeners.notify();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::services::mock_transport::MockTransport;
    use crate::utils::storage::MemoryStorage;

    pub fn app_state(storage: &MemoryStorage, transport: &MockTransport, path: &str) -> AppState {
        let session = SessionStore::load(Rc::new(storage.clone()), "token");
        let api = ApiClient::new("http://api.test", Rc::new(transport.clone()), session.clone());
        AppState::new(session, api, 0, path)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::app_state;
    use super::*;
    use crate::services::mock_transport::MockTransport;
    use crate::utils::storage::{KeyValueStorage, MemoryStorage};
    use std::cell::Cell;

    #[test]
    fn initial_route_follows_session() {
        let transport = MockTransport::new();
        let anonymous = app_state(&MemoryStorage::new(), &transport, "/login");
        assert_eq!(anonymous.route(), Route::Login);

        let signed_in = app_state(&MemoryStorage::with_entry("token", "abc"), &transport, "/login");
        assert_eq!(signed_in.route(), Route::Dashboard);
    }

    #[test]
    fn login_route_unreachable_when_authenticated() {
        let state = app_state(&MemoryStorage::with_entry("token", "abc"), &MockTransport::new(), "/");
        state.navigate(Route::Login);
        assert_eq!(state.route(), Route::Dashboard);
    }

    #[test]
    fn wiped_token_degrades_to_read_only() {
        let storage = MemoryStorage::with_entry("token", "abc");
        let state = app_state(&storage, &MockTransport::new(), "/");
        assert!(state.can_mutate());

        storage.remove("token").unwrap();
        assert!(state.session.is_authenticated());
        assert!(!state.can_mutate());

        state.navigate(Route::Login);
        assert_eq!(state.route(), Route::Login);
    }

    #[test]
    fn logout_clears_everything() {
        let storage = MemoryStorage::with_entry("token", "abc");
        let state = app_state(&storage, &MockTransport::new(), "/");
        *state.form.borrow_mut() = Some(ProductFormViewModel::create());

        state.logout();
        assert!(!state.session.is_authenticated());
        assert_eq!(storage.get("token").unwrap(), None);
        assert!(state.form.borrow().is_none());
        assert_eq!(state.route(), Route::Dashboard);
    }

    #[test]
    fn unauthorized_forces_login_with_notice() {
        let storage = MemoryStorage::with_entry("token", "stale");
        let state = app_state(&storage, &MockTransport::new(), "/");

        state.handle_unauthorized();
        assert!(!state.session.is_authenticated());
        assert_eq!(state.route(), Route::Login);
        assert_eq!(state.take_notice().as_deref(), Some(SESSION_EXPIRED_MESSAGE));
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn session_changes_reach_app_subscribers() {
        let state = app_state(&MemoryStorage::new(), &MockTransport::new(), "/");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.subscribe_to_changes(move || counter.set(counter.get() + 1));

        state.session.establish("t".to_string());
        assert_eq!(hits.get(), 1);
    }
}
