// ============================================================================
// PRODUCT STATE - Dashboard product list, replaced wholesale on every load
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::Product;
use crate::services::ApiClient;
use crate::state::Listeners;

/// One load cycle: `Idle -> Loading -> Loaded | Failed`.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Products as of the last successful full fetch. There is no patch or merge
/// operation: the list only changes through `finish_load`.
#[derive(Clone)]
pub struct ProductStore {
    products: Rc<RefCell<Vec<Product>>>,
    status: Rc<RefCell<LoadState>>,
    last_loaded_at: Rc<RefCell<Option<DateTime<Utc>>>>,
    load_count: Rc<Cell<u32>>,
    listeners: Listeners,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Empty store in `Idle`.
    pub fn new() -> Self {
        Self {
            products: Rc::new(RefCell::new(Vec::new())),
            status: Rc::new(RefCell::new(LoadState::Idle)),
            last_loaded_at: Rc::new(RefCell::new(None)),
            load_count: Rc::new(Cell::new(0)),
            listeners: Listeners::new(),
        }
    }

    /// Current load state
    pub fn status(&self) -> LoadState {
        self.status.borrow().clone()
    }

    /// True between `begin_load` and `finish_load`.
    pub fn is_loading(&self) -> bool {
        *self.status.borrow() == LoadState::Loading
    }

    /// Message of the last failed load, if that is the current state.
    pub fn error(&self) -> Option<String> {
        match &*self.status.borrow() {
            LoadState::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Last fetched list, regardless of the current state.
    pub fn products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    /// What the table should show: nothing while loading or after a failure
    /// (the stale list stays in memory behind the indicator).
    pub fn visible_products(&self) -> Vec<Product> {
        match &*self.status.borrow() {
            LoadState::Idle | LoadState::Loaded => self.products.borrow().clone(),
            LoadState::Loading | LoadState::Failed(_) => Vec::new(),
        }
    }

    /// Time of the last successful fetch.
    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        *self.last_loaded_at.borrow()
    }

    /// Number of load cycles started so far.
    pub fn load_count(&self) -> u32 {
        self.load_count.get()
    }

    /// Σ quantity × price over the last fetched list.
    pub fn total_stock_value(&self) -> f64 {
        self.products.borrow().iter().map(Product::stock_value).sum()
    }

    /// Enter `Loading`, dropping any previous error.
    pub fn begin_load(&self) {
        *self.status.borrow_mut() = LoadState::Loading;
        self.load_count.set(self.load_count.get() + 1);
        self.listeners.notify();
    }

    /// Close the cycle. Success replaces the whole list; failure keeps the old one.
    pub fn finish_load(&self, result: Result<Vec<Product>, ApiError>) -> Result<(), ApiError> {
        let outcome = match result {
            Ok(products) => {
                log::info!("✅ [PRODUCTS] List replaced ({} products)", products.len());
                *self.products.borrow_mut() = products;
                *self.last_loaded_at.borrow_mut() = Some(Utc::now());
                *self.status.borrow_mut() = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                log::error!("❌ [PRODUCTS] Load failed: {}", err);
                *self.status.borrow_mut() = LoadState::Failed(err.user_message());
                Err(err)
            }
        };
        self.listeners.notify();
        outcome
    }

    /// Full reload from the server.
    pub async fn reload(&self, api: &ApiClient) -> Result<(), ApiError> {
        self.begin_load();
        let result = api.list_products().await;
        self.finish_load(result)
    }

    /// Register a change callback
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_transport::MockTransport;
    use crate::state::SessionStore;
    use crate::utils::storage::MemoryStorage;
    use futures::executor::block_on;

    fn pen() -> Product {
        Product {
            id: 1,
            name: "Pen".to_string(),
            sku: "P-1".to_string(),
            quantity: 10,
            price: 2.5,
        }
    }

    fn client(transport: &MockTransport) -> ApiClient {
        let session = SessionStore::load(Rc::new(MemoryStorage::new()), "token");
        ApiClient::new("http://api.test", Rc::new(transport.clone()), session)
    }

    #[test]
    fn starts_idle_and_empty() {
        let store = ProductStore::new();
        assert_eq!(store.status(), LoadState::Idle);
        assert!(store.visible_products().is_empty());
        assert_eq!(store.load_count(), 0);
    }

    #[test]
    fn successful_reload_replaces_list_exactly() {
        let transport = MockTransport::new();
        transport.push_json(
            200,
            r#"{"data":[{"id":2,"name":"B","sku":"B-2","quantity":1,"price":1},{"id":1,"name":"Pen","sku":"P-1","quantity":10,"price":2.5}]}"#,
        );
        let store = ProductStore::new();

        block_on(store.reload(&client(&transport))).unwrap();

        assert_eq!(store.status(), LoadState::Loaded);
        let ids: Vec<u64> = store.visible_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(store.last_loaded_at().is_some());
        assert_eq!(store.load_count(), 1);
        assert!((store.total_stock_value() - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failure_keeps_previous_list_hidden() {
        let store = ProductStore::new();
        store.begin_load();
        store.finish_load(Ok(vec![pen()])).unwrap();

        store.begin_load();
        assert!(store.is_loading());
        assert!(store.visible_products().is_empty());

        let err = store
            .finish_load(Err(ApiError::Network("offline".to_string())))
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(store.error().as_deref(), Some("Network error: offline"));
        assert!(store.visible_products().is_empty());
        assert_eq!(store.products(), vec![pen()]);
    }

    #[test]
    fn retry_after_failure_clears_error() {
        let store = ProductStore::new();
        store.begin_load();
        let _ = store.finish_load(Err(ApiError::Network("offline".to_string())));

        store.begin_load();
        assert_eq!(store.error(), None);
        store.finish_load(Ok(vec![pen()])).unwrap();
        assert_eq!(store.visible_products(), vec![pen()]);
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn each_transition_notifies() {
        let store = ProductStore::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        store.subscribe(move || counter.set(counter.get() + 1));

        store.begin_load();
        store.finish_load(Ok(Vec::new())).unwrap();
        assert_eq!(hits.get(), 2);
    }
}
