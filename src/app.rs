// ============================================================================
// APP - Root element, full re-render, URL sync
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

use crate::dom::{append_child, current_path, get_element_by_id, set_inner_html, window};
use crate::state::{AppState, Route};
use crate::viewmodels::DashboardViewModel;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::bootstrap(&current_path());

        // Coalesce bursts of notifications into one render per tick
        let scheduled = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if scheduled.replace(true) {
                return;
            }
            let scheduled = scheduled.clone();
            Timeout::new(0, move || {
                scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self { state, root })
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.sync_url()?;
        set_inner_html(&self.root, "");
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)
    }

    /// Initial product fetch. The list is public, so it runs for everyone.
    pub fn load_products(&self) {
        let vm = DashboardViewModel::new(self.state.clone());
        spawn_local(async move {
            if let Err(err) = vm.load().await {
                log::error!("❌ [APP] Initial product load failed: {}", err);
            }
        });
    }

    /// Back/forward buttons. Registered once at startup.
    pub fn listen_popstate(&self) -> Result<(), JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        let state = self.state.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let route = Route::resolve(&current_path(), state.can_mutate());
            state.navigate(route);
        }) as Box<dyn FnMut(Event)>);
        win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    // Keep the address bar on the resolved route
    fn sync_url(&self) -> Result<(), JsValue> {
        let path = self.state.route().path();
        if current_path() == path {
            return Ok(());
        }
        if let Some(win) = window() {
            win.history()?.push_state_with_url(&JsValue::NULL, "", Some(path))?;
        }
        Ok(())
    }
}
