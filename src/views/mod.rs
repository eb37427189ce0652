// ============================================================================
// VIEWS - DOM rendering (no logic beyond wiring events to view-models)
// ============================================================================

pub mod dashboard;
pub mod login;
pub mod navbar;
pub mod product_form;
pub mod product_list;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::{AppState, Route};

/// Whole page for the current route.
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let page = match state.route() {
        Route::Login => login::render_login(state)?,
        Route::Dashboard => dashboard::render_dashboard(state)?,
    };

    let main = ElementBuilder::new("main")?.class("app-main").child(page)?.build();

    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(navbar::render_navbar(state)?)?
        .child(main)?
        .build())
}
