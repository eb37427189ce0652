// ============================================================================
// NAVBAR VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::{on_click, ElementBuilder};
use crate::state::{AppState, Route};

pub fn render_navbar(state: &AppState) -> Result<Element, JsValue> {
    let brand = ElementBuilder::new("a")?
        .class("navbar-brand")
        .attr("href", Route::Dashboard.path())?
        .text("Inventory")
        .build();
    {
        let state = state.clone();
        on_click(&brand, move |event: MouseEvent| {
            event.prevent_default();
            state.navigate(Route::Dashboard);
        })?;
    }

    let action = if state.can_mutate() {
        let logout = ElementBuilder::new("button")?
            .class("btn btn-link navbar-logout")
            .attr("type", "button")?
            .text("Logout")
            .build();
        let state = state.clone();
        on_click(&logout, move |_| {
            log::info!("👋 [NAVBAR] Logout");
            state.logout();
        })?;
        logout
    } else {
        let login = ElementBuilder::new("a")?
            .class("navbar-login")
            .attr("href", Route::Login.path())?
            .text("Login")
            .build();
        let state = state.clone();
        on_click(&login, move |event: MouseEvent| {
            event.prevent_default();
            state.navigate(Route::Login);
        })?;
        login
    };

    Ok(ElementBuilder::new("nav")?
        .class("navbar")
        .child(brand)?
        .child(action)?
        .build())
}
