// ============================================================================
// DASHBOARD VIEW - Header, status line, product table, open form
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent};

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::{AppState, LoadState, Route};
use crate::utils::{format_amount, format_count};
use crate::viewmodels::DashboardViewModel;
use crate::views::{product_form::render_product_form, product_list::render_product_list};

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let vm = DashboardViewModel::new(state.clone());
    let loading = state.products.is_loading();

    let section = ElementBuilder::new("section")?.class("dashboard").build();
    append_child(&section, &render_header(&vm, loading)?)?;

    match state.products.status() {
        LoadState::Loading => {
            append_child(&section, &ElementBuilder::new("p")?.class("loading").text("Loading products...").build())?;
        }
        LoadState::Failed(message) => {
            append_child(&section, &ElementBuilder::new("p")?.class("alert alert-error").text(&message).build())?;
        }
        LoadState::Loaded | LoadState::Idle => {
            let rows = vm.rows();
            if rows.is_empty() {
                append_child(&section, &ElementBuilder::new("p")?.class("empty").text("No products yet").build())?;
            } else {
                append_child(&section, &render_summary(state)?)?;
                append_child(&section, &render_product_list(&vm, rows)?)?;
            }
        }
    }

    if let Some(form) = vm.current_form() {
        append_child(&section, &render_product_form(&vm, &form)?)?;
    }

    Ok(section)
}

fn render_header(vm: &DashboardViewModel, loading: bool) -> Result<Element, JsValue> {
    let refresh = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("type", "button")?
        .flag("disabled", loading)?
        .text(if loading { "Refreshing..." } else { "Refresh" })
        .build();
    {
        let vm = vm.clone();
        on_click(&refresh, move |_| {
            let vm = vm.clone();
            spawn_local(async move {
                let _ = vm.load().await;
            });
        })?;
    }

    // Mutation affordances only for a session whose token is still stored
    let add = if vm.state().can_mutate() {
        let add = ElementBuilder::new("button")?
            .class("btn btn-primary")
            .attr("type", "button")?
            .text("Add product")
            .build();
        let vm = vm.clone();
        on_click(&add, move |_| {
            vm.open_create();
        })?;
        add
    } else {
        login_link(vm, "Log in to add products")?
    };

    Ok(ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(ElementBuilder::new("h1")?.text("Products").build())?
        .child(
            ElementBuilder::new("div")?
                .class("dashboard-actions")
                .child(refresh)?
                .child(add)?
                .build(),
        )?
        .build())
}

/// Read-only fallback: a link to the login page.
pub fn login_link(vm: &DashboardViewModel, label: &str) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .class("btn btn-link")
        .attr("href", Route::Login.path())?
        .text(label)
        .build();
    let state = vm.state().clone();
    on_click(&link, move |event: MouseEvent| {
        event.prevent_default();
        state.navigate(Route::Login);
    })?;
    Ok(link)
}

fn render_summary(state: &AppState) -> Result<Element, JsValue> {
    let mut text = format!(
        "{} products · stock value {}",
        format_count(state.products.products().len()),
        format_amount(state.products.total_stock_value())
    );
    if let Some(at) = state.products.last_loaded_at() {
        text.push_str(&format!(" · updated {}", at.format("%H:%M:%S")));
    }
    Ok(ElementBuilder::new("p")?.class("dashboard-summary").text(&text).build())
}
