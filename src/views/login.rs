// ============================================================================
// LOGIN VIEW
// ============================================================================
// Field edits go straight into the LoginViewModel draft without a re-render,
// so the inputs keep focus. Only the submit button is toggled in place.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_input, on_submit, set_flag, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::LoginViewModel;

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let vm = state.login.clone();
    let draft = vm.draft();
    let submitting = vm.is_submitting();

    let card = ElementBuilder::new("div")?
        .class("login-card")
        .child(ElementBuilder::new("h1")?.text("Sign in").build())?
        .build();

    if let Some(notice) = state.notice() {
        append_child(&card, &ElementBuilder::new("p")?.class("alert alert-info").text(&notice).build())?;
    }
    if let Some(error) = vm.error() {
        append_child(&card, &ElementBuilder::new("p")?.class("alert alert-error").text(&error).build())?;
    }

    let submit_btn = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .flag("disabled", !vm.can_submit())?
        .text(if submitting { "Signing in..." } else { "Sign in" })
        .build();

    let email = text_input("email", "Email", &draft.email, submitting)?;
    {
        let vm = vm.clone();
        let button = submit_btn.clone();
        on_input(&email, move |value| {
            vm.set_email(&value);
            sync_submit(&vm, &button);
        })?;
    }

    let password = text_input("password", "Password", &draft.password, submitting)?;
    {
        let vm = vm.clone();
        let button = submit_btn.clone();
        on_input(&password, move |value| {
            vm.set_password(&value);
            sync_submit(&vm, &button);
        })?;
    }

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .child(labelled("Email", email)?)?
        .child(labelled("Password", password)?)?
        .child(submit_btn)?
        .build();
    {
        let state = state.clone();
        on_submit(&form, move || {
            let state = state.clone();
            spawn_local(async move {
                state.login.submit(&state).await;
            });
        })?;
    }

    append_child(&card, &form)?;
    Ok(ElementBuilder::new("section")?.class("login-screen").child(card)?.build())
}

fn text_input(kind: &str, placeholder: &str, value: &str, disabled: bool) -> Result<Element, JsValue> {
    ElementBuilder::new("input")?
        .class("form-control")
        .attr("type", kind)?
        .attr("name", kind)?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .flag("required", true)?
        .flag("disabled", disabled)
        .map(ElementBuilder::build)
}

fn labelled(label: &str, input: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("label")?
        .class("form-group")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(input)?
        .build())
}

fn sync_submit(vm: &LoginViewModel, button: &Element) {
    let _ = set_flag(button, "disabled", !vm.can_submit());
}
