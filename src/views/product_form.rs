// ============================================================================
// PRODUCT FORM VIEW - Create/edit modal
// ============================================================================
// Inputs write into the form view-model without a re-render. The submit
// button, the field error line and the stock value preview are patched in
// place so the focused input survives typing.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_input, on_submit, set_flag, set_text_content, ElementBuilder};
use crate::utils::format_amount;
use crate::viewmodels::{DashboardViewModel, FormPhase, ProductFormViewModel};

/// Elements patched by input handlers.
#[derive(Clone)]
struct LiveParts {
    submit: Element,
    field_error: Element,
    preview: Element,
}

impl LiveParts {
    fn sync(&self, form: &ProductFormViewModel) {
        let _ = set_flag(&self.submit, "disabled", !form.can_submit());
        set_text_content(&self.field_error, &form.field_error().unwrap_or_default());
        set_text_content(&self.preview, &preview_text(form));
    }
}

pub fn render_product_form(vm: &DashboardViewModel, form: &ProductFormViewModel) -> Result<Element, JsValue> {
    let draft = form.draft();
    let locked = !form.accepts_input();

    let panel = ElementBuilder::new("div")?
        .class("modal-panel")
        .child(ElementBuilder::new("h2")?.text(form.title()).build())?
        .build();

    match form.phase() {
        FormPhase::Succeeded(message) => {
            append_child(&panel, &ElementBuilder::new("p")?.class("alert alert-success").text(&message).build())?;
        }
        FormPhase::Failed(message) => {
            append_child(&panel, &ElementBuilder::new("p")?.class("alert alert-error").text(&message).build())?;
        }
        FormPhase::Editing | FormPhase::Submitting => {}
    }

    let parts = LiveParts {
        submit: ElementBuilder::new("button")?
            .class("btn btn-primary")
            .attr("type", "submit")?
            .flag("disabled", !form.can_submit())?
            .text(form.submit_label())
            .build(),
        field_error: ElementBuilder::new("p")?
            .class("field-error")
            .text(&form.field_error().unwrap_or_default())
            .build(),
        preview: ElementBuilder::new("p")?
            .class("stock-preview")
            .text(&preview_text(form))
            .build(),
    };

    let name = field_input("text", &draft.name, locked)?;
    bind(&name, form, &parts, |form, value| {
        form.set_name(&value);
    })?;
    let sku = field_input("text", &draft.sku, locked)?;
    bind(&sku, form, &parts, |form, value| {
        form.set_sku(&value);
    })?;
    let quantity = field_input("number", &draft.quantity.to_string(), locked)?;
    set_flag(&quantity, "required", false)?;
    quantity.set_attribute("min", "0")?;
    quantity.set_attribute("step", "1")?;
    bind(&quantity, form, &parts, |form, value| {
        let _ = form.set_quantity(&value);
    })?;
    let price = field_input("number", &draft.price.to_string(), locked)?;
    set_flag(&price, "required", false)?;
    price.set_attribute("min", "0")?;
    price.set_attribute("step", "0.01")?;
    bind(&price, form, &parts, |form, value| {
        let _ = form.set_price(&value);
    })?;

    let cancel = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("type", "button")?
        .flag("disabled", !form.can_cancel())?
        .text("Cancel")
        .build();
    {
        let vm = vm.clone();
        on_click(&cancel, move |_| {
            vm.close_form();
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("form-actions")
        .child(cancel)?
        .child(parts.submit.clone())?
        .build();

    let form_el = ElementBuilder::new("form")?
        .class("product-form")
        .child(labelled("Name", name)?)?
        .child(labelled("SKU", sku)?)?
        .child(labelled("Quantity", quantity)?)?
        .child(labelled("Price", price)?)?
        .child(parts.field_error.clone())?
        .child(parts.preview.clone())?
        .child(actions)?
        .build();
    {
        let vm = vm.clone();
        on_submit(&form_el, move || {
            let vm = vm.clone();
            spawn_local(async move {
                vm.submit_form().await;
            });
        })?;
    }

    append_child(&panel, &form_el)?;
    Ok(ElementBuilder::new("div")?.class("modal-backdrop").child(panel)?.build())
}

fn bind<F>(input: &Element, form: &ProductFormViewModel, parts: &LiveParts, apply: F) -> Result<(), JsValue>
where
    F: Fn(&ProductFormViewModel, String) + 'static,
{
    let form = form.clone();
    let parts = parts.clone();
    on_input(input, move |value| {
        apply(&form, value);
        parts.sync(&form);
    })
}

fn field_input(kind: &str, value: &str, disabled: bool) -> Result<Element, JsValue> {
    ElementBuilder::new("input")?
        .class("form-control")
        .attr("type", kind)?
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

fn preview_text(form: &ProductFormViewModel) -> String {
    form.stock_value()
        .map(|value| format!("Stock value: {}", format_amount(value)))
        .unwrap_or_default()
}
