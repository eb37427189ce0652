// ============================================================================
// PRODUCT LIST VIEW - Table of the last successful fetch
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::utils::{format_amount, format_quantity};
use crate::viewmodels::{DashboardViewModel, ProductRow};
use crate::views::dashboard::login_link;

pub fn render_product_list(vm: &DashboardViewModel, rows: Vec<ProductRow>) -> Result<Element, JsValue> {
    let head_row = ElementBuilder::new("tr")?.build();
    for header in ["ID", "Name", "SKU", "Quantity", "Price", ""] {
        append_child(&head_row, &ElementBuilder::new("th")?.text(header).build())?;
    }

    let body = ElementBuilder::new("tbody")?.build();
    for row in rows {
        append_child(&body, &render_row(vm, row)?)?;
    }

    Ok(ElementBuilder::new("table")?
        .class("product-table")
        .child(ElementBuilder::new("thead")?.child(head_row)?.build())?
        .child(body)?
        .build())
}

fn render_row(vm: &DashboardViewModel, row: ProductRow) -> Result<Element, JsValue> {
    let product = row.product;
    let tr = ElementBuilder::new("tr")?
        .children([
            cell(&product.id.to_string())?,
            cell(&product.name)?,
            cell(&product.sku)?,
            cell(&format_quantity(product.quantity))?,
            cell(&format_amount(product.price))?,
        ])?
        .build();

    // Anonymous visitors get a login prompt instead of the edit button
    let action = if row.editable {
        let edit = ElementBuilder::new("button")?
            .class("btn btn-link")
            .attr("type", "button")?
            .text("Edit")
            .build();
        let vm = vm.clone();
        on_click(&edit, move |_| {
            vm.open_edit(&product);
        })?;
        edit
    } else {
        login_link(vm, "Login to edit")?
    };
    append_child(&tr, &ElementBuilder::new("td")?.child(action)?.build())?;

    Ok(tr)
}

fn cell(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.text(text).build())
}
