// ============================================================================
// INVENTORY DASHBOARD - Rust/WASM front end, MVVM over raw DOM
// ============================================================================
// - Models: wire types shared with the API
// - Services: HTTP only (bearer-signed JSON calls)
// - State: Rc<RefCell> stores with change notifications
// - ViewModels: form state machines, dashboard orchestration
// - Views: functions that build DOM (wasm only)
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::App;
    use crate::config::CONFIG;

    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(Config::new(CONFIG.log_level()));
        log::info!("🚀 Inventory dashboard starting ({})", CONFIG.environment);

        let mut app = App::new()?;
        app.render()?;
        app.listen_popstate()?;
        app.load_products();

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
        Ok(())
    }

    /// Full re-render of the current route.
    pub fn rerender_app() {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                if let Err(err) = app.render() {
                    log::error!("❌ [RENDER] {:?}", err);
                }
            } else {
                log::warn!("⚠️ [RENDER] App not initialised");
            }
        });
    }
}
