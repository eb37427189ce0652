// Shared helpers

pub mod constants;
pub mod format;
pub mod storage;
pub mod timer;

pub use constants::*;
pub use format::{format_amount, format_count, format_quantity};
pub use storage::{KeyValueStorage, MemoryStorage};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
pub use timer::sleep_ms;
