pub mod auth;
pub mod product;

pub use auth::{ErrorBody, LoginRequest, LoginResponse};
pub use product::{Envelope, Product, ProductFields};
