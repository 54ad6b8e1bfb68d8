pub mod crud;
pub mod interface;
pub mod model;
pub mod schema;
pub mod service;

pub use interface::{ProductError, ProductStore};
pub use model::Product;
pub use service::ProductService;
