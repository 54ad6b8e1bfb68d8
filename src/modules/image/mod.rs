pub mod crud;
pub mod interface;
pub mod model;
pub mod service;

pub use interface::{ImageError, ImageStore};
pub use model::ProductImage;
pub use service::ImageService;
