pub mod crud;
pub mod interface;
pub mod model;
pub mod schema;
pub mod service;

pub use interface::{AccountError, AccountStore};
pub use model::{Account, AccountView};
pub use service::AccountService;
