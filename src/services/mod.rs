pub mod item_service;
pub mod user_service;

pub use item_service::ItemStore;
pub use user_service::{AuthError, UserStore};
