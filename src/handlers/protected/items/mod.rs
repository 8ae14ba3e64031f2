pub mod items_post;
pub mod items_put;

pub use items_post::items_post;
pub use items_put::{items_put, UpdateItemsRequest};
