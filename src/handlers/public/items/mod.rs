pub mod item_get;
pub mod items_get;

pub use item_get::item_get;
pub use items_get::items_get;
