pub mod item;
pub mod user;

pub use item::{Item, ItemPatch, NewItem};
pub use user::{Credentials, PublicUser, TokenResponse, User};

/// Records carrying a server-assigned integer id
pub trait Identified {
    fn id(&self) -> i64;
}

/// Next id for a collection: one past the largest id present, 1 when empty.
///
/// `None` once the largest id is `i64::MAX`.
pub fn next_id<T: Identified>(records: &[T]) -> Option<i64> {
    records
        .iter()
        .map(Identified::id)
        .max()
        .unwrap_or(0)
        .max(0)
        .checked_add(1)
}
