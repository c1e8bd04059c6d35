mod favorites;
mod kv;
mod schema;
mod types;

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use schema::Database;
pub use types::{DatabaseError, FavoriteRecord};
