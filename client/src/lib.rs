//! Client-side companion to the newsdesk API: a thin reqwest wrapper plus
//! the per-article favorite toggle state used by UI frontends.

pub mod api;
pub mod favorite;

pub use api::{ApiClient, ApiError, FavoriteStatus, FavoritesApi};
pub use favorite::FavoriteToggle;
