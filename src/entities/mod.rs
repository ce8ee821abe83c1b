pub mod article;
pub mod category;
pub mod favorite;
pub mod media;
pub mod user;
