pub mod article_model;
pub mod auth_model;
pub mod category_model;
pub mod favorite_model;
pub mod media_model;
