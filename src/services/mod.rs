pub mod article_service;
pub mod auth_service;
pub mod category_service;
pub mod favorite_service;
pub mod media_service;
