pub mod ai_model;
pub mod app_connection;
pub mod doc_article;
pub mod location;
