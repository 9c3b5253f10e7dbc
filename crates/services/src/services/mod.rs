pub mod apps;
pub mod dashboard;
pub mod seed;
pub mod template_catalog;
