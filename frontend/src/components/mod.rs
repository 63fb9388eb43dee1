pub mod chat;
pub mod dashboard;
pub mod entity_page;
pub mod sidebar;
pub mod uploader;
