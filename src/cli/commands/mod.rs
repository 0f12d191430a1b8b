pub mod assist;
pub mod chat;
pub mod config;
pub mod render;
pub mod status;
