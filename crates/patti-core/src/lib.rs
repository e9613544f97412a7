pub mod config;
pub mod document;
pub mod navigation;
pub mod protocol;
pub mod room_client;
