pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod dialogs;
pub mod event_bus;
pub mod handshake;
pub mod icons;
pub mod page_frame;
pub mod page_standard;
pub mod polling;
