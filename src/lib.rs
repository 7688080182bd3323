pub mod access;
pub mod config;
pub mod error;
pub mod events;
pub mod page;
pub mod providers;
pub mod render;
