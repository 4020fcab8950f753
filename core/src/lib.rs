pub mod config;
pub mod errors;
pub mod files;
pub mod messages;
pub mod vfs;
pub mod view;
