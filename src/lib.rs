pub mod app;
pub mod buffer;
pub mod chapter_file;
pub mod components;
pub mod session;
pub mod settings;
pub mod theme;
