pub mod app;
pub mod decode;
pub mod slot;
pub mod ui;
pub mod watcher;
