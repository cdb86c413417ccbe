//! Terminal shell: routing, effects, session persistence and rendering.
mod app;
mod config;
mod effects;
mod logging;
mod session_file;
mod toast;
mod ui;

pub use app::run_app;
pub use config::Cli;
