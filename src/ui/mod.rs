//! Terminal front-end split across logical submodules: central app state and
//! rendering, modal form state, screen state, layout helpers, and the
//! crossterm event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
