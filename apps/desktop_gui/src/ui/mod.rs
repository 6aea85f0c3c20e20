//! UI layer for the advisory desktop GUI: app shell and panels.

pub mod app;

pub use app::AdvisorGuiApp;
