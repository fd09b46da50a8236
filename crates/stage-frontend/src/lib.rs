//! Media Stage Frontend
//!
//! egui application arranging images, animated GIFs and 3D models on an
//! interactive stage.

mod app;
pub mod config;
pub mod media;
mod panels;
mod state;

pub use app::StageApp;
pub use state::{AppAction, AppState, SharedAppState};
