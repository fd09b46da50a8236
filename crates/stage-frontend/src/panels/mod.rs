//! UI panels

mod monitor;
mod object_list;
mod settings;
mod toolbar;
mod transform;
mod viewport;

pub use monitor::render_resource_monitor;
pub use object_list::render_object_list;
pub use settings::SettingsWindow;
pub use toolbar::{ToolbarRequest, render_toolbar};
pub use transform::render_transform_panel;
pub use viewport::render_viewport;
