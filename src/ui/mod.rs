pub mod app;
pub mod center_panel;
pub mod right_panel;
pub mod scene_texture;
pub mod settings;
