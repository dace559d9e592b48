pub mod scene_image;
pub mod session;
pub mod transcript;
pub mod turn;
