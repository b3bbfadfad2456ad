//! UIコンポーネント

pub mod about;
pub mod contact;
pub mod gallery;
pub mod hero;
pub mod loader;
pub mod navigation;
pub mod particle_background;
pub mod projects_grid;
pub mod reveal;
pub mod scene_viewer;
