pub mod chat;
pub mod cli;
pub mod config;
pub mod core;
pub mod math;
pub mod render;
pub mod renderer;
pub mod scene;
pub mod site;

pub use renderer::{InteractiveSpace, SceneRenderer};
