pub mod renderer;

pub use renderer::{HudInfo, Renderer};
