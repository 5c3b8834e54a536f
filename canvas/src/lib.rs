mod color;
pub mod coords;
mod engine;
mod events;
mod scene;

pub use color::Color;
pub use engine::*;
pub use events::*;
pub use scene::*;
