pub mod error;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod operations;
pub mod scene;
pub mod tessellation;

pub use error::{GridError, Result};
pub use geometry::{CellKey, GridPoint, Outline, Ring};
pub use scene::{InteractionState, PuzzleModel, Scene, SceneParams, Theme};
