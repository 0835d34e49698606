pub mod cell;
pub mod ring;

pub use cell::{CellKey, GridPoint};
pub use ring::{Outline, Ring};
