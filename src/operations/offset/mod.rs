mod dispose;
mod shrink;

pub use dispose::{Disposal, DisposePolygon, EdgeMatch};
pub use shrink::ShrinkPolygon;
