pub mod cell;
pub mod geom;
