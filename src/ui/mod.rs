pub mod canvas;
pub mod input;
