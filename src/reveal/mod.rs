pub mod engine;
pub mod geometry;
