pub mod pool;
pub mod probe;
