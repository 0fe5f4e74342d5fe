pub mod animator;
pub mod controller;
pub mod frame_clip;
pub mod machine;
pub mod slots;
