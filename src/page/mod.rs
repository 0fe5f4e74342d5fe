pub mod landing;
pub mod scroll_lock;
