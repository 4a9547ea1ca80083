//! Loading of external files (images) into GPU resources.

pub mod texture;
