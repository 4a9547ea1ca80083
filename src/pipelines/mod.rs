//! Render pipelines. Everything on screen is drawn by the sprite pipeline.

pub mod sprite;
