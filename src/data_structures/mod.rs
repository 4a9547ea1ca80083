//! Engine data structures: sprites, textures, sheets and animation.
//!
//! - `sprite` holds the sprite type split into CPU state and GPU resources
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `sprite_sheet` maps frame indices to cells of a texture
//! - `animation` drives frame selection and movement from a velocity
//! - `transform` holds per-sprite translation and scale
//! - `quad` is the unit mesh every sprite is drawn with

pub mod animation;
pub mod quad;
pub mod sprite;
pub mod sprite_sheet;
pub mod texture;
pub mod transform;
