//! sprite-ngin
//!
//! A small 2D sprite engine on top of wgpu and winit. Sprites are textured unit quads
//! placed with a translate/scale transform, cut from sprite sheets and drawn back to
//! front through an orthographic projection measured in pixels. Velocity-driven sprites
//! walk and animate on their own and can be steered from the keyboard.
//!
//! High-level modules
//! - `camera`: fixed orthographic projection and its uniform
//! - `config`: window and scene start-up settings
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `data_structures`: sprites, sheets, textures and the walk animation
//! - `flow`: high level flow control (scenes / update loops)
//! - `input`: key bindings and cursor mapping
//! - `pipelines`: the sprite render pipeline and its shader
//! - `resources`: helpers to load images from the assets directory
//! - `render`: render composition
//! - `scene`: ordered sprite collection, the flow most applications need
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use config::Config;
pub use data_structures::animation::{Behaviour, Character, Movement};
pub use data_structures::sprite::{Sprite, SpriteState};
pub use flow::{FlowConstructor, GraphicsFlow, Out, run};
pub use scene::Scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
