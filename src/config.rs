//! Start-up settings of the window and the scene.

use crate::input::KeyBindings;

/// Settings read once when the window is created.
///
/// `width` and `height` set both the initial window size and the fixed world-space extent
/// of the orthographic projection. Resizing the window later stretches the scene instead of
/// revealing more of it.
#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: wgpu::Color,
    pub key_bindings: KeyBindings,
}

impl Config {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_colour(mut self, clear_colour: wgpu::Color) -> Self {
        self.clear_colour = clear_colour;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "sprite-ngin".to_string(),
            width: 800,
            height: 600,
            clear_colour: wgpu::Color::BLACK,
            key_bindings: KeyBindings::default(),
        }
    }
}
