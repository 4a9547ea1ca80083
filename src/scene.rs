//! An ordered collection of sprites updated and drawn every frame.
//!
//! Sprites are drawn in insertion order, so later sprites cover earlier ones. One
//! velocity-driven sprite can be put under keyboard control with [`Scene::control`].
//!
//! `Scene` is generic over anything that exposes a [`SpriteState`], which lets the whole
//! bookkeeping run on plain states without a GPU. Only `Scene<Sprite>` is a
//! [`GraphicsFlow`].

use anyhow::{Context as _, bail};
use cgmath::Vector2;
use instant::Duration;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::{
    context::{BufferWriter, Context},
    data_structures::sprite::{Sprite, SpriteState},
    flow::{GraphicsFlow, Out},
    input::{Action, apply_key},
    render::Render,
};

#[derive(Debug)]
pub struct Scene<T = Sprite> {
    sprites: Vec<T>,
    controlled: Option<usize>,
    selected: Option<usize>,
}

impl<T: AsRef<SpriteState> + AsMut<SpriteState>> Scene<T> {
    pub fn new() -> Self {
        Self {
            sprites: Vec::new(),
            controlled: None,
            selected: None,
        }
    }

    /// Append a sprite on top of all others and return its index.
    pub fn push(&mut self, sprite: T) -> usize {
        self.sprites.push(sprite);
        self.sprites.len() - 1
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.sprites.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.sprites.get_mut(idx)
    }

    /// Remove a sprite. Indices above `idx` shift down by one, the control and selection
    /// markers follow their sprite or are cleared if it was the one removed.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.sprites.len() {
            return None;
        }
        let sprite = self.sprites.remove(idx);
        self.controlled = shift_after_remove(self.controlled, idx);
        self.selected = shift_after_remove(self.selected, idx);
        Some(sprite)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.sprites.iter_mut()
    }

    /// Route movement keys to the sprite at `idx`. It has to be velocity-driven, on a sheet
    /// its walk cycle fits on.
    pub fn control(&mut self, idx: usize) -> anyhow::Result<()> {
        let Some(sprite) = self.sprites.get(idx) else {
            bail!(
                "no sprite at index {idx}, the scene has {}",
                self.sprites.len()
            );
        };
        let state = sprite.as_ref();
        let Some(character) = state.behaviour.character() else {
            bail!("sprite {idx} is static and cannot be controlled");
        };
        character
            .check_sheet(&state.sprite_sheet())
            .with_context(|| format!("sprite {idx} cannot be controlled"))?;
        self.controlled = Some(idx);
        Ok(())
    }

    pub fn controlled(&self) -> Option<usize> {
        self.controlled
    }

    /// The sprite hit by the last click, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Advance every sprite by `dt` seconds, in draw order.
    pub fn update(&mut self, dt: f32) {
        self.sprites
            .iter_mut()
            .for_each(|sprite| sprite.as_mut().update(dt));
    }

    /// Topmost sprite containing `point` (world space).
    pub fn hit_test(&self, point: Vector2<f32>) -> Option<usize> {
        self.sprites
            .iter()
            .rposition(|sprite| sprite.as_ref().contains(point))
    }

    /// Apply a key action. Movement goes to the controlled sprite, if there is one.
    pub fn handle_action(&mut self, action: Action, pressed: bool) -> Out {
        if action == Action::Quit {
            return if pressed { Out::Exit } else { Out::Empty };
        }
        let Some(state) = self
            .controlled
            .and_then(|idx| self.sprites.get_mut(idx))
            .map(|sprite| sprite.as_mut())
        else {
            return Out::Empty;
        };
        if let Some(velocity) = state.velocity() {
            state.set_velocity(apply_key(velocity, action, pressed));
        }
        Out::Empty
    }

    /// Record the topmost sprite under `point` as selected.
    pub fn select_at(&mut self, point: Vector2<f32>) -> Option<usize> {
        self.selected = self.hit_test(point);
        self.selected
    }
}

impl<T: AsRef<SpriteState> + AsMut<SpriteState>> Default for Scene<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn shift_after_remove(marker: Option<usize>, removed: usize) -> Option<usize> {
    match marker {
        Some(idx) if idx == removed => None,
        Some(idx) if idx > removed => Some(idx - 1),
        other => other,
    }
}

impl BufferWriter for Scene<Sprite> {
    fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        self.sprites
            .iter_mut()
            .for_each(|sprite| sprite.write_to_buffer(queue));
    }
}

impl GraphicsFlow for Scene<Sprite> {
    fn on_init(&mut self, _: &mut Context) -> Out {
        log::info!("scene starts with {} sprites", self.sprites.len());
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, dt: Duration) -> Out {
        self.update(dt.as_secs_f32());
        self.write_to_buffer(&ctx.queue);
        Out::Empty
    }

    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) -> Out {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                match ctx.key_bindings.resolve_event(event) {
                    Some((action, pressed)) => self.handle_action(action, pressed),
                    None => Out::Empty,
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let point = ctx.cursor_world();
                if let Some(idx) = self.select_at(point) {
                    log::debug!("clicked sprite {} at {:?}", idx, point);
                }
                Out::Empty
            }
            _ => Out::Empty,
        }
    }

    fn on_render(&self) -> Render<'_> {
        Render::Sprites(self.sprites.iter().map(Sprite::flat).collect())
    }
}
