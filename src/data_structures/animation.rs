//! Velocity-driven sprite-sheet animation.
//!
//! A [`Character`] is the animation component that can be attached to a sprite through
//! [`Behaviour::VelocityDriven`]. Each tick it moves the sprite by its velocity and picks
//! the sprite-sheet frame from the direction of travel and the elapsed time.
//!
//! The expected sheet layout is at least four rows of eight walk-cycle frames, one row per
//! facing direction (see [`Direction`]). The standing pose is the cell at
//! [`AnimationState::idle_frame`], [`IDLE_FRAME`] unless configured. On an 8x4 sheet that is
//! the first frame of the down row, so the character stands facing the viewer; sheets with a
//! separate idle pose reserve a cell for it and point the animation there.
//!
//! A character only animates on a sheet that passes [`Character::check_sheet`]. On anything
//! smaller it still moves, but the frame index is left alone so it cannot leave the sheet.
//!
//! Two idle thresholds are in play and they are checked independently:
//! - below [`IDLE_SPEED`] the character shows the idle frame immediately, every tick
//! - below [`WALK_SPEED`] a timer-triggered advance lands on the idle frame instead of the next
//!   walk frame

use anyhow::ensure;
use cgmath::{InnerSpace, Vector3, Zero};

use crate::data_structures::sprite_sheet::SpriteSheet;

/// Default frame shown while the character stands still.
pub const IDLE_FRAME: u32 = 24;
/// Below this speed the idle frame is selected right away.
pub const IDLE_SPEED: f32 = 0.01;
/// Below this speed a timed frame advance falls back to the idle frame.
pub const WALK_SPEED: f32 = 0.5;
/// Length of one walk cycle. Frame wrapping stays inside blocks of this size.
pub const FRAMES_PER_ROW: u32 = 8;
/// Number of walk rows, one per [`Direction`].
pub const WALK_ROWS: u32 = 4;
/// Seconds each walk frame stays on screen.
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;
/// World units per second for [`Movement::PerSecond`] when nothing else is configured.
/// One unit per frame at 60 fps.
pub const DEFAULT_SPEED: f32 = 60.0;

/// Facing direction and the sprite-sheet row that holds its walk cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Left = 2,
    Down = 3,
}

impl Direction {
    pub fn row(self) -> u32 {
        self as u32
    }

    /// Picks the facing direction by testing `x > 0`, `x < 0`, `y > 0`, `y < 0` in that order.
    ///
    /// Only the first matching test counts, so diagonal movement faces sideways.
    pub fn from_velocity(velocity: Vector3<f32>) -> Option<Self> {
        if velocity.x > 0.0 {
            Some(Direction::Right)
        } else if velocity.x < 0.0 {
            Some(Direction::Left)
        } else if velocity.y > 0.0 {
            Some(Direction::Up)
        } else if velocity.y < 0.0 {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// How velocity turns into displacement each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    /// `translate += velocity` once per tick. Speed depends on the frame rate.
    PerTick,
    /// `translate += velocity * speed * dt`, independent of the frame rate.
    PerSecond(f32),
}

impl Movement {
    pub fn displacement(&self, velocity: Vector3<f32>, dt: f32) -> Vector3<f32> {
        match self {
            Movement::PerTick => velocity,
            Movement::PerSecond(speed) => velocity * (*speed * dt),
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Movement::PerSecond(DEFAULT_SPEED)
    }
}

/// Timer and row bookkeeping for a walk cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Sprite-sheet row of the current facing direction, `0..=3`.
    pub animation_row: u32,
    /// Seconds accumulated since the last frame advance.
    pub anim_timer: f32,
    frame_duration: f32,
    idle_frame: u32,
}

impl AnimationState {
    pub fn new(frame_duration: f32) -> anyhow::Result<Self> {
        ensure!(
            frame_duration > 0.0,
            "frame duration must be positive, got {frame_duration}"
        );
        Ok(Self {
            frame_duration,
            ..Self::default()
        })
    }

    pub fn with_idle_frame(mut self, idle_frame: u32) -> Self {
        self.idle_frame = idle_frame;
        self
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn idle_frame(&self) -> u32 {
        self.idle_frame
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            animation_row: 0,
            anim_timer: 0.0,
            frame_duration: DEFAULT_FRAME_DURATION,
            idle_frame: IDLE_FRAME,
        }
    }
}

/// A keyboard-controlled walker.
///
/// `velocity` is edited additively by key presses and releases (see [`crate::input`]); it is
/// never set from the absolute key state, so a lost release event leaves it drifting.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub velocity: Vector3<f32>,
    pub animation: AnimationState,
    pub movement: Movement,
}

impl Character {
    pub fn new() -> Self {
        Self {
            velocity: Vector3::zero(),
            animation: AnimationState::default(),
            movement: Movement::default(),
        }
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_animation(mut self, animation: AnimationState) -> Self {
        self.animation = animation;
        self
    }

    /// Fails unless the walk cycle and the idle frame fit on `sheet`.
    ///
    /// The sheet needs [`WALK_ROWS`] rows of at least [`FRAMES_PER_ROW`] columns. Every frame
    /// [`Character::step`] produces on such a sheet lies in `0..sheet.frame_count()`.
    pub fn check_sheet(&self, sheet: &SpriteSheet) -> anyhow::Result<()> {
        ensure!(
            sheet.columns() >= FRAMES_PER_ROW && sheet.rows() >= WALK_ROWS,
            "a walk cycle needs a sheet of at least {FRAMES_PER_ROW}x{WALK_ROWS}, got {}x{}",
            sheet.columns(),
            sheet.rows()
        );
        ensure!(
            self.animation.idle_frame < sheet.frame_count(),
            "idle frame {} is outside the {}x{} sheet",
            self.animation.idle_frame,
            sheet.columns(),
            sheet.rows()
        );
        Ok(())
    }

    /// Advances the character by one tick.
    ///
    /// 1. moves `translate` by the velocity
    /// 2. accumulates `dt` on the animation timer
    /// 3. shows the idle frame and stops here when nearly still
    /// 4. otherwise switches to the row of the facing direction, keeping the walk-cycle column
    /// 5. once the timer reaches the frame duration, steps to the next frame (or the idle frame
    ///    when slower than [`WALK_SPEED`]), wraps within the row and resets the timer
    ///
    /// Steps 3 to 5 are skipped when `sheet` fails [`Character::check_sheet`].
    pub fn step(
        &mut self,
        dt: f32,
        sheet: &SpriteSheet,
        frame_index: &mut u32,
        translate: &mut Vector3<f32>,
    ) {
        *translate += self.movement.displacement(self.velocity, dt);
        self.animation.anim_timer += dt;

        if self.check_sheet(sheet).is_err() {
            return;
        }
        let columns = sheet.columns();

        let speed = self.velocity.magnitude();
        if speed < IDLE_SPEED {
            *frame_index = self.animation.idle_frame;
            return;
        }

        if let Some(direction) = Direction::from_velocity(self.velocity) {
            let row = direction.row();
            self.animation.animation_row = row;
            *frame_index = row * columns + (*frame_index % columns);
        }

        if self.animation.anim_timer >= self.animation.frame_duration {
            let row = self.animation.animation_row;
            *frame_index = if speed < WALK_SPEED {
                self.animation.idle_frame
            } else {
                *frame_index + 1
            };
            if *frame_index >= (row + 1) * FRAMES_PER_ROW {
                *frame_index = row * FRAMES_PER_ROW;
            }
            self.animation.anim_timer = 0.0;
        }
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

/// What a sprite does on `update`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Behaviour {
    /// Nothing: backgrounds, props and scrolling layers driven from outside.
    #[default]
    Static,
    /// Moves and animates from its velocity.
    VelocityDriven(Character),
}

impl Behaviour {
    pub fn update(
        &mut self,
        dt: f32,
        sheet: &SpriteSheet,
        frame_index: &mut u32,
        translate: &mut Vector3<f32>,
    ) {
        match self {
            Behaviour::Static => (),
            Behaviour::VelocityDriven(character) => {
                character.step(dt, sheet, frame_index, translate)
            }
        }
    }

    pub fn character(&self) -> Option<&Character> {
        match self {
            Behaviour::VelocityDriven(character) => Some(character),
            Behaviour::Static => None,
        }
    }

    pub fn character_mut(&mut self) -> Option<&mut Character> {
        match self {
            Behaviour::VelocityDriven(character) => Some(character),
            Behaviour::Static => None,
        }
    }
}
