//! Sprite placement in world space.
//!
//! A [`Transform`] only knows about translation and scale. Sprites are flat quads
//! facing the camera, so there is no rotation component.

use cgmath::Vector3;

/// Translation and non-uniform scale of a sprite's unit quad.
///
/// The model matrix is built as `T * S`: the quad is scaled around its centre first
/// and then moved to `translate`. Since the unit quad spans `[-0.5, 0.5]`, `scale`
/// is also the on-screen size of the sprite in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transform: at the origin with a scale of one.
    pub fn new() -> Self {
        Self {
            translate: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.translate)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// The smallest and largest corner of the transformed quad on the xy-plane.
    pub fn bounds(&self) -> (cgmath::Vector2<f32>, cgmath::Vector2<f32>) {
        let half_x = self.scale.x.abs() * 0.5;
        let half_y = self.scale.y.abs() * 0.5;
        (
            cgmath::Vector2::new(self.translate.x - half_x, self.translate.y - half_y),
            cgmath::Vector2::new(self.translate.x + half_x, self.translate.y + half_y),
        )
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(translate: Vector3<f32>) -> Self {
        Transform {
            translate,
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
