//! The agent's collision volume.

use glam::Vec3;

/// The swept collision volume of the agent.
///
/// Backends that cannot sweep a given shape exactly may substitute the
/// bounding sphere ([`Shape::bounding_radius`]); the bundled plane-world
/// backend does exactly that, which is exact for spheres and conservative
/// for the others.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Sphere { radius: f32 },
    Capsule { radius: f32, half_height: f32 },
    Cuboid { half_extents: Vec3 },
}

impl Shape {
    /// Radius of the smallest sphere containing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Capsule { radius, half_height } => radius + half_height,
            Shape::Cuboid { half_extents } => half_extents.length(),
        }
    }

    /// `true` when the shape has usable (positive, finite) dimensions.
    pub fn is_valid(&self) -> bool {
        let r = self.bounding_radius();
        r.is_finite() && r > 0.0
    }
}
