//! Scalar range tests with a "disabled" sentinel.

/// An inclusive scalar interval used by the surface-condition predicates.
///
/// A range with `min > max` is *disabled*: its [`contains`][Self::contains]
/// test passes unconditionally.  This keeps condition structs flat — every
/// test is always present, and an unused one is simply the inverted
/// sentinel rather than an `Option`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarRange {
    pub min: f32,
    pub max: f32,
}

impl ScalarRange {
    /// The canonical disabled range (`min = 1.0 > max = -1.0`).
    pub const DISABLED: ScalarRange = ScalarRange { min: 1.0, max: -1.0 };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Enabled only on the lower side.
    pub const fn at_least(min: f32) -> Self {
        Self { min, max: f32::INFINITY }
    }

    /// Enabled only on the upper side.
    pub const fn at_most(max: f32) -> Self {
        Self { min: f32::NEG_INFINITY, max }
    }

    pub const fn disabled() -> Self {
        Self::DISABLED
    }

    #[inline]
    pub fn is_disabled(self) -> bool {
        self.min > self.max
    }

    /// `true` when `value` lies in the interval, or the range is disabled.
    #[inline]
    pub fn contains(self, value: f32) -> bool {
        self.is_disabled() || (value >= self.min && value <= self.max)
    }
}

impl Default for ScalarRange {
    fn default() -> Self {
        Self::DISABLED
    }
}
