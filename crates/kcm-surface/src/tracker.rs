//! Per-collidable transform history and velocity measurement.
//!
//! # Why NaN seeding
//!
//! A fresh track record stores `NaN` position/rotation instead of carrying a
//! separate "first observation" flag.  The first `observe` call sees the NaN
//! history, reports zero velocity, and overwrites it with the real pose —
//! one field fewer, and any NaN that leaks in from the backend is treated
//! exactly like a fresh contact (reseed, no spike).

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use tracing::warn;

use kcm_core::{CollidableId, Pose};

// ── MeasuredVelocity ──────────────────────────────────────────────────────────

/// The outcome of one tracker observation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MeasuredVelocity {
    /// Linear velocity of the attachment point (m/s).
    pub linear: Vec3,
    /// Angular velocity as an axis-angle rate (deg/s).
    pub angular: Vec3,
}

// ── TrackRecord ───────────────────────────────────────────────────────────────

/// One collidable's transform history (last observed pose + socket).
#[derive(Debug, Clone)]
struct TrackRecord {
    last:   Pose,
    socket: Option<String>,
}

impl TrackRecord {
    /// NaN-seeded history: the next observation is treated as the first.
    fn fresh(socket: Option<String>) -> Self {
        Self {
            last: Pose::new(Vec3::NAN, Quat::from_xyzw(f32::NAN, f32::NAN, f32::NAN, f32::NAN)),
            socket,
        }
    }
}

// ── SurfaceTracker ────────────────────────────────────────────────────────────

/// Measures the linear/angular velocity of every collidable the agent is
/// currently touching, from its transform movement between ticks.
#[derive(Default)]
pub struct SurfaceTracker {
    records: FxHashMap<CollidableId, TrackRecord>,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `id` has a history record (even a not-yet-measured one).
    pub fn is_tracking(&self, id: CollidableId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of collidables currently tracked.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feed this tick's observed `pose` of `id`'s attachment point.
    ///
    /// Returns the measured velocity since the previous observation:
    ///
    /// - linear = `(pose.position − last.position) / dt`
    /// - angular = shortest-arc rotation delta, as an axis-angle rate (deg/s)
    ///
    /// Zero velocity is returned (and the history reseeded) when any of:
    /// the collidable was not yet tracked, the socket changed since the last
    /// observation, the stored or incoming pose is non-finite, or `dt` is
    /// not positive.
    pub fn observe(
        &mut self,
        id:     CollidableId,
        socket: Option<&str>,
        pose:   Pose,
        dt:     f32,
    ) -> MeasuredVelocity {
        if !pose.is_finite() {
            warn!(%id, "non-finite pose observed, resetting track history");
            self.records.insert(id, TrackRecord::fresh(socket.map(str::to_owned)));
            return MeasuredVelocity::default();
        }

        let record = self
            .records
            .entry(id)
            .or_insert_with(|| TrackRecord::fresh(socket.map(str::to_owned)));

        // A changed attachment point means the old history measures a
        // different point on the body; restart rather than spike.
        if record.socket.as_deref() != socket {
            record.socket = socket.map(str::to_owned);
            record.last = pose;
            return MeasuredVelocity::default();
        }

        let last = record.last;
        record.last = pose;

        if !last.is_finite() || dt <= f32::EPSILON {
            return MeasuredVelocity::default();
        }

        let linear = (pose.position - last.position) / dt;

        // Shortest-arc delta: negate when the quaternion dot is negative so
        // the extracted angle is the small one.
        let mut delta = pose.rotation * last.rotation.inverse();
        if delta.w < 0.0 {
            delta = -delta;
        }
        let (axis, angle) = delta.to_axis_angle();
        let angular = if angle.abs() > 1e-7 {
            axis * (angle.to_degrees() / dt)
        } else {
            Vec3::ZERO
        };

        MeasuredVelocity { linear, angular }
    }

    /// Drop records for collidables that disappeared this tick.
    pub fn retain_live(&mut self, live: &[CollidableId]) {
        self.records.retain(|id, _| live.contains(id));
    }

    /// Forget a single collidable.
    pub fn forget(&mut self, id: CollidableId) {
        self.records.remove(&id);
    }
}
