//! `kcm-kinematics` — the kinematic state threaded through the pipeline.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`linear`]    | `LinearKinematic` — position/velocity/acceleration, referential pair, snap displacement |
//! | [`composite`] | `CompositeMovement` — named target-velocity blend        |
//! | [`angular`]   | `AngularKinematic` — orientation, rotation speed         |
//! | [`components`]| `KinematicComponents`, `ActiveSurfaces` bit-set          |
//! | [`status`]    | `ControllerStatus` — the per-tick snapshot, `TraversalEvent` |
//!
//! # Design notes
//!
//! Everything here is plain value data.  The pipeline copies the committed
//! `ControllerStatus` at every stage so check routines produce *candidate*
//! statuses without committing them; nothing in this crate mutates across
//! stage boundaries by itself.

pub mod angular;
pub mod components;
pub mod composite;
pub mod linear;
pub mod status;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angular::AngularKinematic;
pub use components::{ActiveSurfaces, KinematicComponents};
pub use composite::CompositeMovement;
pub use linear::LinearKinematic;
pub use status::{ControllerStatus, ProbeOverride, TraversalEvent};
