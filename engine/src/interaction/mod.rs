//! Interaction Module
//!
//! Decides what the player is aiming at and what activating it does.
//!
//! - [`targets`] - the static target table and ray queries against it
//! - [`resolver`] - per-frame target selection and activation dispatch
//! - [`overlay`] - single-overlay gate and rack/core activation flags

pub mod overlay;
pub mod resolver;
pub mod targets;

pub use overlay::{ActivityState, OpenOverlay, OverlayGate};
pub use resolver::{
    ActivationOutcome, DEFAULT_INTERACTION_DISTANCE, InteractionConfig, InteractionResolver,
};
pub use targets::{
    InteractiveTarget, PartHit, PartId, ProjectInfo, RackStyle, TargetId, TargetKind, TargetPart,
    TargetRegistry,
};
