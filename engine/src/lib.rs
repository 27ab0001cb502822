//! Server Room Engine Library
//!
//! Core of a third-person walk through a stylized server room: an inertial
//! character controller with an over-the-shoulder camera, a rope of cable
//! trailing from the character's back, and reticle targeting with a narrow
//! presentation boundary. Rendering is a thin wireframe view on top.
//!
//! # Modules
//!
//! - [`math`] - Frame smoothing helpers and Catmull-Rom curves
//! - [`input`] - Platform-agnostic key, pointer and capture state
//! - [`player`] - Character controller and avatar rig
//! - [`camera`] - Over-the-shoulder follow camera
//! - [`physics`] - Cable relaxation and ray intersection
//! - [`world`] - Walkable room bounds
//! - [`interaction`] - Target registry, reticle resolver, overlay gating
//! - [`presentation`] - Callbacks from the core to whatever shows things
//! - [`render`] - wgpu wireframe pipeline
//!
//! # Example
//!
//! ```ignore
//! use server_room_engine::game::{SceneConfig, WalkSession};
//! use server_room_engine::input::InputAction;
//! use server_room_engine::presentation::TracingPresentation;
//!
//! let mut session = WalkSession::new(SceneConfig::default());
//! let mut presentation = TracingPresentation;
//!
//! // First click captures the pointer
//! session.on_primary_click(&mut presentation);
//! session.handle_action(InputAction::MoveForward, true, &mut presentation);
//!
//! let frame = session.tick(1.0 / 60.0, &mut presentation);
//! println!("{}", frame.hud);
//! ```

pub mod camera;
pub mod input;
pub mod interaction;
pub mod math;
pub mod physics;
pub mod player;
pub mod presentation;
pub mod render;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::{CameraConfig, CameraPose, ShoulderCamera};
pub use input::{InputAction, InputState, KeyCode};
pub use interaction::{InteractionResolver, TargetId, TargetKind, TargetRegistry};
pub use physics::{CableSimulator, Ray};
pub use player::{Avatar, CharacterController, MovementState};
pub use presentation::{CueId, OverlayKind, Presentation};
pub use world::RoomBounds;
