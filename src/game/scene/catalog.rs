//! Server Room Catalog
//!
//! The fixed set of interactive targets: three project racks, the chaos
//! core in the middle of the room and the exit door on the far wall. Hit
//! parts are given relative to each target's position.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interaction::{ProjectInfo, RackStyle, TargetKind, TargetRegistry};
use crate::physics::Bounds;

/// One target as described in config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    pub kind: TargetKind,
    pub position: Vec3,
    /// Hit-test parts relative to `position`
    pub parts: Vec<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,
}

/// Build the registry the resolver queries.
pub fn build_registry(targets: &[TargetSpec]) -> TargetRegistry {
    let mut registry = TargetRegistry::new();
    for entry in targets {
        let id = registry.add_target(
            entry.name.clone(),
            entry.position,
            entry.kind,
            entry.project.clone(),
        );
        for part in &entry.parts {
            registry.add_part(id, *part);
        }
        debug!(name = %entry.name, parts = entry.parts.len(), "target registered");
    }
    registry
}

pub fn default_projects() -> Vec<ProjectInfo> {
    vec![
        ProjectInfo {
            id: "project_a".into(),
            title: "NEURAL_NETWORK_VISUALIZER".into(),
            description: "Real-time 3D visualization of neural network training. Watch the machine learn as connections form and strengthen across layers.".into(),
            tech: "Three.js, TensorFlow.js, WebGL Shaders".into(),
            link: "https://github.com/example/neural-viz".into(),
            style: RackStyle::Tower,
        },
        ProjectInfo {
            id: "project_b".into(),
            title: "RETRO_TERMINAL_OS".into(),
            description: "A web-based operating system with authentic CRT aesthetics. Complete with file system, text editor, and game emulator.".into(),
            tech: "React, Electron, Node.js, WebAssembly".into(),
            link: "https://github.com/example/retro-os".into(),
            style: RackStyle::Crt,
        },
        ProjectInfo {
            id: "project_c".into(),
            title: "QUANTUM_DATA_STREAM".into(),
            description: "Live data streaming platform with glitch aesthetics. Processes millions of data points with real-time transformations.".into(),
            tech: "WebSockets, D3.js, Redis, Go".into(),
            link: "https://github.com/example/quantum-stream".into(),
            style: RackStyle::Hologram,
        },
    ]
}

/// Hit parts for a rack of the given style.
pub fn rack_parts(style: RackStyle) -> Vec<Bounds> {
    match style {
        RackStyle::Tower => vec![Bounds::aabb_from_center(
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(2.2, 6.0, 1.7),
        )],
        RackStyle::Crt => {
            let mut parts = vec![Bounds::aabb_from_center(
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(4.0, 0.2, 2.0),
            )];
            // Monitor pile: (centre, scale)
            let monitors = [
                (Vec3::new(-0.8, 1.7, -0.2), 1.0),
                (Vec3::new(0.8, 1.7, -0.3), 1.0),
                (Vec3::new(0.0, 1.6, 0.3), 0.9),
                (Vec3::new(0.0, 2.8, -0.1), 0.85),
            ];
            parts.extend(monitors.iter().map(|&(center, scale)| {
                Bounds::aabb_from_center(center, Vec3::new(1.2, 1.0, 1.2) * scale)
            }));
            parts
        }
        RackStyle::Hologram => vec![
            Bounds::aabb_from_center(Vec3::new(0.0, 0.15, 0.0), Vec3::new(3.6, 0.3, 3.6)),
            Bounds::sphere(Vec3::new(0.0, 2.0, 0.0), 0.8),
        ],
    }
}

fn rack_position(style: RackStyle) -> Vec3 {
    match style {
        RackStyle::Tower => Vec3::new(-15.0, 0.0, -10.0),
        RackStyle::Crt => Vec3::new(15.0, 0.0, -10.0),
        RackStyle::Hologram => Vec3::new(0.0, 0.0, -20.0),
    }
}

/// Targets of the reference room.
pub fn default_targets() -> Vec<TargetSpec> {
    let mut targets: Vec<TargetSpec> = default_projects()
        .into_iter()
        .map(|project| TargetSpec {
            name: project.id.clone(),
            kind: TargetKind::Project,
            position: rack_position(project.style),
            parts: rack_parts(project.style),
            project: Some(project),
        })
        .collect();

    targets.push(TargetSpec {
        name: "chaos_core".into(),
        kind: TargetKind::Core,
        position: Vec3::new(0.0, 3.0, 0.0),
        parts: vec![
            // Jagged shell, displaced to about 1.5x the base radius
            Bounds::sphere(Vec3::ZERO, 2.25),
            Bounds::aabb_from_center(Vec3::new(0.0, -3.0, 0.0), Vec3::new(7.0, 0.5, 7.0)),
        ],
        project: None,
    });

    targets.push(TargetSpec {
        name: "logout_door".into(),
        kind: TargetKind::Logout,
        position: Vec3::new(0.0, 2.5, -28.8),
        parts: vec![Bounds::aabb_from_center(Vec3::ZERO, Vec3::new(2.5, 4.5, 0.2))],
        project: None,
    });

    targets
}
