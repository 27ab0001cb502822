//! Wireframe view of a session frame.

use glam::Vec3;

use crate::game::session::WalkSession;
use crate::render::{WireframeBuilder, palette};

const GRID_SPACING: f32 = 3.0;
const CHARACTER_HEIGHT: f32 = 1.8;
/// Length of the debug forward ray
const RAY_PREVIEW: f32 = 20.0;

/// Fill `builder` with the room as the session currently sees it.
///
/// The locked target is always drawn in full. Other targets show as a
/// marker post unless the debug view is on, which draws every hit part
/// together with the interaction range and the camera ray.
pub fn build_wireframe(session: &WalkSession, builder: &mut WireframeBuilder) {
    builder.clear();

    let bounds = session.config().controller.bounds;
    builder.grid(bounds.half_width, GRID_SPACING, 0.0, palette::GRID);
    builder.polygon(&bounds.corners(0.01), palette::BOUNDARY);

    let registry = session.registry();
    let locked = session.resolver().current_target();
    for target in registry.list_interactive_targets() {
        if Some(target.id) == locked {
            for part in registry.parts_of(target.id) {
                builder.bounds(&part.bounds, palette::TARGET_LOCKED);
            }
        } else if session.is_debug() {
            for part in registry.parts_of(target.id) {
                builder.bounds(&part.bounds, palette::TARGET);
            }
        } else {
            let base = Vec3::new(target.position.x, 0.0, target.position.z);
            builder.line(base, base + Vec3::Y * 4.0, palette::TARGET);
        }
    }

    let avatar = session.avatar();
    let body = avatar.position() + Vec3::Y * avatar.body_bob();
    builder.character(body, avatar.body_yaw(), CHARACTER_HEIGHT, palette::CHARACTER);
    builder.polyline(session.cable().curve(), palette::CABLE);

    if session.is_debug() {
        let player = session.controller().pose().position;
        builder.circle(
            player + Vec3::Y * 0.05,
            session.resolver().distance_threshold(),
            Vec3::Y,
            palette::DEBUG,
        );
        let ray = session.controller().camera_pose().forward_ray();
        builder.line(ray.origin, ray.at(RAY_PREVIEW), palette::DEBUG);
    }
}
