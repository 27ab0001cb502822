//! Interactive targets and the hit-part table
//!
//! A target (a project rack, the core, the exit door) is made of one or
//! more hit-test parts. Every part records the target that owns it, so a
//! ray hit resolves to its target by a table lookup. Parts without an owner
//! are scenery: they are hit-tested but never produce a target.
//!
//! The registry is built once at scene construction and read-only after.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::{Bounds, Ray};

/// Index of a target within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Index of a hit-test part within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(pub u32);

/// What a target does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Project,
    Core,
    Logout,
    /// Any tag the walk-around has no action for
    #[serde(other)]
    Other,
}

impl TargetKind {
    /// Prompt shown while the target is acquired.
    pub fn prompt_text(&self) -> &'static str {
        match self {
            TargetKind::Project => "EXECUTE",
            TargetKind::Core => "ACCESS",
            TargetKind::Logout => "LOG OUT",
            TargetKind::Other => "INTERACT",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Project => "project",
            TargetKind::Core => "core",
            TargetKind::Logout => "logout",
            TargetKind::Other => "other",
        }
    }
}

/// Visual style of a project rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RackStyle {
    Tower,
    Crt,
    Hologram,
}

/// Record shown in the project overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech: String,
    pub link: String,
    pub style: RackStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveTarget {
    pub id: TargetId,
    pub name: String,
    /// Distance gating is measured to this point, not to the hit point
    pub position: Vec3,
    pub kind: TargetKind,
    pub project: Option<ProjectInfo>,
}

/// One hit-test shape, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPart {
    pub id: PartId,
    pub owner: Option<TargetId>,
    pub bounds: Bounds,
}

/// A ray hit on a part, before ownership is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartHit {
    pub part: PartId,
    /// Distance along the ray
    pub distance: f32,
}

/// Static table of targets and their hit-test parts.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<InteractiveTarget>,
    parts: Vec<TargetPart>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target and return its id.
    pub fn add_target(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        kind: TargetKind,
        project: Option<ProjectInfo>,
    ) -> TargetId {
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(InteractiveTarget {
            id,
            name: name.into(),
            position,
            kind,
            project,
        });
        id
    }

    /// Add a part owned by `owner`, with bounds given relative to the
    /// owner's position. Unknown owners are stored as scenery.
    pub fn add_part(&mut self, owner: TargetId, local_bounds: Bounds) -> PartId {
        match self.target(owner).map(|t| t.position) {
            Some(origin) => self.push_part(Some(owner), local_bounds.translated(origin)),
            None => self.push_part(None, local_bounds),
        }
    }

    /// Add a hit-test part that belongs to no target.
    pub fn add_scenery(&mut self, bounds: Bounds) -> PartId {
        self.push_part(None, bounds)
    }

    fn push_part(&mut self, owner: Option<TargetId>, bounds: Bounds) -> PartId {
        let id = PartId(self.parts.len() as u32);
        self.parts.push(TargetPart { id, owner, bounds });
        id
    }

    pub fn target(&self, id: TargetId) -> Option<&InteractiveTarget> {
        self.targets.get(id.0 as usize)
    }

    pub fn part(&self, id: PartId) -> Option<&TargetPart> {
        self.parts.get(id.0 as usize)
    }

    /// Target owning a part, if any.
    pub fn owner_of(&self, part: PartId) -> Option<&InteractiveTarget> {
        self.part(part)?.owner.and_then(|owner| self.target(owner))
    }

    pub fn list_interactive_targets(&self) -> &[InteractiveTarget] {
        &self.targets
    }

    pub fn parts(&self) -> &[TargetPart] {
        &self.parts
    }

    pub fn parts_of(&self, owner: TargetId) -> impl Iterator<Item = &TargetPart> {
        self.parts.iter().filter(move |p| p.owner == Some(owner))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&InteractiveTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// All parts the ray crosses, nearest first.
    pub fn raycast(&self, ray: &Ray) -> Vec<PartHit> {
        let mut hits: Vec<PartHit> = self
            .parts
            .iter()
            .filter_map(|p| {
                p.bounds.intersect(ray).map(|distance| PartHit {
                    part: p.id,
                    distance,
                })
            })
            .collect();
        // Stable sort keeps registration order for equal distances
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
