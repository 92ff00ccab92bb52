//! Contracts between the action engine and its host: the input poller, the
//! rendering/scene collaborator and the world object store. The engine only
//! ever touches these through the traits below, so tests run against plain
//! in-memory doubles.

use crate::model::{DirectionFlags, InstanceId};
use crate::rgb::Rgb;

/// World-tile edge length in pixels; `move` deltas convert to grid units by
/// dividing by this.
pub const TILE_SIZE: f64 = 16.0;

/// Read-only snapshot of controller/keyboard state for the current frame.
pub trait InputSnapshot {
    fn is_held(&self, button: &str) -> bool;

    fn axis_value(&self, axis: &str) -> f32;

    fn direction_flags(&self) -> DirectionFlags;
}

/// Axis-aligned bounding box in pixel space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Pixel box covering a tile-coordinate footprint.
    pub fn from_tile_footprint(tiles: &[(i32, i32)]) -> Option<Self> {
        let xs = tiles.iter().map(|(x, _)| *x);
        let ys = tiles.iter().map(|(_, y)| *y);
        let (min_x, max_x) = (xs.clone().min()?, xs.max()?);
        let (min_y, max_y) = (ys.clone().min()?, ys.max()?);
        Some(Self {
            min_x: f64::from(min_x) * TILE_SIZE,
            min_y: f64::from(min_y) * TILE_SIZE,
            max_x: f64::from(max_x + 1) * TILE_SIZE,
            max_y: f64::from(max_y + 1) * TILE_SIZE,
        })
    }

    /// Strict overlap: boxes sharing only an edge do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// Parameters for a persistent point light owned by a `lighting` node.
#[derive(Debug, Clone, PartialEq)]
pub struct LightParams {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    pub intensity: f64,
    pub flicker: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    pub path: Option<String>,
    pub extension: Option<String>,
    pub reload: bool,
    pub hidden: bool,
}

/// Side-effect command decided by a node evaluator. Evaluators stay pure
/// and return these; the executor applies them after each evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetLight(LightParams),
    RemoveLight { id: String },
    ChangeScene { scene: String, start: Option<(f64, f64)> },
    MoveObject { dx: f64, dy: f64 },
    LoadPlugin { id: String, options: PluginOptions },
}

/// Rendering/scene collaborator the executor pushes effects into.
pub trait EffectSink {
    fn set_light(&mut self, light: &LightParams);

    fn remove_light(&mut self, id: &str);

    fn change_scene(&mut self, scene: &str, start: Option<(f64, f64)>);

    fn load_plugin(&mut self, id: &str, options: &PluginOptions);

    fn show_tooltip(&mut self, text: &str);
}

/// Access to world object geometry. `mutate_position` moves the object's
/// footprint by a signed delta in grid units.
pub trait WorldAccessor {
    fn bounding_box_of(&self, instance: &InstanceId) -> Option<Aabb>;

    /// The player/actor's current pixel-space box, `None` when no actor is
    /// active this frame.
    fn actor_box(&self) -> Option<Aabb>;

    fn mutate_position(&mut self, instance: &InstanceId, dx: f64, dy: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_sharing_boxes_do_not_overlap() {
        let object = Aabb::new(0.0, 0.0, 16.0, 16.0);
        let actor = Aabb::new(16.0, 0.0, 32.0, 16.0);
        assert!(!object.overlaps(&actor));
        assert!(!actor.overlaps(&object));
    }

    #[test]
    fn intersecting_boxes_overlap() {
        let object = Aabb::new(0.0, 0.0, 16.0, 16.0);
        let actor = Aabb::new(15.0, 8.0, 31.0, 24.0);
        assert!(object.overlaps(&actor));
        assert!(actor.overlaps(&object));
    }

    #[test]
    fn footprint_box_spans_whole_tiles() {
        let footprint = Aabb::from_tile_footprint(&[(2, 1), (3, 1)]).unwrap();
        assert_eq!(footprint, Aabb::new(32.0, 16.0, 64.0, 32.0));
        assert_eq!(Aabb::from_tile_footprint(&[]), None);
    }
}
