//! Static per-tile behavior scripts: flat condition/action records applied
//! on tile entry/exit, with no graph structure.

use lumen_actions::{EffectSink, InputSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Actor speed while swimming, in pixels per second.
pub const SWIM_SPEED: f32 = 55.0;
/// Actor speed on foot, in pixels per second.
pub const WALK_SPEED: f32 = 90.0;

/// Identifier of a tile definition in the loaded tileset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// One coordinate-scoped action trigger: fires only when the actor stands
/// on exactly this grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileAction {
    pub x: i32,
    pub y: i32,
    pub action: String,
}

/// The `walk` section of a tile script, applied when the actor enters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkRule {
    /// Required held button; when configured and not held, nothing fires.
    #[serde(default)]
    pub button: Option<String>,
    #[serde(default)]
    pub swim: bool,
    #[serde(default)]
    pub cut: bool,
    #[serde(default)]
    pub sway: bool,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub actions: Vec<TileAction>,
}

/// The `exit` section, applied when the actor leaves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExitRule {
    /// `Some(false)` restores the actor's non-swimming body on exit;
    /// `None` leaves the body mode untouched.
    #[serde(default)]
    pub swim: Option<bool>,
    #[serde(default)]
    pub tooltip: Option<String>,
}

/// Static, declarative behavior attached to one tile. Loaded with the room
/// data, never mutated at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileScript {
    #[serde(default)]
    pub walk: Option<WalkRule>,
    #[serde(default)]
    pub exit: Option<ExitRule>,
}

/// The actor's two-state body machine, driven entirely by tile entry/exit.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BodyMode {
    #[default]
    Normal,
    Swimming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub mode: BodyMode,
    pub speed: f32,
    pub grid_x: i32,
    pub grid_y: i32,
}

impl Actor {
    pub fn new(grid_x: i32, grid_y: i32) -> Self {
        Self {
            mode: BodyMode::Normal,
            speed: WALK_SPEED,
            grid_x,
            grid_y,
        }
    }

    pub fn set_swimming(&mut self) {
        self.mode = BodyMode::Swimming;
        self.speed = SWIM_SPEED;
    }

    pub fn set_normal(&mut self) {
        self.mode = BodyMode::Normal;
        self.speed = WALK_SPEED;
    }

    pub fn is_swimming(&self) -> bool {
        self.mode == BodyMode::Swimming
    }
}

type ActionHandler = Box<dyn FnMut(&mut Actor, &mut dyn EffectSink)>;

/// Applies tile scripts on movement events. Named actions are looked up in
/// a handler registry populated by the host; an unknown name is a
/// configuration error, logged and skipped.
#[derive(Default)]
pub struct TileScriptInterpreter {
    scripts: BTreeMap<TileId, TileScript>,
    handlers: BTreeMap<String, ActionHandler>,
}

impl TileScriptInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_script(&mut self, tile: TileId, script: TileScript) {
        self.scripts.insert(tile, script);
    }

    pub fn script(&self, tile: TileId) -> Option<&TileScript> {
        self.scripts.get(&tile)
    }

    pub fn register_action(
        &mut self,
        name: &str,
        handler: impl FnMut(&mut Actor, &mut dyn EffectSink) + 'static,
    ) {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    /// Applies a tile's `walk` section: button gate first, then swim state,
    /// tooltip, and any coordinate-matched actions, in that order.
    pub fn on_walk(
        &mut self,
        tile: TileId,
        actor: &mut Actor,
        input: &dyn InputSnapshot,
        sink: &mut dyn EffectSink,
    ) {
        let Some(walk) = self.scripts.get(&tile).and_then(|s| s.walk.as_ref()) else {
            return;
        };

        if let Some(button) = &walk.button {
            if !input.is_held(button) {
                return;
            }
        }

        if walk.swim {
            actor.set_swimming();
        }

        if let Some(tooltip) = &walk.tooltip {
            sink.show_tooltip(tooltip);
        }

        for action in &walk.actions {
            if action.x != actor.grid_x || action.y != actor.grid_y {
                continue;
            }
            match self.handlers.get_mut(&action.action) {
                Some(handler) => handler(actor, sink),
                None => log::warn!(
                    "tile {} references unknown action {:?}; skipping",
                    tile.0,
                    action.action
                ),
            }
        }
    }

    /// Applies a tile's `exit` section.
    pub fn on_exit(&mut self, tile: TileId, actor: &mut Actor, sink: &mut dyn EffectSink) {
        let Some(exit) = self.scripts.get(&tile).and_then(|s| s.exit.as_ref()) else {
            return;
        };

        if exit.swim == Some(false) {
            actor.set_normal();
        }

        if let Some(tooltip) = &exit.tooltip {
            sink.show_tooltip(tooltip);
        }
    }
}
