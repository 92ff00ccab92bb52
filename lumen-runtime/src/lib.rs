#![forbid(unsafe_code)]

//! Frame-driven glue around `lumen-actions`: the per-frame proximity
//! scanner that runs every interactive object's action graph, and the
//! tile-script interpreter driven by movement events.

pub mod scene_actions;
pub mod tilescript;

pub use crate::{
    scene_actions::ActionRuntime,
    tilescript::{
        Actor, BodyMode, ExitRule, TileAction, TileId, TileScript, TileScriptInterpreter,
        WalkRule, SWIM_SPEED, WALK_SPEED,
    },
};

#[cfg(test)]
pub(crate) mod support {
    use lumen_actions::{
        Aabb, DirectionFlags, EffectSink, InputSnapshot, InstanceId, LightParams, PluginOptions,
        WorldAccessor,
    };
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Debug, Default)]
    pub struct TestInput {
        pub held: BTreeSet<String>,
        pub flags: DirectionFlags,
    }

    impl TestInput {
        pub fn holding(button: &str) -> Self {
            let mut input = Self::default();
            input.held.insert(button.to_string());
            input
        }
    }

    impl InputSnapshot for TestInput {
        fn is_held(&self, button: &str) -> bool {
            self.held.contains(button)
        }

        fn axis_value(&self, _axis: &str) -> f32 {
            0.0
        }

        fn direction_flags(&self) -> DirectionFlags {
            self.flags
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub lights: Vec<LightParams>,
        pub removed: Vec<String>,
        pub scenes: Vec<(String, Option<(f64, f64)>)>,
        pub plugins: Vec<(String, PluginOptions)>,
        pub tooltips: Vec<String>,
    }

    impl EffectSink for RecordingSink {
        fn set_light(&mut self, light: &LightParams) {
            self.lights.push(light.clone());
        }

        fn remove_light(&mut self, id: &str) {
            self.removed.push(id.to_string());
        }

        fn change_scene(&mut self, scene: &str, start: Option<(f64, f64)>) {
            self.scenes.push((scene.to_string(), start));
        }

        fn load_plugin(&mut self, id: &str, options: &PluginOptions) {
            self.plugins.push((id.to_string(), options.clone()));
        }

        fn show_tooltip(&mut self, text: &str) {
            self.tooltips.push(text.to_string());
        }
    }

    #[derive(Debug, Default)]
    pub struct TestWorld {
        pub boxes: BTreeMap<InstanceId, Aabb>,
        pub actor: Option<Aabb>,
        pub moves: Vec<(InstanceId, f64, f64)>,
    }

    impl WorldAccessor for TestWorld {
        fn bounding_box_of(&self, instance: &InstanceId) -> Option<Aabb> {
            self.boxes.get(instance).copied()
        }

        fn actor_box(&self) -> Option<Aabb> {
            self.actor
        }

        fn mutate_position(&mut self, instance: &InstanceId, dx: f64, dy: f64) {
            self.moves.push((instance.clone(), dx, dy));
        }
    }
}
