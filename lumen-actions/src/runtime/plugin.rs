use crate::{
    host::{Effect, PluginOptions},
    model::{Inputs, NodeDescriptor, Value},
    runtime::{input_truthy, EvalContext, NodeBehavior, Outcome},
};

/// Fire-and-forget load of an external plugin module by id.
pub struct PluginBehavior;

impl NodeBehavior for PluginBehavior {
    fn evaluate(&self, _ctx: &mut EvalContext, node: &NodeDescriptor, inputs: &Inputs) -> Outcome {
        if !input_truthy(inputs) {
            return Outcome::silent();
        }

        let Some(id) = node.field_str("plugin") else {
            log::warn!("plugin node {} has no plugin id configured", node.id);
            return Outcome::silent();
        };

        let options = PluginOptions {
            path: node.field_str("path").map(str::to_string),
            extension: node.field_str("extension").map(str::to_string),
            reload: node.field_bool("reload").unwrap_or(false),
            hidden: node.field_bool("hidden").unwrap_or(false),
        };

        Outcome::single("output", Value::Bool(true)).with_effect(Effect::LoadPlugin {
            id: id.to_string(),
            options,
        })
    }
}
