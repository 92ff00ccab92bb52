//! Long-lived runtime state: everything that must survive across passes and
//! frames. Pass-scoped data lives in the executor's per-pass arena instead.

use crate::model::{InstanceId, NodeId};
use std::collections::BTreeMap;

/// Key for per-node persistent state. Including the owning instance keeps
/// two copies of the same authored graph from sharing timers or switches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StateKey {
    pub instance: InstanceId,
    pub node: NodeId,
}

impl StateKey {
    pub fn new(instance: &InstanceId, node: NodeId) -> Self {
        Self {
            instance: instance.clone(),
            node,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimerState {
    pub start_ms: f64,
    pub fired: bool,
}

/// All persistent registries in one explicit struct, created once per scene
/// and threaded into every pass. Entries appear lazily on first evaluation
/// of a stateful node and are dropped when the owning object is torn down.
#[derive(Debug, Default)]
pub struct RuntimeState {
    throttles: BTreeMap<String, f64>,
    timers: BTreeMap<StateKey, TimerState>,
    switches: BTreeMap<StateKey, bool>,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the cooldown window for `key` has elapsed (or never
    /// started). Checking never consumes the window; only
    /// [`RuntimeState::throttle_mark`] resets the clock.
    pub fn throttle_ready(&self, key: &str, delay_ms: f64, now_ms: f64) -> bool {
        match self.throttles.get(key) {
            Some(last) => now_ms - last >= delay_ms,
            None => true,
        }
    }

    pub fn throttle_mark(&mut self, key: &str, now_ms: f64) {
        self.throttles.insert(key.to_string(), now_ms);
    }

    /// Lazily created timer state, armed at `now_ms` on first touch.
    pub fn timer(&mut self, key: StateKey, now_ms: f64) -> &mut TimerState {
        self.timers.entry(key).or_insert(TimerState {
            start_ms: now_ms,
            fired: false,
        })
    }

    /// Flips the switch and returns the new state. Missing entries start
    /// out `false`, so the first flip yields `true`.
    pub fn flip_switch(&mut self, key: StateKey) -> bool {
        let entry = self.switches.entry(key).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Reads the switch without flipping it.
    pub fn switch(&self, key: &StateKey) -> bool {
        self.switches.get(key).copied().unwrap_or(false)
    }

    /// Drops every per-node entry owned by `instance`. Called on object
    /// teardown so destroyed objects do not leak state forever.
    pub fn clear_instance(&mut self, instance: &InstanceId) {
        self.timers.retain(|key, _| key.instance != *instance);
        self.switches.retain(|key, _| key.instance != *instance);
    }
}
