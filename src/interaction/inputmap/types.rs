use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u16); // internal index (array position)

#[derive(Debug, Clone)]
pub struct ActionMeta { pub id: ActionId, pub name: String, pub description: String }

#[derive(Default, Debug, Clone, Copy)]
pub struct ActionState { pub pressed: bool, pub just_pressed: bool, pub just_released: bool }
impl ActionState { pub fn clear_transitions(&mut self) { self.just_pressed = false; self.just_released = false; } }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawBindingToken { Key(KeyCode), MouseBtn(MouseButton) }

/// One chord (all tokens held together) bound to an action.
#[derive(Debug, Clone)]
pub struct Binding { pub id: u32, pub tokens: SmallVec<[RawBindingToken; 2]>, pub hold_secs: f32 }

#[derive(Debug, Default, Clone)]
pub struct BindingRuntime { pub active: bool, pub just_pressed: bool, pub just_released: bool, pub hold_elapsed: f32 }

/// Digital axis built from a positive and negative token. Several entries may
/// share a name (arrows + WASD); their values are summed and clamped.
#[derive(Debug, Clone)]
pub struct VirtualAxis { pub name: String, pub pos: RawBindingToken, pub neg: RawBindingToken, pub scale: f32 }

#[derive(Resource, Debug, Default)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings_index: HashMap<ActionId, Vec<u32>>, // mapping to binding ids
    pub bindings: Vec<Binding>,
    pub bindings_runtime: Vec<BindingRuntime>,
    pub states: Vec<ActionState>,
    pub virtual_axes: Vec<VirtualAxis>,
    pub virtual_axis_values: Vec<f32>,
    pub frame_counter: u64,
}

impl InputMap {
    pub fn get_state(&self, name: &str) -> Option<&ActionState> { self.name_to_id.get(name).and_then(|id| self.states.get(id.0 as usize)) }
    pub fn pressed(&self, name: &str) -> bool { self.get_state(name).is_some_and(|s| s.pressed) }
    pub fn just_pressed(&self, name: &str) -> bool { self.get_state(name).is_some_and(|s| s.just_pressed) }
    pub fn just_released(&self, name: &str) -> bool { self.get_state(name).is_some_and(|s| s.just_released) }

    /// Combined value of every virtual axis registered under `name`, in -1..=1.
    pub fn virtual_axis(&self, name: &str) -> f32 {
        let sum: f32 = self
            .virtual_axes
            .iter()
            .zip(self.virtual_axis_values.iter())
            .filter(|(va, _)| va.name == name)
            .map(|(_, v)| *v)
            .sum();
        sum.clamp(-1.0, 1.0)
    }
}
