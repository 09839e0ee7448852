use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ParsedInputConfig { pub input_map: InputMap, pub errors: Vec<String> }

#[derive(Debug, serde::Deserialize)]
struct ActionDecl { description: Option<String> }

#[derive(Debug, serde::Deserialize)]
struct VirtualAxisToml { name: String, pos: String, neg: String, scale: Option<f32> }

#[derive(Debug, serde::Deserialize)]
struct DebugToml { bindings: Option<HashMap<String, Vec<String>>> }

#[derive(Debug, serde::Deserialize)]
struct RootToml { actions: Option<BTreeMap<String, ActionDecl>>, bindings: Option<HashMap<String, Vec<String>>>, debug: Option<DebugToml>, virtual_axes: Option<Vec<VirtualAxisToml>> }

/// Parse the TOML action map. Problems are collected rather than returned early
/// so one bad binding does not discard the rest of the file.
pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) { Ok(r) => r, Err(e) => { result.errors.push(format!("Top-level parse: {e}")); return result; } };

    let mut input_map = InputMap::default();
    // BTreeMap keeps action ids stable across reloads.
    if let Some(map) = root.actions {
        for (name, decl) in map {
            if !validate_action_name(&name) { result.errors.push(format!("Invalid action name '{name}': must be PascalCase")); continue; }
            let id = ActionId(input_map.actions.len() as u16);
            input_map.actions.push(ActionMeta { id, name: name.clone(), description: decl.description.unwrap_or_default() });
            input_map.name_to_id.insert(name, id);
        }
    }
    input_map.states = vec![ActionState::default(); input_map.actions.len()];

    // Merge bindings (normal + debug overlay if allowed)
    let mut all_bindings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(b) = root.bindings { for (k, v) in b { all_bindings.entry(k).or_default().extend(v); } }
    if debug_layer { if let Some(db) = root.debug.and_then(|d| d.bindings) { for (k, v) in db { all_bindings.entry(k).or_default().extend(v); } } }

    let mut binding_id: u32 = 0;
    for (action_name, list) in all_bindings {
        let Some(aid) = input_map.name_to_id.get(&action_name).copied() else { result.errors.push(format!("Binding references unknown action '{action_name}'")); continue; };
        for entry in &list {
            match parse_binding(entry) {
                Ok((tokens, hold)) => {
                    input_map.bindings_index.entry(aid).or_default().push(binding_id);
                    input_map.bindings.push(Binding { id: binding_id, tokens, hold_secs: hold });
                    binding_id += 1;
                }
                Err(err) => result.errors.push(format!("[binding {action_name} '{entry}'] {err}")),
            }
        }
    }
    input_map.bindings_runtime = vec![BindingRuntime::default(); input_map.bindings.len()];

    if let Some(vas) = root.virtual_axes {
        for va in vas {
            match (parse_token(&va.pos), parse_token(&va.neg)) {
                (Ok(p), Ok(n)) => input_map.virtual_axes.push(VirtualAxis { name: va.name, pos: p, neg: n, scale: va.scale.unwrap_or(1.0) }),
                (Err(e), _) => result.errors.push(format!("VirtualAxis pos error '{}': {e}", va.name)),
                (_, Err(e)) => result.errors.push(format!("VirtualAxis neg error '{}': {e}", va.name)),
            }
        }
    }
    input_map.virtual_axis_values = vec![0.0; input_map.virtual_axes.len()];

    result.input_map = input_map;
    result
}

fn validate_action_name(name: &str) -> bool { let bytes = name.as_bytes(); if bytes.is_empty() { return false; } if !bytes[0].is_ascii_uppercase() { return false; } name.chars().all(|c| c.is_ascii_alphanumeric()) }

fn parse_binding(chord: &str) -> Result<(SmallVec<[RawBindingToken; 2]>, f32), String> {
    let mut tokens: SmallVec<[RawBindingToken; 2]> = SmallVec::new();
    let mut hold: f32 = 0.0;
    let mut seen: HashSet<RawBindingToken> = HashSet::new();
    for part in chord.split('+') {
        let p = part.trim();
        if p.is_empty() { continue; }
        let token = if let Some(rest) = p.strip_prefix("hold>") {
            let (secs_str, after) = rest.split_once(':').ok_or_else(|| format!("Malformed hold qualifier '{p}': missing ':'"))?;
            hold = secs_str.parse::<f32>().map_err(|_| format!("Invalid hold seconds '{secs_str}'"))?;
            parse_token(after)?
        } else {
            parse_token(p)?
        };
        if !seen.insert(token) { return Err(format!("Duplicate token in chord: {token:?}")); }
        tokens.push(token);
    }
    if tokens.is_empty() { return Err("Empty binding".into()); }
    Ok((tokens, hold))
}

fn parse_token(s: &str) -> Result<RawBindingToken, String> {
    if let Some(rest) = s.strip_prefix("Key:") { return parse_keycode(rest); }
    if let Some(rest) = s.strip_prefix("Mouse:") {
        return match rest { "Left" => Ok(RawBindingToken::MouseBtn(MouseButton::Left)), "Right" => Ok(RawBindingToken::MouseBtn(MouseButton::Right)), "Middle" => Ok(RawBindingToken::MouseBtn(MouseButton::Middle)), other => Err(format!("Unknown mouse button '{other}'")) };
    }
    Err(format!("Unrecognized token '{s}'"))
}

fn parse_keycode(name: &str) -> Result<RawBindingToken, String> {
    let kc = match name {
        "ArrowLeft" => KeyCode::ArrowLeft, "ArrowRight" => KeyCode::ArrowRight, "ArrowUp" => KeyCode::ArrowUp, "ArrowDown" => KeyCode::ArrowDown,
        "A" | "KeyA" => KeyCode::KeyA, "D" | "KeyD" => KeyCode::KeyD, "W" | "KeyW" => KeyCode::KeyW, "S" | "KeyS" => KeyCode::KeyS,
        "R" | "KeyR" => KeyCode::KeyR, "P" | "KeyP" => KeyCode::KeyP,
        "Space" => KeyCode::Space, "Enter" => KeyCode::Enter, "Escape" => KeyCode::Escape, "ControlLeft" => KeyCode::ControlLeft,
        "Digit1" => KeyCode::Digit1, "Digit2" => KeyCode::Digit2, "F1" => KeyCode::F1, "F2" => KeyCode::F2,
        other => return Err(format!("Unsupported KeyCode '{other}' (extend parser)")),
    };
    Ok(RawBindingToken::Key(kc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [actions]
        Restart = { description = "New game" }
        ToggleWireframe = {}

        [bindings]
        Restart = ["Key:R", "Key:ControlLeft+Key:Enter"]

        [debug.bindings]
        ToggleWireframe = ["Key:F1"]

        [[virtual_axes]]
        name = "TiltX"
        pos = "Key:ArrowRight"
        neg = "Key:ArrowLeft"
    "#;

    #[test]
    fn parses_actions_bindings_and_axes() {
        let parsed = parse_input_toml(SAMPLE, true);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let map = parsed.input_map;
        assert_eq!(map.actions.len(), 2);
        assert_eq!(map.bindings.len(), 3);
        assert_eq!(map.bindings[1].tokens.len(), 2, "chord keeps both keys");
        assert_eq!(map.virtual_axes.len(), 1);
        assert_eq!(map.virtual_axis_values.len(), 1);
    }

    #[test]
    fn debug_layer_is_optional() {
        let parsed = parse_input_toml(SAMPLE, false);
        assert_eq!(parsed.input_map.bindings.len(), 2);
    }

    #[test]
    fn bad_tokens_are_reported_not_fatal() {
        let raw = r#"
            [actions]
            Restart = {}
            [bindings]
            Restart = ["Key:Nope", "Key:R", "Key:R+Key:R"]
            Missing = ["Key:R"]
        "#;
        let parsed = parse_input_toml(raw, false);
        assert_eq!(parsed.input_map.bindings.len(), 1);
        assert_eq!(parsed.errors.len(), 3, "{:?}", parsed.errors);
    }

    #[test]
    fn hold_qualifier_parses_seconds() {
        let (tokens, hold) = parse_binding("hold>0.5:Key:Escape").expect("parse hold");
        assert_eq!(tokens.as_slice(), &[RawBindingToken::Key(KeyCode::Escape)]);
        assert!((hold - 0.5).abs() < 1e-6);
    }
}
