//! Dotted-path access and recursive merging over a JSON object tree.

use serde_json::{Map, Value};

/// Walks `path` segment by segment. A missing segment, a non-object in the
/// middle of the path, or a stored `null` all read as absent.
pub(crate) fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    (!current.is_null()).then_some(current)
}

/// Sets the final segment of `path`, creating intermediate objects and
/// replacing any non-object found on the way.
pub(crate) fn assign(root: &mut Map<String, Value>, path: &str, value: Value) {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = root;
    for segment in parents.into_iter().flat_map(|parents| parents.split('.')) {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(leaf.to_string(), value);
}

/// Overlays `overlay` onto `base`. Objects present on both sides merge
/// recursively; anything else in the overlay replaces the base value.
pub(crate) fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match value {
            Value::Object(overlay_map) => {
                if let Some(Value::Object(base_map)) = base.get_mut(&key) {
                    deep_merge(base_map, overlay_map);
                    continue;
                }
                base.insert(key, Value::Object(overlay_map));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
