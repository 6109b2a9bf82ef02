use serde_json::{Map, Value};

/// Replace `old` with `new` throughout a JSON tree, matching on both map
/// keys and string values. Strings are replaced only on whole-value
/// equality; non-string scalars pass through untouched.
pub fn replace_name(value: &Value, old: &str, new: &str) -> Value {
    match value {
        Value::Object(entries) => {
            let mut replaced = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                let key = if key == old {
                    new.to_string()
                } else {
                    key.clone()
                };
                replaced.insert(key, replace_name(entry, old, new));
            }
            Value::Object(replaced)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| replace_name(item, old, new))
                .collect(),
        ),
        Value::String(text) if text == old => Value::String(new.to_string()),
        other => other.clone(),
    }
}

/// Rewrite a `plot_input_data` cell: the embedded document is a JSON list
/// whose elements carry the sample name as keys and values.
pub fn update_plot_input(
    plot_input_data: &str,
    old_sample_name: &str,
    new_sample_name: &str,
) -> Result<String, serde_json::Error> {
    let documents: Vec<Value> = serde_json::from_str(plot_input_data)?;
    let replaced: Vec<Value> = documents
        .iter()
        .map(|document| replace_name(document, old_sample_name, new_sample_name))
        .collect();
    serde_json::to_string(&replaced)
}
