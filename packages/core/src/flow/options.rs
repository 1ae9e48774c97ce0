use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use linkflow_types::Value;

/// One selectable entry of a dynamically populated dropdown
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub id: String,
    pub name: String,
}

impl OptionItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Maps the array at `pointer` into options, reading `id_key` and `name_key`
/// from each entry. Numeric ids are stringified; entries without an id are
/// skipped and entries without a name fall back to their id.
pub fn collect_options(body: &Value, pointer: &str, id_key: &str, name_key: &str) -> Vec<OptionItem> {
    let Some(items) = body.pointer(pointer).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let id = scalar_to_string(item.get(id_key)?)?;
            let name = item
                .get(name_key)
                .and_then(scalar_to_string)
                .unwrap_or_else(|| id.clone());
            Some(OptionItem::new(id, name))
        })
        .collect()
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkflow_types::json::json;

    #[test]
    fn collects_string_and_numeric_ids() {
        let body = json!({
            "data": [
                {"gid": "12", "name": "Marketing"},
                {"gid": 13, "name": "Sales"},
                {"gid": "14"},
                {"name": "orphan"}
            ]
        });

        let options = collect_options(&body, "/data", "gid", "name");
        assert_eq!(
            options,
            vec![
                OptionItem::new("12", "Marketing"),
                OptionItem::new("13", "Sales"),
                OptionItem::new("14", "14"),
            ]
        );
    }

    #[test]
    fn missing_array_yields_nothing() {
        assert!(collect_options(&json!({}), "/items", "id", "title").is_empty());
        assert!(collect_options(&json!([{"id": 1}]), "", "id", "title").len() == 1);
    }
}
