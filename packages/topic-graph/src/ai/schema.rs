//! JSON schema generation for OpenAI structured outputs.
//!
//! OpenAI strict mode requires `additionalProperties: false` on every object,
//! every property listed in `required`, and no `$ref` indirection.

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// Strict-mode schema for `T`.
pub fn strict_schema<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schema_for!(T)).unwrap_or_default();

    close_objects(&mut value);

    let definitions = value.get("definitions").cloned();
    if let Some(defs) = definitions {
        inline_refs(&mut value, &defs);
    }

    if let Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
    }

    value
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                let required = map.get("properties").and_then(Value::as_object).map(|props| {
                    props
                        .keys()
                        .map(|k| Value::String(k.clone()))
                        .collect::<Vec<_>>()
                });
                if let Some(required) = required {
                    map.insert("required".to_string(), Value::Array(required));
                }
            }

            for (_, v) in map.iter_mut() {
                close_objects(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_objects),
        _ => {}
    }
}

fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();

            if let Some(def) = target {
                *value = def;
                inline_refs(value, definitions);
                return;
            }

            for (_, v) in map.iter_mut() {
                inline_refs(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::TopicDocument;

    #[test]
    fn test_topic_document_schema_is_strict() {
        let schema = strict_schema::<TopicDocument>();
        let text = serde_json::to_string(&schema).unwrap();

        assert!(!text.contains("$ref"));
        assert!(schema.get("definitions").is_none());
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["additionalProperties"], Value::Bool(false));
        assert_eq!(schema["required"], serde_json::json!(["main_topics"]));
    }

    #[test]
    fn test_nested_objects_require_every_property() {
        let schema = strict_schema::<TopicDocument>();
        let main = &schema["properties"]["main_topics"]["items"];
        let sub = &main["properties"]["subtopics"]["items"];

        assert_eq!(main["additionalProperties"], Value::Bool(false));
        assert_eq!(sub["additionalProperties"], Value::Bool(false));

        let required = sub["required"].as_array().unwrap();
        assert!(required.contains(&Value::String("details".into())));
        assert!(required.contains(&Value::String("name".into())));
    }
}
