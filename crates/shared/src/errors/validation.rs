use serde_json::{Value, json};
use validator::{ValidationError, ValidationErrors};

fn describe(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "custom" => "Custom validation failed".to_string(),
            _ => format!("Invalid {field}"),
        })
}

/// Flattens validator output into `field: message` lines, sorted by field.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |error| format!("{field}: {}", describe(&field, error)))
        })
        .collect()
}

pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors.iter().map(|e| describe(&field, e)).collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}
