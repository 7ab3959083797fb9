//! Shape coercion, field validation, and field repair.
//!
//! Every element of a parsed response passes through the same pipeline:
//! required-key checks in schema declaration order, enumeration repair,
//! the multiple-choice options repair, and optional value-only collapsing.

use quizforge_core::{FieldKind, OutputSchema};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Exactly this many options survive repair.
const OPTION_COUNT: usize = 4;

/// Enforces the response shape implied by the prompt count.
///
/// Multi-prompt requests require a top-level array, one element per
/// prompt; single-prompt requests are wrapped into a one-element sequence
/// for uniform processing downstream.
pub(crate) fn coerce_shape(parsed: Value, list_input: bool) -> Result<Vec<Value>, String> {
    if list_input {
        match parsed {
            Value::Array(items) => Ok(items),
            _ => Err("Output format not in a list of JSON objects".to_string()),
        }
    } else {
        Ok(vec![parsed])
    }
}

/// Validates and repairs every element in place.
///
/// Returns the failure description for the attempt on the first violation
/// that repair cannot absorb.
pub(crate) fn validate_and_repair(
    elements: &mut [Value],
    schema: &OutputSchema,
    default_category: Option<&str>,
) -> Result<(), String> {
    for element in elements.iter_mut() {
        // A non-object element is missing every required key.
        let Some(record) = element.as_object_mut() else {
            let missing = schema
                .fields()
                .iter()
                .find(|f| !OutputSchema::is_placeholder_key(f.name()))
                .map(|f| f.name().clone())
                .unwrap_or_else(|| "output".to_string());
            return Err(format!("{} not in JSON output", missing));
        };

        for field in schema.fields() {
            let name = field.name();

            // Placeholder keys stand for generated key names, not literal ones.
            if OutputSchema::is_placeholder_key(name) {
                continue;
            }

            if !record.contains_key(name.as_str()) {
                return Err(format!("{} not in JSON output", name));
            }

            // The options list has its own repair below.
            if name == "options" {
                continue;
            }

            if let FieldKind::Enumeration(choices) = field.kind() {
                repair_enumeration(record, name, choices, default_category);
            }
        }

        if record.contains_key("options") {
            repair_options(record);
        }
    }

    Ok(())
}

/// Repairs one enumeration field in place.
///
/// A sequence collapses to its first element; a non-member swaps to the
/// default category when one is configured (and stays put otherwise); a
/// colon qualifier is truncated away.
fn repair_enumeration(
    record: &mut Map<String, Value>,
    name: &str,
    choices: &[String],
    default_category: Option<&str>,
) {
    let Some(value) = record.get_mut(name) else {
        return;
    };

    if let Value::Array(items) = value {
        let first = items.first().cloned().unwrap_or(Value::Null);
        *value = first;
    }

    let is_member = value
        .as_str()
        .map(|s| choices.iter().any(|c| c == s))
        .unwrap_or(false);
    if !is_member {
        if let Some(default) = default_category {
            *value = Value::String(default.to_string());
        }
    }

    if let Some(s) = value.as_str() {
        if let Some((head, _)) = s.split_once(':') {
            *value = Value::String(head.to_string());
        }
    }
}

/// Repairs a multiple-choice options list in place.
///
/// The list ends up with exactly [`OPTION_COUNT`] trimmed, first-seen
/// unique entries, padded with "Option N" labels, and always containing
/// the record's designated answer.
fn repair_options(record: &mut Map<String, Value>) {
    let answer = record
        .get("answer")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut options: Vec<String> = match record.get("options") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    options.retain(|option| seen.insert(option.clone()));
    options.truncate(OPTION_COUNT);
    while options.len() < OPTION_COUNT {
        options.push(format!("Option {}", options.len() + 1));
    }

    if let Some(answer) = answer {
        if !options.iter().any(|option| *option == answer) {
            options[OPTION_COUNT - 1] = answer;
        }
    }

    record.insert(
        "options".to_string(),
        Value::Array(options.into_iter().map(Value::String).collect()),
    );
}

/// Collapses each record to its bare value(s), in schema declaration
/// order; a single value is unwrapped to a scalar.
pub(crate) fn collapse_values(elements: Vec<Value>, schema: &OutputSchema) -> Vec<Value> {
    elements
        .into_iter()
        .map(|element| {
            let Value::Object(mut record) = element else {
                return element;
            };
            let mut values: Vec<Value> = schema
                .fields()
                .iter()
                .filter(|f| !OutputSchema::is_placeholder_key(f.name()))
                .filter_map(|f| record.remove(f.name().as_str()))
                .collect();
            match values.len() {
                1 => values.remove(0),
                _ => Value::Array(values),
            }
        })
        .collect()
}
