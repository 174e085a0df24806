//! Integration test suite for the ECMAScript parser
//!
//! Shared helpers for tests that drive the parser through its public
//! entry points and inspect the ESTree JSON it produces.

use parser::{parse, ParseOptions};
use serde_json::Value;

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use parser;
}

/// Parse and render as ESTree JSON, panicking with the error on failure
pub fn estree(source: &str, options: &ParseOptions) -> Value {
    match parse(source, options) {
        Ok(program) => program.to_estree_json(options),
        Err(err) => panic!("Failed to parse {:?}: {}", source, err),
    }
}

/// Node `type` tags in pre-order, children visited in field order
pub fn node_types(value: &Value) -> Vec<String> {
    let mut types = Vec::new();
    collect_types(value, &mut types);
    types
}

fn collect_types(value: &Value, types: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(kind)) = map.get("type") {
                types.push(kind.clone());
            }
            for (key, child) in map {
                if key != "loc" {
                    collect_types(child, types);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_types(item, types)),
        _ => {}
    }
}

/// Check that every node range lies within `0..=len` and inside its
/// parent's range. Returns a description of the first violation.
pub fn check_positions(value: &Value, len: u64) -> Result<(), String> {
    check_node(value, 0, len)
}

fn check_node(value: &Value, parent_start: u64, parent_end: u64) -> Result<(), String> {
    match value {
        Value::Object(map) => {
            let (mut start, mut end) = (parent_start, parent_end);
            if map.contains_key("type") {
                let (Some(node_start), Some(node_end)) = (
                    map.get("start").and_then(Value::as_u64),
                    map.get("end").and_then(Value::as_u64),
                ) else {
                    return Err(format!("node without range: {}", value));
                };
                if node_start > node_end || node_start < parent_start || node_end > parent_end {
                    return Err(format!(
                        "{} [{}, {}) escapes parent [{}, {})",
                        map["type"], node_start, node_end, parent_start, parent_end
                    ));
                }
                start = node_start;
                end = node_end;
            }
            for (key, child) in map {
                if key != "loc" {
                    check_node(child, start, end)?;
                }
            }
            Ok(())
        }
        Value::Array(items) => items
            .iter()
            .try_for_each(|item| check_node(item, parent_start, parent_end)),
        _ => Ok(()),
    }
}
