//! Schema node view
//!
//! A typed, borrowed view over a single JSON Schema object. The keywords the
//! condenser acts on are explicit fields; every remaining key is either a
//! reserved validation keyword (dropped) or an extension that is carried
//! through verbatim.

use serde_json::{Map, Value};

/// JSON Schema keywords that never survive condensation.
///
/// `properties` and `items` are listed here too: they are consumed
/// structurally rather than copied.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "$schema",
    "title",
    "type",
    "properties",
    "required",
    "format",
    "minimum",
    "maximum",
    "items",
    "additionalProperties",
    "definitions",
    "$ref",
    "oneOf",
    "anyOf",
    "allOf",
    "not",
    "if",
    "then",
    "else",
    "pattern",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "uniqueItems",
    "multipleOf",
    "exclusiveMinimum",
    "exclusiveMaximum",
];

/// Key under which array item schemas are condensed
pub const ITEMS_KEY: &str = "_items";

/// Check whether a key is a reserved JSON Schema keyword
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYWORDS.contains(&key)
}

/// Borrowed view of one schema node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode<'a> {
    /// `description`, when it is a string
    pub description: Option<&'a str>,
    /// `properties`, when it is an object
    pub properties: Option<&'a Map<String, Value>>,
    /// `items`, whatever its shape
    pub items: Option<&'a Value>,
    /// `definitions`, when it is an object (only ever a `$ref` target)
    pub definitions: Option<&'a Map<String, Value>>,
    /// `$ref`, when it is a string
    pub reference: Option<&'a str>,
    /// Non-reserved keys other than `description`, in source order
    pub extensions: Vec<(&'a str, &'a Value)>,
}

impl<'a> SchemaNode<'a> {
    /// Build a view over a JSON value.
    ///
    /// Anything other than an object (e.g. the boolean schemas `true` and
    /// `false`) yields an empty node.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    /// Build a view over a JSON object
    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        let mut node = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "description" => node.description = value.as_str(),
                "properties" => node.properties = value.as_object(),
                "items" => node.items = Some(value),
                "definitions" => node.definitions = value.as_object(),
                "$ref" => node.reference = value.as_str(),
                other if is_reserved(other) => {}
                other => node.extensions.push((other, value)),
            }
        }

        node
    }
}
